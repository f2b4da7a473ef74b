use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DifferenceSeries, NormalizedSeries, SeriesMetrics};

/// Everything one comparison request produces for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerReport {
    pub ticker: String,
    pub normalized: NormalizedSeries,
    pub metrics: SeriesMetrics,
}

/// Shape of the window the two series were actually compared over, after
/// restricting both to their shared dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonMeta {
    pub points: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Full payload for one ticker-vs-ticker comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub ticker1: TickerReport,
    pub ticker2: TickerReport,
    pub difference: DifferenceSeries,
    pub meta: ComparisonMeta,
}
