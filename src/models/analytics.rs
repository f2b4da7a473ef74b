use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of a series rebased to a common index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A price series rebased so its first observation equals the base index
/// (100). Same length and date index as the series it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub ticker: String,
    pub points: Vec<IndexedPoint>,
}

/// Pointwise gap between two normalized series sharing a date index.
///
/// Positive values mean the first series has outperformed the second since
/// the base date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferenceSeries {
    pub points: Vec<IndexedPoint>,
}

/// Summary statistics for a single price series.
///
/// Both values are dimensionless ratios (0.12 = 12%); the presentation
/// layer is responsible for percentage formatting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesMetrics {
    /// Compound annual growth rate over the series' span.
    pub cagr: f64,

    /// Worst peak-to-trough decline, as a negative fraction (0 = no decline).
    pub max_drawdown: f64,
}
