use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

// A single (date, close) observation for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// An ordered series of closing prices for one ticker.
///
/// Invariants, enforced at construction and never revalidated: at least one
/// point, dates strictly increasing, all prices finite and non-negative.
/// The series is immutable for its whole lifetime; every comparison request
/// builds fresh instances from raw fetched data and discards them when the
/// response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(
        ticker: impl Into<String>,
        points: Vec<PricePoint>,
    ) -> Result<Self, AnalyticsError> {
        let ticker = ticker.into();

        if points.is_empty() {
            return Err(AnalyticsError::InvalidInput(format!(
                "empty price series for {}",
                ticker
            )));
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalyticsError::InvalidInput(format!(
                    "dates not strictly increasing for {}: {} followed by {}",
                    ticker, pair[0].date, pair[1].date
                )));
            }
        }

        if let Some(p) = points.iter().find(|p| !p.close.is_finite() || p.close < 0.0) {
            return Err(AnalyticsError::InvalidInput(format!(
                "bad price {} for {} on {}",
                p.close, ticker, p.date
            )));
        }

        Ok(Self { ticker, points })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    // Non-emptiness is a construction invariant, so first/last are total.
    pub fn first(&self) -> PricePoint {
        self.points[0]
    }

    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }
}
