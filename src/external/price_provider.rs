use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// A single observation as returned by a market-data provider, before it is
/// validated into a `PriceSeries`.
#[derive(Debug, Clone, Copy)]
pub struct ExternalPricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("no data for {0}")]
    NoData(String),
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch monthly-interval closing prices for `ticker` over `[start, end]`.
    ///
    /// Implementations prefer an adjusted-close field and fall back to the
    /// raw close, drop missing entries, and return points ascending by date.
    /// When nothing usable remains the call fails with `NoData` — an empty
    /// `Ok` is never a valid answer.
    async fn fetch_monthly_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError>;
}
