use async_trait::async_trait;
use chrono::{Months, NaiveDate};

use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};

/// Random-walk provider for running the service without network access.
///
/// Produces one point per month over the requested window, multiplicatively
/// perturbed so the charts look plausible. Selected with
/// `PRICE_PROVIDER=mock`.
pub struct MockProvider;

#[async_trait]
impl PriceProvider for MockProvider {
    async fn fetch_monthly_history(
        &self,
        _ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let mut points = Vec::new();
        let mut current = 100.0_f64;
        let mut date = start;

        while date <= end {
            current *= 1.0 + (rand::random::<f64>() - 0.5) * 0.08;
            points.push(ExternalPricePoint { date, close: current });

            date = match date.checked_add_months(Months::new(1)) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(points)
    }
}
