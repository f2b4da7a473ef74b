use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{ComparisonMeta, ComparisonResult, PricePoint, PriceSeries, TickerReport};
use crate::services::analytics_service;

/// Comparison window: five calendar years back from today.
pub const COMPARISON_WINDOW_DAYS: i64 = 5 * 365;

/// Run one full comparison request: fetch both tickers, restrict them to
/// their shared dates, rebase to 100 and compute per-ticker metrics.
///
/// Both fetches run concurrently; there is no shared state between them.
/// If either ticker fails the whole comparison fails and the error names
/// the ticker — partial results are never returned.
pub async fn compare_tickers(
    provider: &dyn PriceProvider,
    ticker1: &str,
    ticker2: &str,
) -> Result<ComparisonResult, AppError> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(COMPARISON_WINDOW_DAYS);

    info!(
        "Comparing {} vs {} over {} -> {} (monthly)",
        ticker1, ticker2, start, end
    );

    let (first, second) = tokio::join!(
        fetch_series(provider, ticker1, start, end),
        fetch_series(provider, ticker2, start, end),
    );
    let (series1, series2) = (first?, second?);

    let (series1, series2) = analytics_service::align(&series1, &series2)?;

    let normalized1 = analytics_service::normalize(&series1)?;
    let normalized2 = analytics_service::normalize(&series2)?;
    let difference = analytics_service::difference(&normalized1, &normalized2)?;

    let metrics1 = analytics_service::metrics(&series1)?;
    let metrics2 = analytics_service::metrics(&series2)?;

    let meta = ComparisonMeta {
        points: series1.len(),
        start: series1.first().date,
        end: series1.last().date,
    };

    info!(
        "Compared {} vs {}: {} shared points, CAGR {:.4} vs {:.4}",
        ticker1, ticker2, meta.points, metrics1.cagr, metrics2.cagr
    );

    Ok(ComparisonResult {
        ticker1: TickerReport {
            ticker: series1.ticker().to_string(),
            normalized: normalized1,
            metrics: metrics1,
        },
        ticker2: TickerReport {
            ticker: series2.ticker().to_string(),
            normalized: normalized2,
            metrics: metrics2,
        },
        difference,
        meta,
    })
}

/// Fetch one ticker's monthly history and validate it into a `PriceSeries`.
async fn fetch_series(
    provider: &dyn PriceProvider,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, AppError> {
    let points = provider
        .fetch_monthly_history(ticker, start, end)
        .await
        .map_err(|e| {
            error!("Failed to fetch monthly history for {}: {}", ticker, e);
            match e {
                PriceProviderError::NoData(_) => AppError::NoDataReturned(ticker.to_string()),
                PriceProviderError::RateLimited => AppError::RateLimited,
                other => AppError::External(format!("{}: {}", ticker, other)),
            }
        })?;

    if points.is_empty() {
        return Err(AppError::NoDataReturned(ticker.to_string()));
    }

    let points = points
        .into_iter()
        .map(|p| PricePoint {
            date: p.date,
            close: p.close,
        })
        .collect();

    Ok(PriceSeries::new(ticker, points)?)
}
