use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};

pub struct YahooFinanceProvider {
    client: reqwest::Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

// Minimal response structs (only what we need from the v8 chart payload)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    adjclose: Vec<Option<f64>>,
}

fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    async fn fetch_monthly_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?period1={}&period2={}&interval=1mo&includeAdjustedClose=true",
            epoch_seconds(start),
            epoch_seconds(end),
        );

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }
        // Unknown symbols come back as 404 with an error body
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PriceProviderError::NoData(ticker.to_string()));
        }

        let body = resp
            .json::<YahooChartResponse>()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        if let Some(err) = body.chart.error {
            return Err(PriceProviderError::BadResponse(err.to_string()));
        }

        let result = body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| PriceProviderError::NoData(ticker.to_string()))?;

        // timestamp aligns with the close/adjclose lists by index
        let closes = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| PriceProviderError::BadResponse("missing quote".into()))?
            .close
            .clone();

        let adjcloses = result
            .indicators
            .adjclose
            .as_ref()
            .and_then(|a| a.first())
            .map(|a| a.adjclose.clone());

        let mut out = Vec::new();

        for (i, ts) in result.timestamp.iter().enumerate() {
            // prefer the adjusted close, fall back to the raw close
            let close = adjcloses
                .as_ref()
                .and_then(|adj| adj.get(i).and_then(|v| *v))
                .or_else(|| closes.get(i).and_then(|v| *v));

            // skip entries where both are missing
            let Some(close) = close else { continue };

            let dt = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| PriceProviderError::Parse("bad timestamp".into()))?;

            out.push(ExternalPricePoint {
                date: dt.date_naive(),
                close,
            });
        }

        // Ensure ascending by date; Yahoo appends a partial current-month
        // bar that can repeat the last monthly date.
        out.sort_by_key(|p| p.date);
        out.dedup_by_key(|p| p.date);

        if out.is_empty() {
            return Err(PriceProviderError::NoData(ticker.to_string()));
        }

        Ok(out)
    }
}
