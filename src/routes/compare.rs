use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::ComparisonResult;
use crate::services::{comparison_service, csv_export_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(compare))
        .route("/csv", get(compare_csv))
}

/// Query parameters for a comparison request
#[derive(Debug, Deserialize)]
pub struct CompareQueryParams {
    pub ticker1: String,
    pub ticker2: String,
}

impl CompareQueryParams {
    fn validate(&self) -> Result<(), AppError> {
        if self.ticker1.trim().is_empty() || self.ticker2.trim().is_empty() {
            return Err(AppError::Validation(
                "ticker1 and ticker2 must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// GET /api/compare
///
/// Run a full two-ticker comparison over the five-year monthly window and
/// return normalized series, the difference series and per-ticker metrics.
///
/// Example: GET /api/compare?ticker1=HDFCBANK.NS&ticker2=INFY.NS
#[axum::debug_handler]
pub async fn compare(
    Query(params): Query<CompareQueryParams>,
    State(state): State<AppState>,
) -> Result<Json<ComparisonResult>, AppError> {
    info!(
        "GET /api/compare - Comparing {} vs {}",
        params.ticker1, params.ticker2
    );
    params.validate()?;

    let result = comparison_service::compare_tickers(
        state.price_provider.as_ref(),
        &params.ticker1,
        &params.ticker2,
    )
    .await
    .map_err(|e| {
        log_compare_error(&params, &e);
        e
    })?;

    Ok(Json(result))
}

/// GET /api/compare/csv
///
/// The same comparison serialized as CSV (one row per date, one column per
/// ticker), served as a download.
///
/// Example: GET /api/compare/csv?ticker1=HDFCBANK.NS&ticker2=INFY.NS
#[axum::debug_handler]
pub async fn compare_csv(
    Query(params): Query<CompareQueryParams>,
    State(state): State<AppState>,
) -> Result<(HeaderMap, String), AppError> {
    info!(
        "GET /api/compare/csv - Exporting {} vs {}",
        params.ticker1, params.ticker2
    );
    params.validate()?;

    let result = comparison_service::compare_tickers(
        state.price_provider.as_ref(),
        &params.ticker1,
        &params.ticker2,
    )
    .await
    .map_err(|e| {
        log_compare_error(&params, &e);
        e
    })?;

    let csv = csv_export_service::export_comparison(
        &result.ticker1.normalized,
        &result.ticker2.normalized,
    )?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"stock_comparison.csv\""),
    );

    Ok((headers, csv))
}

fn log_compare_error(params: &CompareQueryParams, e: &AppError) {
    match e {
        AppError::NoDataReturned(ticker) => {
            warn!("No data returned for {}", ticker);
        }
        AppError::RateLimited => {
            warn!(
                "Rate limited while comparing {} and {}",
                params.ticker1, params.ticker2
            );
        }
        AppError::Analytics(err) => {
            warn!(
                "Analytics failure for {} vs {}: {}",
                params.ticker1, params.ticker2, err
            );
        }
        _ => {
            error!(
                "Failed to compare {} and {}: {}",
                params.ticker1, params.ticker2, e
            );
        }
    }
}
