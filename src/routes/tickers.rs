use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::state::AppState;

/// NSE symbols offered by the dashboard's ticker pickers.
const DEFAULT_TICKERS: [&str; 8] = [
    "RELIANCE.NS",
    "TCS.NS",
    "INFY.NS",
    "HDFCBANK.NS",
    "ICICIBANK.NS",
    "SBIN.NS",
    "ITC.NS",
    "LT.NS",
];

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_tickers))
}

/// GET /api/tickers
pub async fn list_tickers() -> Json<Vec<&'static str>> {
    info!("GET /api/tickers - Listing selectable tickers");
    Json(DEFAULT_TICKERS.to_vec())
}
