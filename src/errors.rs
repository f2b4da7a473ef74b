use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;

/// Failures produced by the analytics core itself.
///
/// These are deterministic functions of already-fetched data, so none of
/// them is ever retried; they propagate to the request boundary as-is.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("misaligned series: {0}")]
    MisalignedSeries(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no data returned for ticker {0}")]
    NoDataReturned(String),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited by external provider")]
    RateLimited,

    #[error("External error: {0}")]
    External(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NoDataReturned(ticker) => (
                StatusCode::NOT_FOUND,
                format!("No data returned for ticker {}", ticker),
            )
                .into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Analytics(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
            }
            AppError::RateLimited => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, "Rate limited").into_response()
            }
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
