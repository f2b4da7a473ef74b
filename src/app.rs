use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{compare, health, tickers};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // The dashboard frontend is served from a different origin, so all
    // routes must be readable cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/tickers", tickers::router())
        .nest("/api/compare", compare::router())
        .layer(cors)
        .with_state(state)
}
