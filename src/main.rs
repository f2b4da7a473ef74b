mod app;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::external::mock::MockProvider;
use crate::external::price_provider::PriceProvider;
use crate::external::yahoofinance::YahooFinanceProvider;
use crate::logging::LoggingConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())?;

    // Select price provider based on PRICE_PROVIDER env var (defaults to yahoo)
    let provider_name =
        std::env::var("PRICE_PROVIDER").unwrap_or_else(|_| "yahoo".to_string());

    let provider: Arc<dyn PriceProvider> = match provider_name.to_lowercase().as_str() {
        "yahoo" => {
            tracing::info!("📊 Using price provider: Yahoo Finance");
            Arc::new(YahooFinanceProvider::new())
        }
        "mock" => {
            tracing::info!("📊 Using price provider: mock random walk (no network)");
            Arc::new(MockProvider)
        }
        other => {
            panic!(
                "Invalid PRICE_PROVIDER: {}. Must be 'yahoo' or 'mock'",
                other
            );
        }
    };

    let state = AppState {
        price_provider: provider,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Stockcompare backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
