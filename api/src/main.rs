use anyhow::Result;
use shared::providers::{AlphaVantage, Provider, TwelveData};
use shared::{CandleCache, Config, FxClient};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod routes;

use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting FX candle proxy...");

    let config = Config::from_env()?;

    let provider: Box<dyn Provider> = match config.provider.as_str() {
        "twelve_data" => Box::new(TwelveData::new(&config.api_key)),
        _ => Box::new(AlphaVantage::new(&config.api_key)),
    };
    info!("Using provider: {}", provider.name());
    if config.demo_mode {
        info!("Demo mode enabled, upstream calls are disabled");
    }

    let cache = CandleCache::new(Duration::from_millis(config.cache_ttl_ms));
    let client = FxClient::new(provider, cache);
    let state = Arc::new(AppState::new(config.demo_mode, client));

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
