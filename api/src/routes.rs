use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

use shared::models::Timeframe;
use shared::{demo, FxClient};

use crate::error::ApiError;

/// Candle count served in demo mode, matching the upstream's fixed output
/// size.
const DEMO_COUNT: usize = 100;
const DEMO_BASE_PRICE: f64 = 1.1;

/// Demo random-walk scale per timeframe. Intraday demo data keeps the
/// generator's day-granularity stamps and only narrows the walk.
const DEMO_VOLATILITY_DAILY: f64 = 0.01;
const DEMO_VOLATILITY_H1: f64 = 0.004;
const DEMO_VOLATILITY_M15: f64 = 0.002;

pub struct AppState {
    demo_mode: bool,
    client: FxClient,
    started_at: Instant,
}

impl AppState {
    pub fn new(demo_mode: bool, client: FxClient) -> Self {
        Self {
            demo_mode,
            client,
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CandleQuery {
    #[serde(default)]
    pair: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/daily", get(daily))
        .route("/api/h1", get(h1))
        .route("/api/m15", get(m15))
        .route("/api/health", get(health))
        .route("/api/cache/clear", post(cache_clear))
        .with_state(state)
}

async fn daily(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<Value>, ApiError> {
    candles(&state, query, Timeframe::Daily, DEMO_VOLATILITY_DAILY).await
}

async fn h1(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<Value>, ApiError> {
    candles(&state, query, Timeframe::H1, DEMO_VOLATILITY_H1).await
}

async fn m15(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<Value>, ApiError> {
    candles(&state, query, Timeframe::M15, DEMO_VOLATILITY_M15).await
}

async fn candles(
    state: &AppState,
    query: CandleQuery,
    timeframe: Timeframe,
    demo_volatility: f64,
) -> Result<Json<Value>, ApiError> {
    let raw = query.pair.ok_or(ApiError::MissingPair)?;
    let pair = raw
        .parse()
        .map_err(|_| ApiError::InvalidPair(raw.clone()))?;

    if state.demo_mode {
        let candles = demo::generate(DEMO_COUNT, DEMO_BASE_PRICE, demo_volatility);
        return Ok(Json(json!({ "candles": candles })));
    }

    let candles = state.client.fetch_candles(&pair, timeframe).await?;
    Ok(Json(json!({ "candles": candles })))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "mode": if state.demo_mode { "demo" } else { "live" },
        "cache_size": state.client.cache().len(),
        "uptime": state.started_at.elapsed().as_secs(),
    }))
}

async fn cache_clear(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.client.cache().clear();
    tracing::info!("cache cleared by request");
    Json(json!({ "message": "cache cleared", "cache_size": 0 }))
}
