//! Market scan and per-coin analysis endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::{parse_timeframe, ApiResponse};
use crate::error::Result;
use crate::types::{CoinAnalysis, IndicatorSnapshot, ScanResult, StrategyReport};
use crate::AppState;

/// Query parameters for per-coin endpoints.
#[derive(Debug, Deserialize)]
pub struct TimeframeQuery {
    /// Candle interval such as `1h` or `1d`. Defaults to `1d`.
    pub timeframe: Option<String>,
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scan", get(scan))
        .route("/coin/:coin", get(analyze_coin))
        .route("/coin/:coin/indicators", get(coin_indicators))
        .route("/coin/:coin/strategy", get(coin_strategy))
}

/// Scan the configured universe and return the best candidate.
async fn scan(State(state): State<AppState>) -> Json<ApiResponse<ScanResult>> {
    Json(ApiResponse::new(state.scanner.scan().await))
}

async fn analyze_coin(
    State(state): State<AppState>,
    Path(coin): Path<String>,
    Query(query): Query<TimeframeQuery>,
) -> Result<Json<ApiResponse<CoinAnalysis>>> {
    let timeframe = parse_timeframe(query.timeframe.as_deref())?;
    let analysis = state.scanner.analyze_one(&coin, timeframe).await?;
    Ok(Json(ApiResponse::new(analysis)))
}

async fn coin_indicators(
    State(state): State<AppState>,
    Path(coin): Path<String>,
    Query(query): Query<TimeframeQuery>,
) -> Result<Json<ApiResponse<IndicatorSnapshot>>> {
    let timeframe = parse_timeframe(query.timeframe.as_deref())?;
    let snapshot = state.scanner.indicators(&coin, timeframe).await?;
    Ok(Json(ApiResponse::new(snapshot)))
}

async fn coin_strategy(
    State(state): State<AppState>,
    Path(coin): Path<String>,
    Query(query): Query<TimeframeQuery>,
) -> Result<Json<ApiResponse<StrategyReport>>> {
    let timeframe = parse_timeframe(query.timeframe.as_deref())?;
    let report = state.scanner.strategy(&coin, timeframe).await?;
    Ok(Json(ApiResponse::new(report)))
}
