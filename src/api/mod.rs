pub mod alerts;
pub mod analysis;
pub mod health;

use crate::error::{AppError, Result};
use crate::types::Timeframe;
use crate::AppState;
use axum::Router;
use serde::{Deserialize, Serialize};

/// API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMeta {
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta { cached: false },
        }
    }
}

/// Parse an optional `timeframe` query value, defaulting to daily.
pub(crate) fn parse_timeframe(value: Option<&str>) -> Result<Timeframe> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(Timeframe::default()),
        Some(v) => Timeframe::from_str(v)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown timeframe: {}", v))),
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/analysis", analysis::router())
        .nest("/api/alerts", alerts::router())
}
