//! Price alert management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::build_alerts;
use crate::types::UserAlerts;
use crate::AppState;

/// Body for replacing a user's alerts. `coins[i]` fires at `prices[i]`.
#[derive(Debug, Deserialize)]
pub struct SetAlertsRequest {
    pub coins: Vec<String>,
    pub prices: Vec<f64>,
}

/// Create the alerts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user", get(get_alerts).put(set_alerts).delete(delete_alerts))
        .route("/:user/activate", post(activate))
        .route("/:user/deactivate", post(deactivate))
}

async fn get_alerts(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<ApiResponse<UserAlerts>>> {
    let alerts = state
        .alerts
        .get(&user)
        .ok_or_else(|| AppError::NotFound(format!("No alerts for user {}", user)))?;
    Ok(Json(ApiResponse::new(alerts)))
}

async fn set_alerts(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(body): Json<SetAlertsRequest>,
) -> Result<Json<ApiResponse<UserAlerts>>> {
    let alerts = build_alerts(&body.coins, &body.prices)?;
    info!("User {} set {} price alerts", user, alerts.len());
    Ok(Json(ApiResponse::new(state.alerts.set(&user, alerts))))
}

async fn delete_alerts(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode> {
    if state.alerts.remove(&user) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No alerts for user {}", user)))
    }
}

async fn activate(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<ApiResponse<UserAlerts>>> {
    toggle(&state, &user, true)
}

async fn deactivate(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<ApiResponse<UserAlerts>>> {
    toggle(&state, &user, false)
}

fn toggle(state: &AppState, user: &str, active: bool) -> Result<Json<ApiResponse<UserAlerts>>> {
    if !state.alerts.set_active(user, active) {
        return Err(AppError::NotFound(format!(
            "User {} has no alerts; set some first",
            user
        )));
    }
    let alerts = state
        .alerts
        .get(user)
        .ok_or_else(|| AppError::NotFound(format!("No alerts for user {}", user)))?;
    Ok(Json(ApiResponse::new(alerts)))
}
