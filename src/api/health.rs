use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Size of the scanned universe.
    coins: usize,
    timeframes: usize,
    quote: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let universe = state.scanner.config();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        coins: universe.coins.len(),
        timeframes: universe.timeframes.len(),
        quote: universe.quote.clone(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
