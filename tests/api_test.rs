//! HTTP API tests against an in-process router.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{oversold_reversal, universe, Fallback, StubProvider};
use scout::config::Config;
use scout::services::{InMemoryAlertStore, MarketScanner};
use scout::types::Timeframe;
use scout::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        binance_api_url: "http://127.0.0.1:9".to_string(),
        binance_api_key: None,
        coins: vec!["BTC".to_string(), "ETH".to_string()],
        timeframes: vec![Timeframe::OneHour, Timeframe::OneDay],
        quote_asset: "USDT".to_string(),
        candle_limit: 100,
        scan_concurrency: 2,
        request_timeout: Duration::from_secs(1),
        alert_poll_interval: Duration::from_secs(60),
    }
}

fn app_with(provider: StubProvider) -> axum::Router {
    let config = test_config();
    let scanner = MarketScanner::new(
        Arc::new(provider),
        universe(&["BTC", "ETH"], &[Timeframe::OneHour, Timeframe::OneDay]),
    );
    scout::app(AppState {
        config: Arc::new(config),
        scanner: Arc::new(scanner),
        alerts: Arc::new(InMemoryAlertStore::new()),
    })
}

fn app() -> axum::Router {
    app_with(
        StubProvider::new(Fallback::Flat)
            .with("ETH", Timeframe::OneDay, oversold_reversal())
            .unlisted("NOPE"),
    )
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ============================================================================
// Health and Analysis
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["coins"], 2);
    assert_eq!(body["quote"], "USDT");
}

#[tokio::test]
async fn test_scan_endpoint() {
    let (status, body) = send(&app(), Method::GET, "/api/analysis/scan", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["best"]["pair"]["base"], "ETH");
    assert_eq!(data["best"]["timeframe"], "1d");
    assert_eq!(data["best"]["reading"]["signal"], "buy");
    assert_eq!(data["candidates"], 4);
    assert_eq!(body["meta"]["cached"], false);
    assert!(data["recommendation"]
        .as_str()
        .unwrap()
        .starts_with("Best coin to trade: ETH on the 1d timeframe. Recommendation: Buy."));
}

#[tokio::test]
async fn test_coin_endpoint_defaults_to_daily() {
    let (status, body) = send(&app(), Method::GET, "/api/analysis/coin/eth", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timeframe"], "1d");
    assert_eq!(body["data"]["reading"]["signal"], "buy");
}

#[tokio::test]
async fn test_coin_endpoint_with_timeframe() {
    let (status, body) = send(&app(), Method::GET, "/api/analysis/coin/BTC?timeframe=1h", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timeframe"], "1h");
    assert_eq!(body["data"]["reading"]["signal"], "hold");
    assert_eq!(body["data"]["advice"]["kind"], "reassess_in");
}

#[tokio::test]
async fn test_coin_endpoint_errors() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/analysis/coin/NOPE", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(&app, Method::GET, "/api/analysis/coin/BTC?timeframe=2h", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let down = app_with(StubProvider::new(Fallback::Fail));
    let (status, _) = send(&down, Method::GET, "/api/analysis/coin/BTC", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_indicators_and_strategy() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/analysis/coin/BTC/indicators", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rsi"], 50.0);
    assert_eq!(body["data"]["close"], 100.0);

    let (status, body) = send(&app, Method::GET, "/api/analysis/coin/BTC/strategy?timeframe=4h", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["candles"], 60);
    assert_eq!(body["data"]["combined"]["signal"], "hold");
    assert_eq!(body["data"]["frequency"], "daily");
}

// ============================================================================
// Alerts
// ============================================================================

#[tokio::test]
async fn test_alert_lifecycle() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/alerts/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/alerts/u1/activate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/alerts/u1",
        Some(json!({"coins": ["btc", "eth"], "prices": [50000.0, 3000.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["alerts"][0]["coin"], "BTC");
    assert_eq!(body["data"]["active"], false);

    let (status, body) = send(&app, Method::POST, "/api/alerts/u1/activate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active"], true);

    let (_, body) = send(&app, Method::GET, "/api/alerts/u1", None).await;
    assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::POST, "/api/alerts/u1/deactivate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active"], false);

    let (status, _) = send(&app, Method::DELETE, "/api/alerts/u1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/alerts/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_alert_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/alerts/u2",
        Some(json!({"coins": ["btc"], "prices": [1.0, 2.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prices"));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/alerts/u2",
        Some(json!({"coins": ["btc"], "prices": [0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
