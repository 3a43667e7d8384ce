use scout::config::Config;
use scout::services::{AlertMonitor, InMemoryAlertStore, MarketScanner};
use scout::sources::BinanceClient;
use scout::AppState;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Scout server on {}:{}", config.host, config.port);

    let binance = Arc::new(BinanceClient::new(
        &config.binance_api_url,
        config.binance_api_key.clone(),
        config.request_timeout,
        config.candle_limit,
    ));

    let scanner_config = config.scanner();
    info!(
        "Scanning {} coins against {} on {} timeframes",
        scanner_config.coins.len(),
        scanner_config.quote,
        scanner_config.timeframes.len()
    );
    let scanner = Arc::new(MarketScanner::new(binance.clone(), scanner_config));

    // Start alert polling
    let alert_store = Arc::new(InMemoryAlertStore::new());
    let monitor = Arc::new(AlertMonitor::new(
        alert_store.clone(),
        binance.clone(),
        &config.quote_asset,
        config.alert_poll_interval,
    ));
    {
        let mut triggers = monitor.subscribe();
        tokio::spawn(async move {
            loop {
                match triggers.recv().await {
                    Ok(trigger) => info!("Notify {}: {}", trigger.user_id, trigger.message()),
                    Err(RecvError::Lagged(skipped)) => warn!("Dropped {} alert notifications", skipped),
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
    tokio::spawn(monitor.run());

    let state = AppState {
        config: config.clone(),
        scanner,
        alerts: alert_store,
    };

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Scout server listening on {}", addr);

    axum::serve(listener, scout::app(state)).await?;

    Ok(())
}
