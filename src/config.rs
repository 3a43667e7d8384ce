use std::env;
use std::time::Duration;
use tracing::warn;

use crate::services::analysis::{ScannerConfig, DEFAULT_COINS, DEFAULT_QUOTE};
use crate::sources::binance::BINANCE_API_URL;
use crate::types::Timeframe;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Binance REST base URL.
    pub binance_api_url: String,
    /// Binance API key (optional, public endpoints work without).
    pub binance_api_key: Option<String>,
    /// Base assets scanned, in tie-break order.
    pub coins: Vec<String>,
    /// Timeframes scanned, in tie-break order.
    pub timeframes: Vec<Timeframe>,
    /// Quote asset every pair is priced in.
    pub quote_asset: String,
    /// Candles requested per series.
    pub candle_limit: u32,
    /// Maximum concurrent candle requests during a scan.
    pub scan_concurrency: usize,
    /// Per-request timeout for exchange calls.
    pub request_timeout: Duration,
    /// Interval between alert price checks.
    pub alert_poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            binance_api_url: env::var("BINANCE_API_URL")
                .unwrap_or_else(|_| BINANCE_API_URL.to_string()),
            binance_api_key: env::var("BINANCE_API_KEY").ok().filter(|k| !k.is_empty()),
            coins: env::var("SCAN_COINS")
                .ok()
                .map(|v| parse_coins(&v))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COINS.iter().map(|c| c.to_string()).collect()),
            timeframes: env::var("SCAN_TIMEFRAMES")
                .ok()
                .map(|v| parse_timeframes(&v))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(Timeframe::scan_defaults),
            quote_asset: env::var("QUOTE_ASSET")
                .ok()
                .map(|q| q.trim().to_uppercase())
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| DEFAULT_QUOTE.to_string()),
            candle_limit: env::var("CANDLE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            scan_concurrency: env::var("SCAN_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            request_timeout: duration_secs(env::var("REQUEST_TIMEOUT_SECS").ok(), 10),
            alert_poll_interval: duration_secs(env::var("ALERT_POLL_SECS").ok(), 300),
        }
    }

    /// Scanner universe derived from this configuration.
    pub fn scanner(&self) -> ScannerConfig {
        ScannerConfig {
            coins: self.coins.clone(),
            timeframes: self.timeframes.clone(),
            quote: self.quote_asset.clone(),
            concurrency: self.scan_concurrency,
        }
        .normalized()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Whole seconds from an env value, never below one second.
pub fn duration_secs(value: Option<String>, default: u64) -> Duration {
    let secs = value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs.max(1))
}

/// Parse a comma-separated coin list, uppercasing and dropping blanks.
pub fn parse_coins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Parse a comma-separated timeframe list, skipping unknown entries.
pub fn parse_timeframes(value: &str) -> Vec<Timeframe> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| {
            let parsed = Timeframe::from_str(t);
            if parsed.is_none() {
                warn!("Ignoring unknown timeframe {:?} in SCAN_TIMEFRAMES", t);
            }
            parsed
        })
        .collect()
}
