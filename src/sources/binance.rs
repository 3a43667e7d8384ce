use crate::services::{MarketDataProvider, PriceSource};
use crate::types::{Candle, Timeframe, TradingPair};
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// `exchangeInfo` response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
    status: String,
}

/// `ticker/price` response.
#[derive(Debug, Deserialize)]
struct TickerPrice {
    #[allow(dead_code)]
    symbol: String,
    price: String,
}

/// Binance spot REST client for klines, listings and last prices.
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    candle_limit: u32,
    /// Listing status by exchange symbol.
    listings: DashMap<String, bool>,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration, candle_limit: u32) -> Self {
        let client = Client::builder()
            .user_agent("Scout/1.0")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            candle_limit: candle_limit.clamp(1, 1000),
            listings: DashMap::new(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}/{}", self.base_url, path));
        match self.api_key {
            Some(ref key) => request.header("X-MBX-APIKEY", key),
            None => request,
        }
    }

    async fn error_for(response: Response) -> anyhow::Error {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        warn!("Binance API returned {}: {}", status, truncate(&text, 200));
        anyhow::anyhow!("Binance API error: {}", status)
    }
}

/// At most `max_chars` characters of `text`, cut on a char boundary.
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[async_trait]
impl MarketDataProvider for BinanceClient {
    async fn fetch_candles(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> anyhow::Result<Vec<Candle>> {
        let response = self
            .get("klines")
            .query(&[
                ("symbol", pair.symbol()),
                ("interval", timeframe.as_str().to_string()),
                ("limit", self.candle_limit.to_string()),
            ])
            .send()
            .await?;

        // Unknown symbols come back as 400
        if response.status() == StatusCode::BAD_REQUEST {
            debug!("Binance has no klines for {}", pair.symbol());
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let rows: Vec<Value> = response.json().await?;
        Ok(parse_klines(&rows))
    }

    async fn is_listed(&self, pair: &TradingPair) -> anyhow::Result<bool> {
        let symbol = pair.symbol();
        if let Some(listed) = self.listings.get(&symbol) {
            return Ok(*listed);
        }

        let response = self
            .get("exchangeInfo")
            .query(&[("symbol", symbol.as_str())])
            .send()
            .await?;

        let listed = if response.status() == StatusCode::BAD_REQUEST {
            false
        } else if response.status().is_success() {
            let info: ExchangeInfo = response.json().await?;
            info.symbols
                .iter()
                .any(|s| s.symbol == symbol && s.status == "TRADING")
        } else {
            return Err(Self::error_for(response).await);
        };

        self.listings.insert(symbol, listed);
        Ok(listed)
    }
}

#[async_trait]
impl PriceSource for BinanceClient {
    async fn last_price(&self, pair: &TradingPair) -> anyhow::Result<f64> {
        let response = self
            .get("ticker/price")
            .query(&[("symbol", pair.symbol())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let ticker: TickerPrice = response.json().await?;
        ticker
            .price
            .parse()
            .map_err(|e| anyhow::anyhow!("Bad price {:?} for {}: {}", ticker.price, pair, e))
    }
}

/// Parse kline rows, skipping any that are malformed.
///
/// Row layout: `[open_time, "open", "high", "low", "close", "volume", close_time, ...]`
pub fn parse_klines(rows: &[Value]) -> Vec<Candle> {
    rows.iter().filter_map(parse_kline).collect()
}

fn parse_kline(row: &Value) -> Option<Candle> {
    let fields = row.as_array()?;
    let number = |i: usize| -> Option<f64> {
        match fields.get(i)? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    };

    Some(Candle {
        time: fields.first()?.as_i64()?,
        open: number(1)?,
        high: number(2)?,
        low: number(3)?,
        close: number(4)?,
        volume: number(5)?,
    })
}
