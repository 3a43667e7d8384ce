//! Synthetic candle series and a scripted provider for analysis tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::services::provider::MarketDataProvider;
use crate::types::{Candle, Timeframe, TradingPair};

pub fn candles_from(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: i as i64 * 60_000,
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000.0,
        })
        .collect()
}

pub fn flat_series(count: usize, price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| Candle::flat(i as i64 * 60_000, price, 1000.0))
        .collect()
}

/// Steep decline that decelerates: RSI pinned at 0, MACD histogram turning up.
pub fn oversold_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..=40).map(|i| 200.0 - i as f64 * 2.0).collect();
    let floor = *closes.last().unwrap();
    closes.extend((1..=20).map(|i| floor - i as f64 * 0.1));
    candles_from(&closes)
}

/// Steep rally that decelerates: RSI pinned at 100, MACD histogram turning down.
pub fn overbought_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..=40).map(|i| 100.0 + i as f64 * 2.0).collect();
    let top = *closes.last().unwrap();
    closes.extend((1..=20).map(|i| top + i as f64 * 0.1));
    candles_from(&closes)
}

/// Provider returning scripted series, flat candles by default.
#[derive(Default)]
pub struct StubProvider {
    pub series: HashMap<(String, Timeframe), Vec<Candle>>,
    pub failing: bool,
    pub unlisted: HashSet<String>,
}

impl StubProvider {
    pub fn with(mut self, base: &str, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.series.insert((base.to_string(), timeframe), candles);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_candles(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> anyhow::Result<Vec<Candle>> {
        if self.failing {
            anyhow::bail!("provider unavailable");
        }
        Ok(self
            .series
            .get(&(pair.base.clone(), timeframe))
            .cloned()
            .unwrap_or_else(|| flat_series(60, 100.0)))
    }

    async fn is_listed(&self, pair: &TradingPair) -> anyhow::Result<bool> {
        if self.failing {
            anyhow::bail!("provider unavailable");
        }
        Ok(!self.unlisted.contains(&pair.base))
    }
}
