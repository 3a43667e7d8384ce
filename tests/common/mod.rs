//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use scout::services::{MarketDataProvider, MarketScanner, ScannerConfig};
use scout::types::{Candle, Timeframe, TradingPair};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

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
    candles_from(&vec![price; count])
}

/// Falling hard, then decelerating: RSI at 0 with the MACD histogram turning up.
pub fn oversold_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..=40).map(|i| 200.0 - i as f64 * 2.0).collect();
    let floor = *closes.last().unwrap();
    closes.extend((1..=20).map(|i| floor - i as f64 * 0.1));
    candles_from(&closes)
}

/// Rallying hard, then decelerating: RSI at 100 with the MACD histogram turning down.
pub fn overbought_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..=40).map(|i| 100.0 + i as f64 * 2.0).collect();
    let top = *closes.last().unwrap();
    closes.extend((1..=20).map(|i| top + i as f64 * 0.1));
    candles_from(&closes)
}

/// How the stub behaves when a series was not scripted.
#[derive(Clone, Copy, PartialEq)]
pub enum Fallback {
    Flat,
    Empty,
    Fail,
}

/// Market data provider serving scripted series.
pub struct StubProvider {
    series: HashMap<(String, Timeframe), Vec<Candle>>,
    fallback: Fallback,
    unlisted: HashSet<String>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(fallback: Fallback) -> Self {
        Self {
            series: HashMap::new(),
            fallback,
            unlisted: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, base: &str, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.series.insert((base.to_string(), timeframe), candles);
        self
    }

    pub fn unlisted(mut self, base: &str) -> Self {
        self.unlisted.insert(base.to_string());
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(candles) = self.series.get(&(pair.base.clone(), timeframe)) {
            return Ok(candles.clone());
        }
        match self.fallback {
            Fallback::Flat => Ok(flat_series(60, 100.0)),
            Fallback::Empty => Ok(Vec::new()),
            Fallback::Fail => anyhow::bail!("connection refused"),
        }
    }

    async fn is_listed(&self, pair: &TradingPair) -> anyhow::Result<bool> {
        if self.fallback == Fallback::Fail {
            anyhow::bail!("connection refused");
        }
        Ok(!self.unlisted.contains(&pair.base))
    }
}

pub fn universe(coins: &[&str], timeframes: &[Timeframe]) -> ScannerConfig {
    ScannerConfig {
        coins: coins.iter().map(|c| c.to_string()).collect(),
        timeframes: timeframes.to_vec(),
        quote: "USDT".to_string(),
        concurrency: 4,
    }
}

pub fn scanner(provider: StubProvider, config: ScannerConfig) -> MarketScanner {
    MarketScanner::new(Arc::new(provider), config)
}
