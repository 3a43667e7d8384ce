//! Market-wide scan and single-coin analysis.
//!
//! A scan fetches one candle series per (pair, timeframe) in the configured
//! universe, classifies each, and keeps the highest-scoring candidate. Fetches
//! run concurrently but are reduced in enumeration order, so ties always go to
//! the earliest pair and then the earliest timeframe.

use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::advisor::{analysis_frequency, TimeframeAdvisor};
use super::analyzer::SignalAnalyzer;
use super::combined::CombinedStrategy;
use super::duration::{holding_advice, holding_advice_with, DurationInputs};
use crate::error::{AppError, Result};
use crate::services::provider::MarketDataProvider;
use crate::types::{
    closes, Candidate, Candle, CoinAnalysis, HoldingAdvice, IndicatorSnapshot, ScanResult,
    Signal, SignalReading, StrategyReport, Timeframe, TradingPair,
};

/// Coins scanned when none are configured.
pub const DEFAULT_COINS: [&str; 20] = [
    "BTC", "ETH", "BNB", "ADA", "DOGE", "XRP", "DOT", "UNI", "BCH", "LTC", "LINK", "MATIC", "XLM",
    "ETC", "THETA", "VET", "TRX", "FIL", "XMR", "EOS",
];

pub const DEFAULT_QUOTE: &str = "USDT";

/// The scanned universe.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Base assets, in tie-break order.
    pub coins: Vec<String>,
    /// Timeframes, in tie-break order within a coin.
    pub timeframes: Vec<Timeframe>,
    pub quote: String,
    /// Maximum candle requests in flight.
    pub concurrency: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS.iter().map(|c| c.to_string()).collect(),
            timeframes: Timeframe::scan_defaults(),
            quote: DEFAULT_QUOTE.to_string(),
            concurrency: 8,
        }
    }
}

impl ScannerConfig {
    /// Uppercase symbols and fall back to defaults for anything left empty.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();

        let coins: Vec<String> = self
            .coins
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        let quote = self.quote.trim().to_uppercase();

        Self {
            coins: if coins.is_empty() { defaults.coins } else { coins },
            timeframes: if self.timeframes.is_empty() {
                defaults.timeframes
            } else {
                self.timeframes
            },
            quote: if quote.is_empty() { defaults.quote } else { quote },
            concurrency: self.concurrency.max(1),
        }
    }

    /// Every (pair, timeframe) combination in enumeration order.
    pub fn candidates(&self) -> Vec<(TradingPair, Timeframe)> {
        self.coins
            .iter()
            .flat_map(|coin| {
                let pair = TradingPair::new(coin, &self.quote);
                self.timeframes.iter().map(move |tf| (pair.clone(), *tf))
            })
            .collect()
    }
}

/// Scans a coin universe and produces a single recommendation.
pub struct MarketScanner {
    provider: Arc<dyn MarketDataProvider>,
    config: ScannerConfig,
    analyzer: SignalAnalyzer,
    combined: CombinedStrategy,
    advisor: TimeframeAdvisor,
}

impl MarketScanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: ScannerConfig) -> Self {
        Self {
            provider,
            config: config.normalized(),
            analyzer: SignalAnalyzer::default(),
            combined: CombinedStrategy::default(),
            advisor: TimeframeAdvisor::default(),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Run a full scan. Provider failures degrade to "No data" candidates.
    pub async fn scan(&self) -> ScanResult {
        let candidates = self.config.candidates();
        let total = candidates.len();
        debug!("Scanning {} candidates", total);

        let evaluated: Vec<Candidate> = stream::iter(candidates)
            .map(|(pair, timeframe)| self.evaluate(pair, timeframe))
            .buffered(self.config.concurrency)
            .collect()
            .await;

        let with_data = evaluated
            .iter()
            .filter(|c| c.reading.signal != Signal::NoData)
            .count();

        let best = evaluated
            .into_iter()
            .fold(None, |best: Option<Candidate>, candidate| match best {
                Some(current) if candidate.score() <= current.score() => Some(current),
                _ => Some(candidate),
            })
            .unwrap_or_else(|| self.placeholder());

        let advice = self.advice_for(&best.reading);
        let result = ScanResult::new(best, advice, total, with_data);

        info!(
            "Scan complete: {} on {} -> {} ({}/{} candidates with data)",
            result.best.pair, result.best.timeframe, result.best.reading.signal, with_data, total
        );
        result
    }

    /// Analyze a single user-supplied coin.
    pub async fn analyze_one(&self, coin: &str, timeframe: Timeframe) -> Result<CoinAnalysis> {
        let pair = self.listed_pair(coin).await?;
        let candidate = self.evaluate(pair, timeframe).await;
        let advice = self.advice_for(&candidate.reading);

        let recommendation = format!(
            "Recommendation for {}: {}. {}",
            candidate.pair.base, candidate.reading.signal, advice
        );

        Ok(CoinAnalysis {
            pair: candidate.pair,
            timeframe,
            reading: candidate.reading,
            advice,
            recommendation,
        })
    }

    /// Latest value of every indicator for one coin.
    pub async fn indicators(&self, coin: &str, timeframe: Timeframe) -> Result<IndicatorSnapshot> {
        let pair = self.listed_pair(coin).await?;
        let candles = self.fetch_strict(&pair, timeframe).await?;
        Ok(self.analyzer.snapshot(&candles))
    }

    /// Confluence strategy, suggested timeframe and re-analysis cadence for one coin.
    pub async fn strategy(&self, coin: &str, timeframe: Timeframe) -> Result<StrategyReport> {
        let pair = self.listed_pair(coin).await?;
        let candles = self.fetch_strict(&pair, timeframe).await?;
        let closes = closes(&candles);

        Ok(StrategyReport {
            combined: self.combined.evaluate(&closes),
            suggested_timeframe: self.advisor.suggest(&candles),
            frequency: analysis_frequency(&closes),
            candles: candles.len(),
            pair,
            timeframe,
        })
    }

    /// Holding advice for a reading, refined by its metrics when it has any.
    pub fn advice_for(&self, reading: &SignalReading) -> HoldingAdvice {
        match (reading.signal, reading.rsi, reading.macd_histogram) {
            (Signal::NoData, _, _) | (_, None, _) | (_, _, None) => holding_advice(reading.signal),
            (signal, Some(rsi), Some(macd)) => {
                let inputs = DurationInputs {
                    volatility: reading.volatility.unwrap_or(0.0),
                    signal_strength: self.analyzer.signal_strength(reading),
                    rsi,
                    macd,
                };
                holding_advice_with(signal, &inputs)
            }
        }
    }

    /// Normalize user input such as ` eth/usdt ` into a trading pair.
    pub fn normalize_pair(&self, input: &str) -> Result<TradingPair> {
        let symbol = input.trim().to_uppercase();
        let quote = self.config.quote.as_str();

        let base = symbol
            .strip_suffix(&format!("/{}", quote))
            .or_else(|| symbol.strip_suffix(quote).filter(|b| !b.is_empty()))
            .unwrap_or(&symbol);

        if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::InvalidSymbol(input.trim().to_string()));
        }

        Ok(TradingPair::new(base, quote))
    }

    async fn listed_pair(&self, input: &str) -> Result<TradingPair> {
        let pair = self.normalize_pair(input)?;
        let listed = self.provider.is_listed(&pair).await.map_err(|e| {
            AppError::ExternalApi(format!("Listing check for {} failed: {}", pair, e))
        })?;

        if !listed {
            return Err(AppError::InvalidSymbol(pair.to_string()));
        }
        Ok(pair)
    }

    async fn evaluate(&self, pair: TradingPair, timeframe: Timeframe) -> Candidate {
        let reading = match self.provider.fetch_candles(&pair, timeframe).await {
            Ok(candles) => self.analyzer.analyze(&candles),
            Err(e) => {
                warn!("Candle fetch for {} {} failed: {}", pair, timeframe, e);
                SignalReading::no_data()
            }
        };

        Candidate {
            pair,
            timeframe,
            reading,
        }
    }

    async fn fetch_strict(&self, pair: &TradingPair, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.provider
            .fetch_candles(pair, timeframe)
            .await
            .map_err(|e| AppError::ExternalApi(format!("Candle fetch for {} failed: {}", pair, e)))
    }

    fn placeholder(&self) -> Candidate {
        let coin = self
            .config
            .coins
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_COINS[0]);
        Candidate {
            pair: TradingPair::new(coin, &self.config.quote),
            timeframe: self.config.timeframes.first().copied().unwrap_or_default(),
            reading: SignalReading::no_data(),
        }
    }
}
