use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Timeframe, TradingPair};

/// Trade classification for one (pair, timeframe) candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    /// No candles, too little history, or a failed fetch.
    NoData,
}

impl Signal {
    /// Comparison key used to rank candidates.
    pub fn score(&self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold | Signal::NoData => 0,
        }
    }

    /// Display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
            Signal::NoData => "No data",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signal plus the indicator readings that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReading {
    pub signal: Signal,
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
    /// Sample standard deviation of recent close-to-close returns.
    pub volatility: Option<f64>,
}

impl SignalReading {
    /// Reading for a candidate with nothing to analyze.
    pub fn no_data() -> Self {
        Self {
            signal: Signal::NoData,
            rsi: None,
            macd_histogram: None,
            volatility: None,
        }
    }
}

/// One scored (pair, timeframe) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub pair: TradingPair,
    pub timeframe: Timeframe,
    pub reading: SignalReading,
}

impl Candidate {
    pub fn score(&self) -> i8 {
        self.reading.signal.score()
    }
}

/// Advisory holding window derived from a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoldingAdvice {
    /// Keep the position for `hours` or until the next signal.
    HoldFor { hours: u32 },
    /// Exit the position within `hours`.
    SellWithin { hours: u32 },
    /// Re-evaluate the market after `hours`.
    ReassessIn { hours: u32 },
}

impl HoldingAdvice {
    pub fn hours(&self) -> u32 {
        match self {
            HoldingAdvice::HoldFor { hours }
            | HoldingAdvice::SellWithin { hours }
            | HoldingAdvice::ReassessIn { hours } => *hours,
        }
    }
}

impl fmt::Display for HoldingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldingAdvice::HoldFor { hours } => write!(
                f,
                "Suggested holding period: {} hours or until the next signal.",
                hours
            ),
            HoldingAdvice::SellWithin { hours } => {
                write!(f, "Consider selling within the next {} hours.", hours)
            }
            HoldingAdvice::ReassessIn { hours } => {
                write!(f, "Re-evaluate the market in {} hours.", hours)
            }
        }
    }
}

/// Outcome of one full market scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub best: Candidate,
    pub advice: HoldingAdvice,
    /// Number of (pair, timeframe) candidates evaluated.
    pub candidates: usize,
    /// Candidates that produced a Buy/Sell/Hold reading.
    pub with_data: usize,
    pub recommendation: String,
}

impl ScanResult {
    pub fn new(best: Candidate, advice: HoldingAdvice, candidates: usize, with_data: usize) -> Self {
        let recommendation = format!(
            "Best coin to trade: {} on the {} timeframe. Recommendation: {}. {}",
            best.pair.base, best.timeframe, best.reading.signal, advice
        );
        Self {
            best,
            advice,
            candidates,
            with_data,
            recommendation,
        }
    }

    pub fn signal(&self) -> Signal {
        self.best.reading.signal
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.recommendation)
    }
}

/// Single-coin analysis requested by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinAnalysis {
    pub pair: TradingPair,
    pub timeframe: Timeframe,
    pub reading: SignalReading,
    pub advice: HoldingAdvice,
    pub recommendation: String,
}

/// Latest value of every indicator for one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub close: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
}

/// Per-indicator opinion in the combined strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorVote {
    Buy,
    Sell,
    Neutral,
}

/// Result of the MACD + RSI + Bollinger confluence strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAnalysis {
    pub signal: Signal,
    pub macd: IndicatorVote,
    pub rsi: IndicatorVote,
    pub bollinger: IndicatorVote,
}

/// How often a market should be re-analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFrequency {
    Daily,
    Hourly,
    Minute,
}

/// Supplementary strategy view for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub pair: TradingPair,
    pub timeframe: Timeframe,
    /// `None` when the series is too short for the confluence strategy.
    pub combined: Option<CombinedAnalysis>,
    pub suggested_timeframe: Timeframe,
    pub frequency: Option<AnalysisFrequency>,
    pub candles: usize,
}
