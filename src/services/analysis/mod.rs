//! Signal analysis and market scanning.
//!
//! Turns candle series into Buy/Sell/Hold readings, ranks them across a coin
//! universe and attaches holding-duration advice to the winner.

pub mod advisor;
pub mod analyzer;
pub mod combined;
pub mod duration;
pub mod scanner;

#[cfg(test)]
pub(crate) mod fixtures;

pub use advisor::{analysis_frequency, TimeframeAdvisor};
pub use analyzer::SignalAnalyzer;
pub use combined::CombinedStrategy;
pub use duration::{holding_advice, holding_advice_with, DurationInputs};
pub use scanner::{MarketScanner, ScannerConfig, DEFAULT_COINS, DEFAULT_QUOTE};
