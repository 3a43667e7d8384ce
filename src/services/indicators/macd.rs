//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::ema;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Full MACD series, aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn slow_period(&self) -> usize {
        self.slow_period
    }

    /// Minimum number of closes before the slow EMA covers a full window.
    pub fn min_periods(&self) -> usize {
        self.slow_period.max(self.fast_period).max(1)
    }

    /// Compute all three MACD lines.
    pub fn lines(&self, closes: &[f64]) -> Option<MacdLines> {
        if closes.len() < self.min_periods() {
            return None;
        }

        let fast = ema(closes, self.fast_period);
        let slow = ema(closes, self.slow_period);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(&macd, self.signal_period);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Some(MacdLines {
            macd,
            signal,
            histogram,
        })
    }

    /// Latest histogram value.
    pub fn histogram(&self, closes: &[f64]) -> Option<f64> {
        self.lines(closes)?.histogram.last().copied()
    }
}
