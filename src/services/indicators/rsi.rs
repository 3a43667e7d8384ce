//! Relative Strength Index (RSI) indicator.

use super::ema::ema;
use super::sma::mean;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Minimum number of closes for a meaningful reading.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// Latest EMA-smoothed RSI, `None` with too little history.
    pub fn latest(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.min_periods() {
            return None;
        }
        rsi(closes, self.period)
    }
}

/// Latest RSI using EMA-smoothed gains and losses (`span = window`).
///
/// The first difference is taken as zero. Returns `None` for fewer than two
/// closes.
pub fn rsi(closes: &[f64], window: usize) -> Option<f64> {
    if closes.len() < 2 {
        return None;
    }

    let (gains, losses) = split_changes(closes);
    let avg_gain = *ema(&gains, window).last()?;
    let avg_loss = *ema(&losses, window).last()?;

    Some(from_averages(avg_gain, avg_loss))
}

/// Latest RSI using simple trailing means of gains and losses.
///
/// Needs `window + 1` closes so every averaged change is a real one.
pub fn rsi_sma(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() <= window {
        return None;
    }

    let (gains, losses) = split_changes(closes);
    let start = gains.len() - window;
    let avg_gain = mean(&gains[start..])?;
    let avg_loss = mean(&losses[start..])?;

    Some(from_averages(avg_gain, avg_loss))
}

/// Gains and absolute losses per step, aligned with `closes` (index 0 is zero).
fn split_changes(closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);

    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    (gains, losses)
}

/// RSI from average gain/loss. No losses saturates at 100; a market with
/// neither gains nor losses reads neutral 50.
fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        if avg_gain <= 0.0 {
            return 50.0;
        }
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
