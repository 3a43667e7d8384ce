//! MACD + RSI + Bollinger confluence strategy.

use crate::services::indicators::{rsi_sma, BollingerBands, Macd};
use crate::types::{CombinedAnalysis, IndicatorVote, Signal};

/// Buys only when all three indicators agree on an oversold dip and sells
/// only when all three agree on an overbought spike.
#[derive(Debug, Clone, Copy)]
pub struct CombinedStrategy {
    macd: Macd,
    bands: BollingerBands,
    rsi_window: usize,
    oversold: f64,
    overbought: f64,
    macd_threshold: f64,
}

impl Default for CombinedStrategy {
    fn default() -> Self {
        Self {
            macd: Macd::default(),
            bands: BollingerBands::default(),
            rsi_window: 14,
            oversold: 30.0,
            overbought: 70.0,
            macd_threshold: 0.0,
        }
    }
}

impl CombinedStrategy {
    pub fn with_macd_threshold(mut self, threshold: f64) -> Self {
        self.macd_threshold = threshold;
        self
    }

    pub fn min_periods(&self) -> usize {
        self.bands.period().max(self.macd.min_periods()).max(self.rsi_window)
    }

    /// Evaluate the latest bar. `None` if the series is too short.
    pub fn evaluate(&self, closes: &[f64]) -> Option<CombinedAnalysis> {
        if closes.len() < self.min_periods() {
            return None;
        }

        let lines = self.macd.lines(closes)?;
        let macd = *lines.macd.last()?;
        let signal_line = *lines.signal.last()?;
        let rsi = rsi_sma(closes, self.rsi_window)?;
        let (upper, _, lower) = self.bands.calculate(closes).latest()?;
        let close = *closes.last()?;

        let macd_bullish = macd > signal_line + self.macd_threshold;
        let macd_bearish = macd < signal_line - self.macd_threshold;

        let signal = if macd_bullish && rsi < self.oversold && close < lower {
            Signal::Buy
        } else if macd_bearish && rsi > self.overbought && close > upper {
            Signal::Sell
        } else {
            Signal::Hold
        };

        Some(CombinedAnalysis {
            signal,
            macd: if macd_bullish {
                IndicatorVote::Buy
            } else {
                IndicatorVote::Sell
            },
            rsi: vote(rsi < self.oversold, rsi > self.overbought),
            bollinger: vote(close < lower, close > upper),
        })
    }
}

fn vote(buy: bool, sell: bool) -> IndicatorVote {
    if buy {
        IndicatorVote::Buy
    } else if sell {
        IndicatorVote::Sell
    } else {
        IndicatorVote::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data() {
        let closes: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert!(CombinedStrategy::default().evaluate(&closes).is_none());
    }

    #[test]
    fn test_flat_series_is_neutral_hold() {
        let result = CombinedStrategy::default().evaluate(&[100.0; 40]).unwrap();
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.rsi, IndicatorVote::Neutral);
        assert_eq!(result.bollinger, IndicatorVote::Neutral);
        // MACD equals its signal line on a flat series, which is not bullish
        assert_eq!(result.macd, IndicatorVote::Sell);
    }

    #[test]
    fn test_capitulation_votes_buy() {
        // Slow drift, a four-bar crash, then a small bounce off the low
        let mut closes: Vec<f64> = (0..45).map(|i| 200.0 - i as f64 * 0.1).collect();
        let mut last = *closes.last().unwrap();
        for _ in 0..4 {
            last -= 10.0;
            closes.push(last);
        }
        closes.push(last + 0.5);

        let result = CombinedStrategy::default().evaluate(&closes).unwrap();
        assert_eq!(result.rsi, IndicatorVote::Buy);
        assert_eq!(result.bollinger, IndicatorVote::Buy);
    }

    #[test]
    fn test_uptrend_votes() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = CombinedStrategy::default().evaluate(&closes).unwrap();
        assert_eq!(result.macd, IndicatorVote::Buy);
        assert_eq!(result.rsi, IndicatorVote::Sell);
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_macd_threshold_filters_weak_crosses() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = CombinedStrategy::default()
            .with_macd_threshold(1_000.0)
            .evaluate(&closes)
            .unwrap();
        assert_eq!(result.macd, IndicatorVote::Sell);
    }
}
