//! Stochastic Oscillator indicator.

use crate::types::Candle;

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
/// %D = SMA of %K over `d_period`
#[derive(Debug, Clone, Copy)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// Aligned %K and %D series; `None` until their windows are full.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticLines {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self { k_period, d_period }
    }

    pub fn calculate(&self, candles: &[Candle]) -> StochasticLines {
        let k: Vec<Option<f64>> = (0..candles.len())
            .map(|i| {
                if self.k_period == 0 || i + 1 < self.k_period {
                    return None;
                }
                let window = &candles[(i + 1 - self.k_period)..=i];

                let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                let highest_high = window
                    .iter()
                    .map(|c| c.high)
                    .fold(f64::NEG_INFINITY, f64::max);

                // A flat range has no position within it; read it as mid-range.
                if highest_high > lowest_low {
                    Some((candles[i].close - lowest_low) / (highest_high - lowest_low) * 100.0)
                } else {
                    Some(50.0)
                }
            })
            .collect();

        let d = (0..k.len())
            .map(|i| {
                if self.d_period == 0 || i + 1 < self.d_period {
                    return None;
                }
                let window = &k[(i + 1 - self.d_period)..=i];
                let sum = window.iter().copied().sum::<Option<f64>>()?;
                Some(sum / self.d_period as f64)
            })
            .collect();

        StochasticLines { k, d }
    }
}
