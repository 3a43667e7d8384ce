//! Bollinger Bands indicator.

use super::sma::{rolling_std, sma};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
#[derive(Debug, Clone, Copy)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// Aligned band series; `None` until the window is full.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

impl Bands {
    /// Latest (upper, middle, lower), if the last position is valid.
    pub fn latest(&self) -> Option<(f64, f64, f64)> {
        let upper = self.upper.last().copied().flatten()?;
        let middle = self.middle.last().copied().flatten()?;
        let lower = self.lower.last().copied().flatten()?;
        Some((upper, middle, lower))
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn calculate(&self, closes: &[f64]) -> Bands {
        let middle = sma(closes, self.period);
        let std = rolling_std(closes, self.period);

        let (upper, lower) = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => (
                    Some(m + self.std_dev_multiplier * s),
                    Some(m - self.std_dev_multiplier * s),
                ),
                _ => (None, None),
            })
            .unzip();

        Bands {
            upper,
            middle,
            lower,
        }
    }
}
