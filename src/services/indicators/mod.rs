//! Technical indicator implementations.
//!
//! Pure numeric transforms over oldest-to-newest series. Rolling outputs are
//! aligned with their input and hold `None` until the trailing window is full.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use bollinger::{Bands, BollingerBands};
pub use ema::ema;
pub use macd::{Macd, MacdLines};
pub use rsi::{rsi, rsi_sma, Rsi};
pub use sma::{mean, returns, rolling_std, sma, std_dev};
pub use stochastic::{Stochastic, StochasticLines};

/// Last value of an aligned rolling series, if that position is valid.
pub fn last_valid(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
