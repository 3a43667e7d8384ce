//! Per-candidate signal classification from RSI and MACD.

use crate::services::indicators::{
    last_valid, returns, std_dev, BollingerBands, Macd, Rsi, Stochastic,
};
use crate::types::{closes, Candle, IndicatorSnapshot, Signal, SignalReading};
use tracing::debug;

/// Number of trailing returns used for the volatility reading.
const VOLATILITY_WINDOW: usize = 20;

/// Classifies a candle series as Buy, Sell or Hold.
///
/// - RSI below `oversold` with a positive MACD histogram: Buy
/// - RSI above `overbought` with a negative MACD histogram: Sell
/// - anything else: Hold
#[derive(Debug, Clone, Copy)]
pub struct SignalAnalyzer {
    rsi: Rsi,
    macd: Macd,
    bands: BollingerBands,
    stochastic: Stochastic,
    oversold: f64,
    overbought: f64,
}

impl Default for SignalAnalyzer {
    fn default() -> Self {
        Self {
            rsi: Rsi::default(),
            macd: Macd::default(),
            bands: BollingerBands::default(),
            stochastic: Stochastic::default(),
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl SignalAnalyzer {
    pub fn new(rsi: Rsi, macd: Macd) -> Self {
        Self {
            rsi,
            macd,
            ..Self::default()
        }
    }

    pub fn oversold(&self) -> f64 {
        self.oversold
    }

    pub fn overbought(&self) -> f64 {
        self.overbought
    }

    /// Shortest series that yields a reading: the longest indicator window.
    pub fn min_candles(&self) -> usize {
        self.rsi.period().max(self.macd.slow_period())
    }

    /// Derive the signal for one candle series.
    pub fn analyze(&self, candles: &[Candle]) -> SignalReading {
        if candles.len() < self.min_candles() {
            debug!(
                "Only {} candles, need {} - treating as no data",
                candles.len(),
                self.min_candles()
            );
            return SignalReading::no_data();
        }

        let closes = closes(candles);
        let (Some(rsi), Some(histogram)) = (self.rsi.latest(&closes), self.macd.histogram(&closes))
        else {
            return SignalReading::no_data();
        };

        if !rsi.is_finite() || !histogram.is_finite() {
            debug!("Non-finite indicator values (rsi={}, macd={})", rsi, histogram);
            return SignalReading::no_data();
        }

        SignalReading {
            signal: self.classify(rsi, histogram),
            rsi: Some(rsi),
            macd_histogram: Some(histogram),
            volatility: recent_volatility(&closes),
        }
    }

    /// Apply the RSI/MACD decision table.
    pub fn classify(&self, rsi: f64, macd_histogram: f64) -> Signal {
        if rsi < self.oversold && macd_histogram > 0.0 {
            Signal::Buy
        } else if rsi > self.overbought && macd_histogram < 0.0 {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    /// How far RSI sits past the threshold that triggered the signal, in [0, 1].
    pub fn signal_strength(&self, reading: &SignalReading) -> f64 {
        let Some(rsi) = reading.rsi else {
            return 0.0;
        };
        let strength = match reading.signal {
            Signal::Buy => (self.oversold - rsi) / self.oversold,
            Signal::Sell => (rsi - self.overbought) / (100.0 - self.overbought),
            Signal::Hold | Signal::NoData => 0.0,
        };
        strength.clamp(0.0, 1.0)
    }

    /// Latest value of every indicator in the library.
    pub fn snapshot(&self, candles: &[Candle]) -> IndicatorSnapshot {
        let closes = closes(candles);
        let bands = self.bands.calculate(&closes);
        let stochastic = self.stochastic.calculate(candles);

        IndicatorSnapshot {
            close: closes.last().copied(),
            rsi: self.rsi.latest(&closes),
            macd_histogram: self.macd.histogram(&closes),
            bollinger_upper: last_valid(&bands.upper),
            bollinger_middle: last_valid(&bands.middle),
            bollinger_lower: last_valid(&bands.lower),
            stochastic_k: last_valid(&stochastic.k),
            stochastic_d: last_valid(&stochastic.d),
        }
    }
}

/// Sample standard deviation of the last returns.
fn recent_volatility(closes: &[f64]) -> Option<f64> {
    let changes = returns(closes);
    let start = changes.len().saturating_sub(VOLATILITY_WINDOW);
    std_dev(&changes[start..])
}
