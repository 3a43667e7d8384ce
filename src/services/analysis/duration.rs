//! Holding-duration advice for a recommendation.

use crate::types::{HoldingAdvice, Signal};

/// Return volatility above which a Buy is held only briefly.
const HIGH_VOLATILITY: f64 = 0.05;
/// Signal strength above which a Buy is held only briefly.
const STRONG_SIGNAL: f64 = 0.8;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Metrics of the winning candidate that refine the advice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationInputs {
    pub volatility: f64,
    pub signal_strength: f64,
    pub rsi: f64,
    pub macd: f64,
}

/// Advice from the signal alone.
pub fn holding_advice(signal: Signal) -> HoldingAdvice {
    match signal {
        Signal::Buy => HoldingAdvice::HoldFor { hours: 24 },
        Signal::Sell => HoldingAdvice::SellWithin { hours: 12 },
        Signal::Hold | Signal::NoData => HoldingAdvice::ReassessIn { hours: 24 },
    }
}

/// Advice refined by volatility, signal strength, RSI and MACD sign.
pub fn holding_advice_with(signal: Signal, inputs: &DurationInputs) -> HoldingAdvice {
    match signal {
        Signal::Buy => {
            let hours = if inputs.volatility > HIGH_VOLATILITY
                || inputs.signal_strength > STRONG_SIGNAL
            {
                12
            } else if inputs.rsi < RSI_OVERSOLD {
                48
            } else if inputs.macd > 0.0 {
                36
            } else {
                24
            };
            HoldingAdvice::HoldFor { hours }
        }
        Signal::Sell => HoldingAdvice::SellWithin { hours: 12 },
        Signal::Hold => {
            let hours = if inputs.rsi < RSI_OVERSOLD || inputs.rsi > RSI_OVERBOUGHT {
                12
            } else if inputs.macd < 0.0 {
                18
            } else {
                24
            };
            HoldingAdvice::ReassessIn { hours }
        }
        Signal::NoData => holding_advice(signal),
    }
}
