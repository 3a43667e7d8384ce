//! Timeframe and re-analysis cadence suggestions from market conditions.

use crate::services::indicators::{mean, returns, std_dev};
use crate::types::{AnalysisFrequency, Candle, Timeframe};

/// Picks a candle granularity from recent volatility, volume, liquidity and
/// trend direction.
#[derive(Debug, Clone, Copy)]
pub struct TimeframeAdvisor {
    window: usize,
}

impl Default for TimeframeAdvisor {
    fn default() -> Self {
        Self { window: 10 }
    }
}

/// (max relative volatility, max volume, max liquidity, required trend, timeframe)
const TIERS: [(f64, f64, f64, i8, Timeframe); 5] = [
    (0.5, 1_000_000.0, 1_000_000.0, 1, Timeframe::OneMinute),
    (1.0, 2_000_000.0, 2_000_000.0, 1, Timeframe::FiveMinutes),
    (2.0, 3_000_000.0, 3_000_000.0, -1, Timeframe::FifteenMinutes),
    (4.0, 4_000_000.0, 4_000_000.0, -1, Timeframe::OneHour),
    (8.0, 5_000_000.0, 5_000_000.0, 1, Timeframe::FourHours),
];

impl TimeframeAdvisor {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Suggested timeframe; daily when there is too little history.
    pub fn suggest(&self, candles: &[Candle]) -> Timeframe {
        if candles.len() < self.window {
            return Timeframe::OneDay;
        }

        let all_closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let recent = &candles[candles.len() - self.window..];
        let recent_closes = &all_closes[all_closes.len() - self.window..];

        let high = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let low = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let range = high - low;
        let historical = std_dev(&all_closes).unwrap_or(0.0);
        let relative_volatility = if historical > 0.0 {
            range / historical
        } else if range > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let volumes: Vec<f64> = recent.iter().map(|c| c.volume).collect();
        let average_volume = mean(&volumes).unwrap_or(0.0);
        let liquidity = average_volume * mean(recent_closes).unwrap_or(0.0);

        let diffs: Vec<f64> = recent_closes.windows(2).map(|w| w[1] - w[0]).collect();
        let drift = mean(&diffs).unwrap_or(0.0);
        let trend: i8 = if drift > 0.0 {
            1
        } else if drift < 0.0 {
            -1
        } else {
            0
        };

        TIERS
            .iter()
            .find(|(max_vol, max_volume, max_liquidity, direction, _)| {
                relative_volatility < *max_vol
                    && average_volume < *max_volume
                    && liquidity < *max_liquidity
                    && trend == *direction
            })
            .map(|(_, _, _, _, timeframe)| *timeframe)
            .unwrap_or(Timeframe::OneDay)
    }
}

/// Re-analysis cadence from the spread of close-to-close returns.
pub fn analysis_frequency(closes: &[f64]) -> Option<AnalysisFrequency> {
    let volatility = std_dev(&returns(closes))?;
    Some(if volatility < 0.01 {
        AnalysisFrequency::Daily
    } else if volatility < 0.05 {
        AnalysisFrequency::Hourly
    } else {
        AnalysisFrequency::Minute
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: &[f64], spread: f64, volume: f64) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time: i as i64,
                open: close,
                high: close + spread,
                low: close - spread,
                close,
                volume,
            })
            .collect()
    }

    #[test]
    fn test_short_history_defaults_to_daily() {
        let candles = series(&[1.0; 9], 0.0, 1.0);
        assert_eq!(TimeframeAdvisor::default().suggest(&candles), Timeframe::OneDay);
    }

    #[test]
    fn test_quiet_uptrend_suggests_one_minute() {
        // Wide history, tight recent range, rising, thin volume
        let mut closes: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 50.0 } else { 150.0 }).collect();
        closes.extend((0..11).map(|i| 100.0 + i as f64 * 0.1));
        let candles = series(&closes, 0.01, 10.0);
        assert_eq!(TimeframeAdvisor::default().suggest(&candles), Timeframe::OneMinute);
    }

    #[test]
    fn test_quiet_downtrend_suggests_fifteen_minutes() {
        let mut closes: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 50.0 } else { 150.0 }).collect();
        closes.extend((0..11).map(|i| 100.0 - i as f64 * 0.1));
        let candles = series(&closes, 0.01, 10.0);
        assert_eq!(
            TimeframeAdvisor::default().suggest(&candles),
            Timeframe::FifteenMinutes
        );
    }

    #[test]
    fn test_heavy_volume_falls_through_to_daily() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let candles = series(&closes, 0.5, 50_000_000.0);
        assert_eq!(TimeframeAdvisor::default().suggest(&candles), Timeframe::OneDay);
    }

    #[test]
    fn test_analysis_frequency_bands() {
        assert_eq!(analysis_frequency(&[100.0; 10]), Some(AnalysisFrequency::Daily));

        let choppy: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 100.0 } else { 103.0 }).collect();
        assert_eq!(analysis_frequency(&choppy), Some(AnalysisFrequency::Hourly));

        let wild: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 100.0 } else { 130.0 }).collect();
        assert_eq!(analysis_frequency(&wild), Some(AnalysisFrequency::Minute));
    }

    #[test]
    fn test_analysis_frequency_needs_two_closes() {
        assert_eq!(analysis_frequency(&[100.0]), None);
    }
}
