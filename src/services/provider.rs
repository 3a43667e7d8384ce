//! Collaborator interfaces the analysis engine depends on.

use async_trait::async_trait;

use crate::types::{Candle, Timeframe, TradingPair};

/// Source of OHLCV candle series.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch candles for a pair, oldest first. Unknown pairs should yield an
    /// empty series rather than an error.
    async fn fetch_candles(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> anyhow::Result<Vec<Candle>>;

    /// Whether the exchange lists this pair for trading.
    async fn is_listed(&self, pair: &TradingPair) -> anyhow::Result<bool>;
}

/// Source of last-traded prices, used by alert polling.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn last_price(&self, pair: &TradingPair) -> anyhow::Result<f64>;
}
