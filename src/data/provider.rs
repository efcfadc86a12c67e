use {
    crate::domain::{Candle, Ticker},
    anyhow::Result,
    async_trait::async_trait,
    chrono::NaiveDate,
};

/// Abstract interface for fetching daily market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short label used in logs.
    fn signature(&self) -> &'static str;

    /// Daily candles for `ticker` from `start` (inclusive) to `end` (exclusive).
    async fn fetch_daily(
        &self,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>>;
}
