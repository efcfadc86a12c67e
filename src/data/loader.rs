use {
    crate::{
        config::PERSISTENCE,
        data::{
            HistoryKey, HistoryMemo, MarketDataProvider, YahooProvider, read_valid_cache,
            write_cache,
        },
        domain::Ticker,
        models::OhlcvTimeSeries,
    },
    anyhow::{Result, anyhow},
    chrono::NaiveDate,
    std::{path::PathBuf, sync::Arc},
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistorySource {
    DiskCache,
    Provider,
}

/// Loads daily histories: memo first, then disk cache and provider in the
/// order chosen by `prefer_api`, each falling back to the other.
pub struct HistoryLoader {
    provider: Box<dyn MarketDataProvider>,
    memo: HistoryMemo,
    /// `None` disables the disk cache.
    cache_dir: Option<PathBuf>,
    prefer_api: bool,
}

impl HistoryLoader {
    pub fn new(
        provider: Box<dyn MarketDataProvider>,
        cache_dir: Option<PathBuf>,
        prefer_api: bool,
    ) -> Self {
        Self {
            provider,
            memo: HistoryMemo::default(),
            cache_dir,
            prefer_api,
        }
    }

    /// Loader backed by `PERSISTENCE.history.directory`.
    pub fn with_default_cache(provider: Box<dyn MarketDataProvider>, prefer_api: bool) -> Self {
        Self::new(
            provider,
            Some(PathBuf::from(PERSISTENCE.history.directory)),
            prefer_api,
        )
    }

    /// Yahoo-backed loader with the default disk cache.
    pub fn yahoo(prefer_api: bool) -> Result<Self> {
        let provider = YahooProvider::new()?;
        Ok(Self::with_default_cache(Box::new(provider), prefer_api))
    }

    fn source_order(&self) -> Vec<HistorySource> {
        match (self.cache_dir.is_some(), self.prefer_api) {
            (false, _) => vec![HistorySource::Provider],
            (true, false) => vec![HistorySource::DiskCache, HistorySource::Provider],
            (true, true) => vec![HistorySource::Provider, HistorySource::DiskCache],
        }
    }

    pub async fn load_data(
        &mut self,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<OhlcvTimeSeries>> {
        let key = HistoryKey::new(ticker, start, end);
        if let Some(series) = self.memo.get(&key) {
            #[cfg(debug_assertions)]
            if DF.log_cache {
                log::info!("Memo hit for {} {}..{}", ticker, start, end);
            }
            return Ok(series);
        }

        let mut last_error = None;
        for source in self.source_order() {
            match self.load_from(source, &key).await {
                Ok(series) => {
                    #[cfg(debug_assertions)]
                    if DF.log_cache {
                        log::info!("{} bars for {} loaded from {:?}", series.len(), ticker, source);
                    }
                    return Ok(self.memo.insert(key, series));
                }
                Err(e) => {
                    log::warn!("{:?} failed for {}: {:#}", source, ticker, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("No history source available for {}", ticker)))
    }

    async fn load_from(&self, source: HistorySource, key: &HistoryKey) -> Result<OhlcvTimeSeries> {
        match source {
            HistorySource::DiskCache => {
                let dir = self
                    .cache_dir
                    .as_deref()
                    .ok_or_else(|| anyhow!("Disk cache disabled"))?;
                read_valid_cache(dir, key, PERSISTENCE.history.max_age_secs)
            }
            HistorySource::Provider => {
                let candles = self
                    .provider
                    .fetch_daily(key.ticker, key.start, key.end)
                    .await?;
                let series = OhlcvTimeSeries::from_candles(key.ticker, candles)?;
                if let Some(dir) = self.cache_dir.as_deref() {
                    // The cache is a convenience only
                    if let Err(e) = write_cache(dir, key, &series) {
                        log::warn!("Could not write history cache: {:#}", e);
                    }
                }
                Ok(series)
            }
        }
    }

    pub fn provider_signature(&self) -> &'static str {
        self.provider.signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, HighPrice, LowPrice, OpenPrice, Volume},
        domain::Candle,
    };
    use anyhow::bail;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        fn signature(&self) -> &'static str {
            "Stub"
        }

        async fn fetch_daily(
            &self,
            _ticker: Ticker,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Candle>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("offline");
            }
            Ok((0..5)
                .map(|i| {
                    Candle::new(
                        start + chrono::Duration::days(i),
                        OpenPrice::new(1.0),
                        HighPrice::new(2.0),
                        LowPrice::new(0.5),
                        ClosePrice::new(1.5),
                        Volume::new(100.0),
                    )
                })
                .collect())
        }
    }

    fn stub(fail: bool) -> (Box<dyn MarketDataProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(StubProvider {
                calls: calls.clone(),
                fail,
            }),
            calls,
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn memoises_per_query() {
        let (provider, calls) = stub(false);
        let mut loader = HistoryLoader::new(provider, None, false);

        let a = loader.load_data(Ticker::Aapl, day(1), day(10)).await.unwrap();
        let b = loader.load_data(Ticker::Aapl, day(1), day(10)).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        loader.load_data(Ticker::Aapl, day(2), day(10)).await.unwrap();
        loader.load_data(Ticker::Nvda, day(1), day(10)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(a.len(), 5);
        assert_eq!(loader.provider_signature(), "Stub");
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let (provider, _) = stub(true);
        let mut loader = HistoryLoader::new(provider, None, false);
        let err = loader.load_data(Ticker::Tsla, day(1), day(10)).await.unwrap_err();
        assert!(err.to_string().contains("offline"));
    }

    #[tokio::test]
    async fn disk_cache_serves_later_loaders() {
        let dir = std::env::temp_dir().join(format!("stock_scope_loader_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let (provider, calls) = stub(false);
        let mut first = HistoryLoader::new(provider, Some(dir.clone()), false);
        first.load_data(Ticker::Amzn, day(1), day(10)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // A fresh loader with a broken provider still gets the cached bars
        let (broken, broken_calls) = stub(true);
        let mut second = HistoryLoader::new(broken, Some(dir.clone()), false);
        let series = second.load_data(Ticker::Amzn, day(1), day(10)).await.unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(broken_calls.load(Ordering::SeqCst), 0);

        // prefer_api tries the provider first, then falls back to disk
        let (broken, broken_calls) = stub(true);
        let mut third = HistoryLoader::new(broken, Some(dir.clone()), true);
        assert!(third.load_data(Ticker::Amzn, day(1), day(10)).await.is_ok());
        assert_eq!(broken_calls.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
