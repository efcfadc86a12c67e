mod cache_file;
mod loader;
mod memo;
mod provider;
mod yahoo;

pub use {
    cache_file::{HistoryKey, read_valid_cache, write_cache},
    loader::HistoryLoader,
    memo::HistoryMemo,
    provider::MarketDataProvider,
    yahoo::{MarketDataError, YahooProvider, parse_chart_response},
};
