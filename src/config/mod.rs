//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod debug;
mod forecast;
mod indicators;
mod market;
mod persistence;
mod types;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use debug::DF;
pub use forecast::{FORECAST, ForecastConfig, SeasonalityParams};
pub use indicators::{BollingerParams, INDICATORS, IndicatorConfig, MacdParams, RsiParams};
pub use market::{MARKET, MarketConfig};
pub use persistence::{PERSISTENCE, history_cache_filename};
pub use plot::PLOT_CONFIG;
pub use types::{ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike, Volume};
