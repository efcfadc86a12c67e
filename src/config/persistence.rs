//! File persistence and serialization configuration
use chrono::NaiveDate;

use crate::utils::format_date;

/// Configuration for price-history cache files
pub struct HistoryPersistenceConfig {
    /// Directory path for storing cached price history
    pub directory: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
    /// Cached history older than this is refetched
    pub max_age_secs: i64,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading application UI state
    pub state_path: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub history: HistoryPersistenceConfig,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    history: HistoryPersistenceConfig {
        directory: "cache_data",
        version: 1.0,
        max_age_secs: 60 * 60,
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};

/// Generate the cache filename for one query.
/// Example: "AAPL_2024-01-01_2024-04-10_v1.bin"
pub fn history_cache_filename(ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}_{}_{}_v{}.bin",
        ticker,
        format_date(start),
        format_date(end),
        PERSISTENCE.history.version
    )
}
