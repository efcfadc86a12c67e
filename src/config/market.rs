/// HTTP client settings for the Yahoo chart endpoint.
pub struct YahooClientConfig {
    pub chart_base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// Dashboard input defaults.
pub struct InputDefaults {
    /// Default start date is today minus this many days.
    pub lookback_days: i64,
    /// Forecast horizon slider bounds, in months.
    pub min_months: u32,
    pub max_months: u32,
    /// A "month" of forecast horizon is this many calendar days.
    pub days_per_month: i64,
    /// Rows shown by the "Raw data" / "Recent data" / "Forecast data" tables.
    pub table_tail_rows: usize,
}

pub struct MarketConfig {
    pub client: YahooClientConfig,
    pub inputs: InputDefaults,
}

pub const MARKET: MarketConfig = MarketConfig {
    client: YahooClientConfig {
        chart_base_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        // Yahoo rejects requests without a browser-looking agent
        user_agent: "Mozilla/5.0",
        timeout_ms: 10_000,
        retries: 2,
        backoff_ms: 1_000,
    },
    inputs: InputDefaults {
        lookback_days: 100,
        min_months: 1,
        max_months: 6,
        days_per_month: 30,
        table_tail_rows: 5,
    },
};
