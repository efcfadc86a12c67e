//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Every request and response to the market-data provider.
    pub log_provider: bool,

    /// Memo and disk cache hits/misses.
    pub log_cache: bool,

    /// Job submission, completion and stale-result drops.
    pub log_engine: bool,

    /// Forecast fit diagnostics (sigma, iterations, enabled seasonalities).
    pub log_forecast: bool,

    /// Sidebar input changes.
    pub log_inputs: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,
    log_provider: true,
    log_cache: false,
    log_engine: true,
    log_forecast: false,
    log_inputs: false,
};
