//! Forecast model blueprint.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeasonalityParams {
    pub period_days: f64,
    pub fourier_order: usize,
    /// Minimum history span (days) before the seasonality is switched on.
    pub min_span_days: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForecastConfig {
    pub n_changepoints: usize,
    /// Changepoints are only placed in this leading fraction of the history.
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    /// Prior std-dev of the base growth rate and offset (scaled units).
    pub trend_prior_scale: f64,
    pub interval_width: f64,
    pub uncertainty_samples: usize,
    pub weekly: SeasonalityParams,
    pub yearly: SeasonalityParams,
    /// Reweighting passes for the changepoint prior.
    pub fit_iterations: usize,
    pub rng_seed: u64,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    n_changepoints: 25,
    changepoint_range: 0.8,
    changepoint_prior_scale: 0.05,
    seasonality_prior_scale: 10.0,
    trend_prior_scale: 5.0,
    interval_width: 0.8,
    uncertainty_samples: 1000,
    weekly: SeasonalityParams {
        period_days: 7.0,
        fourier_order: 3,
        min_span_days: 14.0,
    },
    yearly: SeasonalityParams {
        period_days: 365.25,
        fourier_order: 10,
        min_span_days: 730.0,
    },
    fit_iterations: 8,
    rng_seed: 0x5eed_f0ca,
};

impl Default for ForecastConfig {
    fn default() -> Self {
        FORECAST
    }
}
