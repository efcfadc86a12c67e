//! Regressors of the additive model: scaled time, trend changepoints and
//! Fourier terms.

use {
    crate::{
        config::{ForecastConfig, SeasonalityParams},
        models::SeasonalityKind,
    },
    std::f64::consts::PI,
};

/// Maps epoch days onto [0, 1] over the fitted history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub start_days: f64,
    pub span_days: f64,
}

impl TimeScale {
    pub fn from_days(days: &[f64]) -> Self {
        let start_days = days.first().copied().unwrap_or(0.0);
        let end_days = days.last().copied().unwrap_or(start_days);
        let span = end_days - start_days;
        Self {
            start_days,
            span_days: if span > 0.0 { span } else { 1.0 },
        }
    }

    #[inline]
    pub fn scale(&self, days: f64) -> f64 {
        (days - self.start_days) / self.span_days
    }
}

/// History row indices used as changepoints: `n_changepoints` spread evenly
/// over the first `range` of the history, the first row excluded.
pub fn changepoint_indices(n_rows: usize, n_changepoints: usize, range: f64) -> Vec<usize> {
    let hist_size = (n_rows as f64 * range).floor() as usize;
    let n = n_changepoints.min(hist_size.saturating_sub(1));
    if n == 0 {
        return Vec::new();
    }
    let last = (hist_size - 1) as f64;
    (1..=n)
        .map(|i| (last * i as f64 / n as f64).round_ties_even() as usize)
        .collect()
}

/// Slope and offset adjusted by every changepoint at or before `t`.
pub fn piecewise_linear(t: f64, k: f64, m: f64, deltas: &[f64], changepoints_t: &[f64]) -> f64 {
    let mut k_t = k;
    let mut m_t = m;
    for (s, delta) in changepoints_t.iter().zip(deltas) {
        if t >= *s {
            k_t += delta;
            m_t -= s * delta;
        }
    }
    k_t * t + m_t
}

/// `[sin(2πt/p), cos(2πt/p), sin(4πt/p), cos(4πt/p), ...]` with `t` in days.
pub fn fourier_terms(days: f64, params: &SeasonalityParams) -> Vec<f64> {
    let mut terms = Vec::with_capacity(2 * params.fourier_order);
    for i in 1..=params.fourier_order {
        let x = 2.0 * PI * i as f64 * days / params.period_days;
        terms.push(x.sin());
        terms.push(x.cos());
    }
    terms
}

/// Seasonalities switched on for this history.
///
/// Weekly needs two weeks of data with sub-weekly spacing; yearly needs two
/// years.
pub fn active_seasonalities(
    days: &[f64],
    config: &ForecastConfig,
) -> Vec<(SeasonalityKind, SeasonalityParams)> {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Vec::new();
    };
    let span = last - first;
    let min_spacing = days
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);

    let mut active = Vec::new();
    if span >= config.weekly.min_span_days && min_spacing < config.weekly.period_days {
        active.push((SeasonalityKind::Weekly, config.weekly));
    }
    if span >= config.yearly.min_span_days {
        active.push((SeasonalityKind::Yearly, config.yearly));
    }
    active
}
