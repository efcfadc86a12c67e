use {
    super::{
        design::{TimeScale, active_seasonalities, changepoint_indices, fourier_terms, piecewise_linear},
        uncertainty::{SimulationInput, simulate},
    },
    crate::{
        config::{DF, ForecastConfig, SeasonalityParams},
        models::{ForecastFrame, ForecastRow, SeasonalProfile, SeasonalityKind},
        utils::{date_to_epoch_days, days_after},
    },
    chrono::NaiveDate,
    nalgebra::{DMatrix, DVector},
};

/// Smallest noise level (scaled units) used while reweighting.
const MIN_SIGMA: f64 = 1e-6;
/// Floor for the changepoint prior variance.
const MIN_DELTA_VARIANCE: f64 = 1e-10;
const INITIAL_SIGMA: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    InsufficientData { rows: usize },
    NonFinite,
    Singular,
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::InsufficientData { rows } => {
                write!(f, "Forecast needs at least 2 rows, got {}", rows)
            }
            ForecastError::NonFinite => write!(f, "Forecast input contains non-finite values"),
            ForecastError::Singular => write!(f, "Forecast system could not be solved"),
        }
    }
}

impl std::error::Error for ForecastError {}

/// Piecewise-linear trend in scaled units.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendParams {
    pub k: f64,
    pub m: f64,
    pub deltas: Vec<f64>,
    pub changepoints_t: Vec<f64>,
}

impl TrendParams {
    pub fn at(&self, t: f64) -> f64 {
        piecewise_linear(t, self.k, self.m, &self.deltas, &self.changepoints_t)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FittedSeasonality {
    kind: SeasonalityKind,
    params: SeasonalityParams,
    betas: Vec<f64>,
}

impl FittedSeasonality {
    fn at(&self, days: f64) -> f64 {
        fourier_terms(days, &self.params)
            .iter()
            .zip(&self.betas)
            .map(|(x, b)| x * b)
            .sum()
    }
}

/// Additive trend + seasonality model fitted to one price history.
#[derive(Debug, Clone)]
pub struct ForecastModel {
    config: ForecastConfig,
    scale: TimeScale,
    y_scale: f64,
    trend: TrendParams,
    seasonalities: Vec<FittedSeasonality>,
    sigma: f64,
    history_dates: Vec<NaiveDate>,
    history_y: Vec<f64>,
}

impl ForecastModel {
    /// MAP fit. Changepoint deltas carry a Laplace prior, approximated by
    /// reweighted ridge passes; everything else has a Gaussian prior.
    pub fn fit(
        dates: &[NaiveDate],
        y: &[f64],
        config: &ForecastConfig,
    ) -> Result<Self, ForecastError> {
        let rows = dates.len().min(y.len());
        if rows < 2 {
            return Err(ForecastError::InsufficientData { rows });
        }
        let dates = &dates[..rows];
        let y = &y[..rows];
        if y.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NonFinite);
        }

        let y_scale = match y.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())) {
            s if s > 0.0 => s,
            _ => 1.0,
        };
        let y_scaled: Vec<f64> = y.iter().map(|v| v / y_scale).collect();

        let days: Vec<f64> = dates.iter().map(|d| date_to_epoch_days(*d)).collect();
        let scale = TimeScale::from_days(&days);
        let t: Vec<f64> = days.iter().map(|d| scale.scale(*d)).collect();

        let changepoints_t: Vec<f64> =
            changepoint_indices(rows, config.n_changepoints, config.changepoint_range)
                .into_iter()
                .map(|i| t[i])
                .collect();
        let seasonal_specs = active_seasonalities(&days, config);

        // Columns: k, m, one per changepoint, then Fourier terms
        let n_cp = changepoints_t.len();
        let n_seasonal: usize = seasonal_specs
            .iter()
            .map(|(_, p)| 2 * p.fourier_order)
            .sum();
        let n_cols = 2 + n_cp + n_seasonal;

        let mut design = DMatrix::<f64>::zeros(rows, n_cols);
        for i in 0..rows {
            design[(i, 0)] = t[i];
            design[(i, 1)] = 1.0;
            for (j, s) in changepoints_t.iter().enumerate() {
                if t[i] >= *s {
                    design[(i, 2 + j)] = t[i] - s;
                }
            }
            let mut col = 2 + n_cp;
            for (_, params) in &seasonal_specs {
                for x in fourier_terms(days[i], params) {
                    design[(i, col)] = x;
                    col += 1;
                }
            }
        }

        let mut prior_var = vec![config.trend_prior_scale.powi(2); n_cols];
        for v in prior_var[2..2 + n_cp].iter_mut() {
            *v = config.changepoint_prior_scale.powi(2);
        }
        for v in prior_var[2 + n_cp..].iter_mut() {
            *v = config.seasonality_prior_scale.powi(2);
        }

        let target = DVector::from_vec(y_scaled);
        let gram = design.transpose() * &design;
        let rhs = design.transpose() * &target;

        let mut sigma = INITIAL_SIGMA;
        let mut theta = DVector::<f64>::zeros(n_cols);
        for _ in 0..config.fit_iterations.max(1) {
            let mut system = gram.clone();
            for (j, var) in prior_var.iter().enumerate() {
                system[(j, j)] += sigma * sigma / var;
            }
            theta = solve(system, &rhs)?;

            let residuals = &target - &design * &theta;
            sigma = (residuals.norm_squared() / rows as f64).sqrt().max(MIN_SIGMA);

            for j in 0..n_cp {
                prior_var[2 + j] =
                    (config.changepoint_prior_scale * theta[2 + j].abs()).max(MIN_DELTA_VARIANCE);
            }
        }

        let mut col = 2 + n_cp;
        let seasonalities = seasonal_specs
            .into_iter()
            .map(|(kind, params)| {
                let width = 2 * params.fourier_order;
                let betas = theta.rows(col, width).iter().copied().collect();
                col += width;
                FittedSeasonality {
                    kind,
                    params,
                    betas,
                }
            })
            .collect::<Vec<_>>();

        let trend = TrendParams {
            k: theta[0],
            m: theta[1],
            deltas: theta.rows(2, n_cp).iter().copied().collect(),
            changepoints_t,
        };

        #[cfg(debug_assertions)]
        if DF.log_forecast {
            log::info!(
                "Forecast fit: {} rows, {} changepoints, seasonalities {:?}, sigma {:.5}, k {:.4}",
                rows,
                n_cp,
                seasonalities.iter().map(|s| s.kind).collect::<Vec<_>>(),
                sigma,
                trend.k
            );
        }

        Ok(Self {
            config: *config,
            scale,
            y_scale,
            trend,
            seasonalities,
            sigma,
            history_dates: dates.to_vec(),
            history_y: y.to_vec(),
        })
    }

    /// History dates followed by `periods` consecutive calendar days.
    pub fn make_future_dates(&self, periods: usize) -> Vec<NaiveDate> {
        let mut dates = self.history_dates.clone();
        if let Some(last) = self.history_dates.last().copied() {
            dates.extend((1..=periods as i64).map(|i| days_after(last, i)));
        }
        dates
    }

    pub fn predict(&self, dates: &[NaiveDate]) -> Result<ForecastFrame, ForecastError> {
        crate::trace_time!("ForecastModel::predict", 50_000, {
            let days: Vec<f64> = dates.iter().map(|d| date_to_epoch_days(*d)).collect();
            let t: Vec<f64> = days.iter().map(|d| self.scale.scale(*d)).collect();

            let weekly = self.component(SeasonalityKind::Weekly, &days);
            let yearly = self.component(SeasonalityKind::Yearly, &days);
            let seasonal: Vec<f64> = weekly.iter().zip(&yearly).map(|(w, y)| w + y).collect();

            let bands = simulate(&SimulationInput {
                t: &t,
                seasonal: &seasonal,
                trend: &self.trend,
                sigma: self.sigma,
                samples: self.config.uncertainty_samples,
                interval_width: self.config.interval_width,
                seed: self.config.rng_seed,
            })?;

            let s = self.y_scale;
            let rows: Vec<ForecastRow> = dates
                .iter()
                .enumerate()
                .map(|(i, ds)| {
                    let trend = self.trend.at(t[i]);
                    ForecastRow {
                        ds: *ds,
                        yhat: (trend + seasonal[i]) * s,
                        yhat_lower: bands.yhat_lower[i] * s,
                        yhat_upper: bands.yhat_upper[i] * s,
                        trend: trend * s,
                        trend_lower: bands.trend_lower[i] * s,
                        trend_upper: bands.trend_upper[i] * s,
                        weekly: weekly[i] * s,
                        yearly: yearly[i] * s,
                    }
                })
                .collect();

            if rows.iter().any(|r| !r.yhat.is_finite()) {
                return Err(ForecastError::NonFinite);
            }

            let last_history = self.history_dates.last().copied();
            let history_len = dates
                .iter()
                .take_while(|d| Some(**d) <= last_history)
                .count();

            Ok(ForecastFrame {
                periods: rows.len() - history_len,
                history_len,
                rows,
                actual: self.history_y.clone(),
                profiles: [SeasonalityKind::Weekly, SeasonalityKind::Yearly]
                    .into_iter()
                    .filter_map(|kind| self.seasonal_profile(kind))
                    .collect(),
            })
        })
    }

    /// One full cycle of a fitted seasonality, starting on Sunday 2017-01-01.
    pub fn seasonal_profile(&self, kind: SeasonalityKind) -> Option<SeasonalProfile> {
        let fitted = self.seasonalities.iter().find(|s| s.kind == kind)?;
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)?;
        let n_days = match kind {
            SeasonalityKind::Weekly => 7,
            SeasonalityKind::Yearly => 365,
        };
        let dates: Vec<NaiveDate> = (0..n_days).map(|i| days_after(start, i)).collect();
        let values = dates
            .iter()
            .map(|d| fitted.at(date_to_epoch_days(*d)) * self.y_scale)
            .collect();
        Some(SeasonalProfile {
            kind,
            dates,
            values,
        })
    }

    pub fn has_seasonality(&self, kind: SeasonalityKind) -> bool {
        self.seasonalities.iter().any(|s| s.kind == kind)
    }

    /// Noise level in price units.
    pub fn sigma(&self) -> f64 {
        self.sigma * self.y_scale
    }

    fn component(&self, kind: SeasonalityKind, days: &[f64]) -> Vec<f64> {
        match self.seasonalities.iter().find(|s| s.kind == kind) {
            Some(fitted) => days.iter().map(|d| fitted.at(*d)).collect(),
            None => vec![0.0; days.len()],
        }
    }
}

fn solve(system: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, ForecastError> {
    let solution = match system.clone().cholesky() {
        Some(chol) => chol.solve(rhs),
        None => system
            .svd(true, true)
            .solve(rhs, 1e-12)
            .map_err(|_| ForecastError::Singular)?,
    };
    if solution.iter().all(|v| v.is_finite()) {
        Ok(solution)
    } else {
        Err(ForecastError::Singular)
    }
}
