//! Simulated uncertainty intervals.
//!
//! Each sample extends the fitted trend with new changepoints beyond the
//! history (Poisson count at the historical rate, uniform locations, Laplace
//! deltas scaled by the mean fitted |delta|) and adds Gaussian observation
//! noise. Intervals are percentiles across samples.

use {
    super::{ForecastError, design::piecewise_linear, model::TrendParams},
    crate::utils::percentile_sorted,
    rand::{Rng, SeedableRng, distributions::Distribution, rngs::StdRng},
    rayon::prelude::*,
    statrs::distribution::{Laplace, Normal, Poisson},
};

/// Interval bounds in scaled units, one entry per predicted row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UncertaintyBands {
    pub yhat_lower: Vec<f64>,
    pub yhat_upper: Vec<f64>,
    pub trend_lower: Vec<f64>,
    pub trend_upper: Vec<f64>,
}

pub struct SimulationInput<'a> {
    /// Scaled time of each predicted row.
    pub t: &'a [f64],
    /// Sum of seasonal components of each row (scaled).
    pub seasonal: &'a [f64],
    pub trend: &'a TrendParams,
    /// Observation noise (scaled).
    pub sigma: f64,
    pub samples: usize,
    pub interval_width: f64,
    pub seed: u64,
}

struct SampleDraw {
    trend: Vec<f64>,
    yhat: Vec<f64>,
}

pub fn simulate(input: &SimulationInput) -> Result<UncertaintyBands, ForecastError> {
    let rows = input.t.len();
    if input.samples == 0 || rows == 0 {
        return Ok(point_bands(input));
    }

    let t_max = input.t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n_changepoints = input.trend.changepoints_t.len() as f64;
    let laplace_scale = input.trend.deltas.iter().map(|d| d.abs()).sum::<f64>()
        / input.trend.deltas.len().max(1) as f64
        + 1e-8;

    // Rate of new changepoints over the forecast span; none without a horizon
    let rate = n_changepoints * (t_max - 1.0);
    let new_changepoints = if rate > 0.0 {
        Some(Poisson::new(rate).map_err(|_| ForecastError::NonFinite)?)
    } else {
        None
    };
    let delta_dist = Laplace::new(0.0, laplace_scale).map_err(|_| ForecastError::NonFinite)?;
    // A perfect fit leaves no observation noise to sample
    let noise = if input.sigma > 0.0 {
        Some(Normal::new(0.0, input.sigma).map_err(|_| ForecastError::NonFinite)?)
    } else {
        None
    };

    let draws: Vec<SampleDraw> = (0..input.samples)
        .into_par_iter()
        .map(|sample| {
            let mut rng = StdRng::seed_from_u64(input.seed.wrapping_add(sample as u64));

            let mut changepoints_t = input.trend.changepoints_t.clone();
            let mut deltas = input.trend.deltas.clone();
            if let Some(poisson) = &new_changepoints {
                let n_new: u64 = poisson.sample(&mut rng);
                let mut new_t: Vec<f64> = (0..n_new)
                    .map(|_| 1.0 + rng.gen_range(0.0..1.0) * (t_max - 1.0))
                    .collect();
                new_t.sort_by(f64::total_cmp);
                for s in new_t {
                    changepoints_t.push(s);
                    deltas.push(delta_dist.sample(&mut rng));
                }
            }

            let trend: Vec<f64> = input
                .t
                .iter()
                .map(|&t| piecewise_linear(t, input.trend.k, input.trend.m, &deltas, &changepoints_t))
                .collect();
            let yhat = trend
                .iter()
                .zip(input.seasonal)
                .map(|(tr, seasonal)| {
                    tr + seasonal + noise.as_ref().map_or(0.0, |n| n.sample(&mut rng))
                })
                .collect();

            SampleDraw { trend, yhat }
        })
        .collect();

    let lower_q = (1.0 - input.interval_width) / 2.0;
    let upper_q = 1.0 - lower_q;

    let mut bands = UncertaintyBands::default();
    let mut column = Vec::with_capacity(draws.len());
    for row in 0..rows {
        column.clear();
        column.extend(draws.iter().map(|d| d.yhat[row]));
        column.sort_by(f64::total_cmp);
        bands.yhat_lower.push(percentile_sorted(&column, lower_q));
        bands.yhat_upper.push(percentile_sorted(&column, upper_q));

        column.clear();
        column.extend(draws.iter().map(|d| d.trend[row]));
        column.sort_by(f64::total_cmp);
        bands.trend_lower.push(percentile_sorted(&column, lower_q));
        bands.trend_upper.push(percentile_sorted(&column, upper_q));
    }

    Ok(bands)
}

/// Zero-width bands when sampling is switched off.
fn point_bands(input: &SimulationInput) -> UncertaintyBands {
    let trend: Vec<f64> = input
        .t
        .iter()
        .map(|&t| {
            piecewise_linear(
                t,
                input.trend.k,
                input.trend.m,
                &input.trend.deltas,
                &input.trend.changepoints_t,
            )
        })
        .collect();
    let yhat: Vec<f64> = trend.iter().zip(input.seasonal).map(|(a, b)| a + b).collect();
    UncertaintyBands {
        yhat_lower: yhat.clone(),
        yhat_upper: yhat,
        trend_lower: trend.clone(),
        trend_upper: trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_trend() -> TrendParams {
        TrendParams {
            k: 1.0,
            m: 0.0,
            deltas: vec![0.1, -0.1],
            changepoints_t: vec![0.3, 0.6],
        }
    }

    fn long_horizon_input<'a>(
        t: &'a [f64],
        seasonal: &'a [f64],
        trend: &'a TrendParams,
        sigma: f64,
    ) -> SimulationInput<'a> {
        SimulationInput {
            t,
            seasonal,
            trend,
            sigma,
            samples: 400,
            interval_width: 0.8,
            seed: 17,
        }
    }

    #[test]
    fn future_changepoint_count_is_right_skewed() {
        // Short history, long horizon: rate well above 60 new changepoints
        let poisson = Poisson::new(61.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let n = 100_000;
        let draws: Vec<f64> = (0..n).map(|_| Distribution::<f64>::sample(&poisson, &mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        let skew = draws.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n as f64 / var.powf(1.5);
        assert!((mean - 61.0).abs() < 0.2, "{mean}");
        assert!(draws.iter().all(|x| x.fract() == 0.0 && *x >= 0.0));
        // theory: 1/sqrt(61) = 0.128
        assert!(skew > 0.08 && skew < 0.18, "{skew}");
    }

    #[test]
    fn zero_noise_and_no_horizon_collapse_the_bands() {
        let trend = flat_trend();
        let t: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let seasonal = vec![0.0; t.len()];
        let bands = simulate(&long_horizon_input(&t, &seasonal, &trend, 0.0)).unwrap();
        for i in 0..t.len() {
            assert!((bands.yhat_upper[i] - bands.yhat_lower[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn trend_spread_grows_with_the_horizon() {
        let trend = flat_trend();
        let t: Vec<f64> = (0..=60).map(|i| i as f64 / 20.0).collect();
        let seasonal = vec![0.0; t.len()];
        let bands = simulate(&long_horizon_input(&t, &seasonal, &trend, 0.0)).unwrap();
        let width = |i: usize| bands.trend_upper[i] - bands.trend_lower[i];
        assert!(width(40) > 0.0);
        assert!(width(60) > width(30));
    }

    #[test]
    fn bands_bracket_the_point_forecast_and_widen() {
        let trend = flat_trend();
        let t: Vec<f64> = (0..=30).map(|i| i as f64 / 20.0).collect();
        let seasonal = vec![0.0; t.len()];
        let input = SimulationInput {
            t: &t,
            seasonal: &seasonal,
            trend: &trend,
            sigma: 0.01,
            samples: 500,
            interval_width: 0.8,
            seed: 3,
        };
        let bands = simulate(&input).unwrap();
        assert_eq!(bands.yhat_lower.len(), t.len());
        for (i, &ti) in t.iter().enumerate() {
            let point = piecewise_linear(ti, 1.0, 0.0, &trend.deltas, &trend.changepoints_t);
            assert!(bands.yhat_lower[i] <= point + 1e-9);
            assert!(bands.yhat_upper[i] >= point - 1e-9);
        }
        // trend is certain inside the history
        assert!((bands.trend_upper[10] - bands.trend_lower[10]).abs() < 1e-12);
        let last = t.len() - 1;
        assert!(bands.trend_upper[last] - bands.trend_lower[last] > 0.0);
    }

    #[test]
    fn simulation_is_reproducible() {
        let trend = flat_trend();
        let t: Vec<f64> = (0..40).map(|i| i as f64 / 25.0).collect();
        let seasonal = vec![0.0; t.len()];
        let input = SimulationInput {
            t: &t,
            seasonal: &seasonal,
            trend: &trend,
            sigma: 0.05,
            samples: 200,
            interval_width: 0.8,
            seed: 99,
        };
        assert_eq!(simulate(&input).unwrap(), simulate(&input).unwrap());
    }

    #[test]
    fn zero_samples_give_point_bands() {
        let trend = flat_trend();
        let t = [0.0, 0.5, 1.0];
        let seasonal = [0.0; 3];
        let input = SimulationInput {
            t: &t,
            seasonal: &seasonal,
            trend: &trend,
            sigma: 0.05,
            samples: 0,
            interval_width: 0.8,
            seed: 1,
        };
        let bands = simulate(&input).unwrap();
        assert_eq!(bands.yhat_lower, bands.yhat_upper);
    }
}
