use crate::{config::BollingerParams, utils::mean_and_stddev};

/// Upper, middle and lower band, aligned to the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerBands {
    pub high: Vec<Option<f64>>,
    pub mid: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
}

/// Rolling SMA ± `window_dev` population standard deviations.
/// The first `window - 1` rows have no value.
pub fn bollinger_bands(closes: &[f64], params: &BollingerParams) -> BollingerBands {
    let len = closes.len();
    let mut bands = BollingerBands {
        high: vec![None; len],
        mid: vec![None; len],
        low: vec![None; len],
    };

    if params.window == 0 || len < params.window {
        return bands;
    }

    for (offset, window) in closes.windows(params.window).enumerate() {
        let idx = offset + params.window - 1;
        let (mean, std_dev) = mean_and_stddev(window);
        if !mean.is_finite() || !std_dev.is_finite() {
            continue;
        }
        bands.mid[idx] = Some(mean);
        bands.high[idx] = Some(mean + params.window_dev * std_dev);
        bands.low[idx] = Some(mean - params.window_dev * std_dev);
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INDICATORS;

    #[test]
    fn warm_up_is_window_minus_one() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bands = bollinger_bands(&closes, &INDICATORS.bollinger);
        assert!(bands.mid[..19].iter().all(Option::is_none));
        assert!(bands.mid[19..].iter().all(Option::is_some));
        assert_eq!(bands.high.len(), 30);
    }

    #[test]
    fn flat_series_has_zero_width() {
        let closes = vec![50.0; 25];
        let bands = bollinger_bands(&closes, &INDICATORS.bollinger);
        assert_eq!(bands.high[24], Some(50.0));
        assert_eq!(bands.low[24], Some(50.0));
    }

    #[test]
    fn uses_population_std_dev() {
        let params = BollingerParams {
            window: 4,
            window_dev: 2.0,
        };
        let bands = bollinger_bands(&[1.0, 2.0, 3.0, 4.0], &params);
        // mean 2.5, population variance 1.25
        let sd = 1.25_f64.sqrt();
        assert_eq!(bands.mid[3], Some(2.5));
        assert!((bands.high[3].unwrap() - (2.5 + 2.0 * sd)).abs() < 1e-12);
        assert!((bands.low[3].unwrap() - (2.5 - 2.0 * sd)).abs() < 1e-12);
    }

    #[test]
    fn short_input_is_all_none() {
        let bands = bollinger_bands(&[1.0, 2.0], &INDICATORS.bollinger);
        assert_eq!(bands.high, vec![None, None]);
        assert!(bollinger_bands(&[], &INDICATORS.bollinger).mid.is_empty());
    }
}
