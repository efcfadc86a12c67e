use argminmax::ArgMinMax;

/// Min and max of the finite values in `vec`, or None if there are none.
pub(crate) fn finite_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = vec.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let (min_index, max_index) = finite.argminmax();
    Some((finite[min_index], finite[max_index]))
}

#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let sum: f64 = data.iter().sum();
    let mean = sum / count as f64;

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// Linear-interpolated percentile of already sorted data, `q` in 0..=1.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pads a value range so lines don't touch the plot frame.
pub fn padded_range(min: f64, max: f64, pad_pct: f64) -> (f64, f64) {
    let range = max - min;
    let pad = if range > f64::EPSILON {
        range * pad_pct
    } else {
        min.abs().max(1.0) * pad_pct
    };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_min_max_skips_nan() {
        let data = [f64::NAN, 3.0, -1.0, f64::INFINITY, 7.5];
        assert_eq!(finite_min_max(&data), Some((-1.0, 7.5)));
        assert_eq!(finite_min_max(&[f64::NAN]), None);
    }

    #[test]
    fn population_stddev() {
        let (mean, sd) = mean_and_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), 0.0);
        assert_eq!(percentile_sorted(&sorted, 1.0), 40.0);
        assert!((percentile_sorted(&sorted, 0.1) - 4.0).abs() < 1e-12);
        assert!(percentile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn padded_range_handles_flat_series() {
        let (lo, hi) = padded_range(100.0, 100.0, 0.05);
        assert!(lo < 100.0 && hi > 100.0);
    }
}
