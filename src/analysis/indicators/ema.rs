//! Exponential moving averages shared by MACD and RSI.

/// Smoothing factor of a span-`n` EMA.
#[inline]
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Smoothing factor of Wilder's moving average over `window` rows.
#[inline]
pub fn wilder_alpha(window: usize) -> f64 {
    1.0 / window as f64
}

/// Non-adjusted EMA: `e[0] = x[0]`, `e[i] = a*x[i] + (1-a)*e[i-1]`.
///
/// Leading `None`s are skipped; the recursion is seeded at the first
/// defined value. An output is only emitted once `min_periods` values
/// have been folded in. `None` inside the series keeps the previous state.
pub fn ema(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;
    let mut seen = 0usize;

    for value in values {
        if let Some(x) = value {
            state = Some(match state {
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
                None => *x,
            });
            seen += 1;
        }
        out.push(if seen >= min_periods.max(1) { state } else { None });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_with_first_value() {
        let values: Vec<Option<f64>> = [10.0, 20.0, 20.0].iter().map(|v| Some(*v)).collect();
        let out = ema(&values, 0.5, 1);
        assert_eq!(out, vec![Some(10.0), Some(15.0), Some(17.5)]);
    }

    #[test]
    fn min_periods_and_leading_gaps() {
        let values = vec![None, None, Some(4.0), Some(8.0), Some(8.0)];
        let out = ema(&values, 0.5, 2);
        assert_eq!(out, vec![None, None, None, Some(6.0), Some(7.0)]);
    }

    #[test]
    fn alphas() {
        assert!((span_alpha(9) - 0.2).abs() < 1e-12);
        assert!((wilder_alpha(14) - 1.0 / 14.0).abs() < 1e-12);
    }
}
