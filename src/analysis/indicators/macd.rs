use {
    super::ema::{ema, span_alpha},
    crate::config::MacdParams,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Macd {
    /// EMA(fast) - EMA(slow)
    pub line: Vec<Option<f64>>,
    /// EMA(sign) of the line
    pub signal: Vec<Option<f64>>,
    /// line - signal
    pub diff: Vec<Option<f64>>,
}

pub fn macd(closes: &[f64], params: &MacdParams) -> Macd {
    let values: Vec<Option<f64>> = closes.iter().map(|c| Some(*c)).collect();

    let fast = ema(&values, span_alpha(params.window_fast), params.window_fast);
    let slow = ema(&values, span_alpha(params.window_slow), params.window_slow);

    let line: Vec<Option<f64>> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal = ema(&line, span_alpha(params.window_sign), params.window_sign);

    let diff = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| Some((*l)? - (*s)?))
        .collect();

    Macd { line, signal, diff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INDICATORS;

    #[test]
    fn constant_series_is_zero() {
        let closes = vec![42.0; 40];
        let out = macd(&closes, &INDICATORS.macd);
        assert!(out.line[..25].iter().all(Option::is_none));
        assert!(out.line[25].unwrap().abs() < 1e-9);
        assert!(out.line[39].unwrap().abs() < 1e-9);
    }

    #[test]
    fn signal_starts_after_sign_line_values() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let out = macd(&closes, &INDICATORS.macd);
        // line from 25, signal needs 9 line values -> 33
        assert!(out.signal[32].is_none());
        assert!(out.signal[33].is_some());
        assert!(out.diff[32].is_none());
        let expected = out.line[40].unwrap() - out.signal[40].unwrap();
        assert!((out.diff[40].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn rising_prices_give_positive_line() {
        let closes: Vec<f64> = (0..50).map(|i| 10.0 + i as f64).collect();
        let out = macd(&closes, &INDICATORS.macd);
        assert!(out.line[30].unwrap() > 0.0);
    }

    #[test]
    fn short_input_is_all_none() {
        let out = macd(&[1.0; 10], &INDICATORS.macd);
        assert_eq!(out.line.len(), 10);
        assert!(out.line.iter().all(Option::is_none));
        assert!(macd(&[], &INDICATORS.macd).signal.is_empty());
    }
}
