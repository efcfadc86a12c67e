use {
    crate::{
        analysis::indicators::{bollinger_bands, macd, rsi},
        config::IndicatorConfig,
        models::OhlcvTimeSeries,
    },
    serde::{Deserialize, Serialize},
};

/// Derived columns, index-aligned with the source `OhlcvTimeSeries`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    pub bb_high: Vec<Option<f64>>,
    pub bb_mid: Vec<Option<f64>>,
    pub bb_low: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_diff: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn compute(series: &OhlcvTimeSeries, config: &IndicatorConfig) -> Self {
        crate::trace_time!("IndicatorFrame::compute", 2_000, {
            let closes = series.closes();
            let bands = bollinger_bands(&closes, &config.bollinger);
            let macd = macd(&closes, &config.macd);

            Self {
                bb_high: bands.high,
                bb_mid: bands.mid,
                bb_low: bands.low,
                macd: macd.line,
                macd_signal: macd.signal,
                macd_diff: macd.diff,
                rsi: rsi(&closes, &config.rsi),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, HighPrice, INDICATORS, LowPrice, OpenPrice, Volume},
        domain::{Candle, Ticker},
    };
    use chrono::{Duration, NaiveDate};

    fn series(n: usize) -> OhlcvTimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let candles = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.4).sin() * 4.0;
                Candle::new(
                    start + Duration::days(i as i64),
                    OpenPrice::new(close),
                    HighPrice::new(close + 1.0),
                    LowPrice::new(close - 1.0),
                    ClosePrice::new(close),
                    Volume::new(10.0),
                )
            })
            .collect();
        OhlcvTimeSeries::from_candles(Ticker::Aapl, candles).unwrap()
    }

    #[test]
    fn columns_align_with_series() {
        let series = series(70);
        let frame = IndicatorFrame::compute(&series, &INDICATORS);
        assert_eq!(frame.len(), series.len());
        for column in [
            &frame.bb_high,
            &frame.bb_mid,
            &frame.bb_low,
            &frame.macd,
            &frame.macd_signal,
            &frame.macd_diff,
        ] {
            assert_eq!(column.len(), 70);
        }
        assert!(frame.bb_high[19].is_some());
        assert!(frame.macd[25].is_some());
        assert!(frame.rsi[13].is_some());
    }

    #[test]
    fn empty_series_gives_empty_frame() {
        let frame = IndicatorFrame::compute(&series(0), &INDICATORS);
        assert!(frame.is_empty());
        assert!(frame.macd.is_empty());
    }
}
