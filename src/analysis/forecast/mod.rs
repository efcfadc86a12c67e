//! Additive time-series forecaster: `y = trend + weekly + yearly + noise`.

mod design;
mod model;
mod uncertainty;

pub use model::{ForecastError, ForecastModel};

use crate::{
    config::ForecastConfig,
    models::{ForecastFrame, OhlcvTimeSeries},
};

/// Fits the close column and forecasts `periods` calendar days past the
/// last bar.
pub fn forecast_series(
    series: &OhlcvTimeSeries,
    periods: usize,
    config: &ForecastConfig,
) -> Result<ForecastFrame, ForecastError> {
    let model = ForecastModel::fit(&series.dates, &series.closes(), config)?;
    model.predict(&model.make_future_dates(periods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, FORECAST, HighPrice, LowPrice, OpenPrice, Volume},
        domain::{Candle, Ticker},
    };
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    #[test]
    fn forecasts_trading_day_history() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let candles: Vec<Candle> = (0..100)
            .map(|i| start + Duration::days(i))
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .enumerate()
            .map(|(i, date)| {
                let close = 180.0 + 0.3 * i as f64;
                Candle::new(
                    date,
                    OpenPrice::new(close),
                    HighPrice::new(close + 1.0),
                    LowPrice::new(close - 1.0),
                    ClosePrice::new(close),
                    Volume::new(1e6),
                )
            })
            .collect();
        let series = OhlcvTimeSeries::from_candles(Ticker::Aapl, candles).unwrap();
        let frame = forecast_series(&series, 30, &FORECAST).unwrap();

        assert_eq!(frame.history_len, series.len());
        assert_eq!(frame.future_rows().len(), 30);
        assert_eq!(
            frame.future_rows()[0].ds,
            series.last_date().unwrap() + Duration::days(1)
        );
        let last_close = series.closes()[series.len() - 1];
        assert!(frame.rows.last().unwrap().yhat > last_close);
    }

    #[test]
    fn empty_series_is_insufficient() {
        let series = OhlcvTimeSeries::from_candles(Ticker::Aapl, Vec::new()).unwrap();
        assert_eq!(
            forecast_series(&series, 30, &FORECAST).unwrap_err(),
            ForecastError::InsufficientData { rows: 0 }
        );
    }
}
