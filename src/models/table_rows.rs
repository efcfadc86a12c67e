use {
    crate::{
        config::PriceLike,
        models::{ForecastFrame, IndicatorFrame, OhlcvTimeSeries},
    },
    chrono::NaiveDate,
    tabled::Tabled,
};

fn fmt_price(v: &f64) -> String {
    format!("{:.2}", v)
}

fn fmt_volume(v: &f64) -> String {
    format!("{:.0}", v)
}

fn fmt_opt(v: &Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// "Raw data" table row.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct RawRow {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Open", display_with = "fmt_price")]
    pub open: f64,
    #[tabled(rename = "High", display_with = "fmt_price")]
    pub high: f64,
    #[tabled(rename = "Low", display_with = "fmt_price")]
    pub low: f64,
    #[tabled(rename = "Close", display_with = "fmt_price")]
    pub close: f64,
    #[tabled(rename = "Volume", display_with = "fmt_volume")]
    pub volume: f64,
}

/// "Forecast data" table row.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct ForecastTableRow {
    pub ds: NaiveDate,
    #[tabled(display_with = "fmt_price")]
    pub yhat: f64,
    #[tabled(display_with = "fmt_price")]
    pub yhat_lower: f64,
    #[tabled(display_with = "fmt_price")]
    pub yhat_upper: f64,
}

/// "Recent data" table row: the raw bar plus its Bollinger band edges.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct RecentRow {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Open", display_with = "fmt_price")]
    pub open: f64,
    #[tabled(rename = "High", display_with = "fmt_price")]
    pub high: f64,
    #[tabled(rename = "Low", display_with = "fmt_price")]
    pub low: f64,
    #[tabled(rename = "Close", display_with = "fmt_price")]
    pub close: f64,
    #[tabled(rename = "Volume", display_with = "fmt_volume")]
    pub volume: f64,
    #[tabled(display_with = "fmt_opt")]
    pub bb_h: Option<f64>,
    #[tabled(display_with = "fmt_opt")]
    pub bb_l: Option<f64>,
}

/// Indicator columns for the CLI report.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Close", display_with = "fmt_price")]
    pub close: f64,
    #[tabled(display_with = "fmt_opt")]
    pub bb_h: Option<f64>,
    #[tabled(display_with = "fmt_opt")]
    pub bb_l: Option<f64>,
    #[tabled(display_with = "fmt_opt")]
    pub macd: Option<f64>,
    #[tabled(display_with = "fmt_opt")]
    pub macd_signal: Option<f64>,
    #[tabled(display_with = "fmt_opt")]
    pub rsi: Option<f64>,
}

pub fn raw_rows(series: &OhlcvTimeSeries, n: usize) -> Vec<RawRow> {
    series
        .tail_range(n)
        .filter_map(|i| series.candle_at(i))
        .map(|c| RawRow {
            date: c.date,
            open: c.open_price.value(),
            high: c.high_price.value(),
            low: c.low_price.value(),
            close: c.close_price.value(),
            volume: c.volume.value(),
        })
        .collect()
}

pub fn forecast_rows(frame: &ForecastFrame, n: usize) -> Vec<ForecastTableRow> {
    frame
        .tail(n)
        .iter()
        .map(|r| ForecastTableRow {
            ds: r.ds,
            yhat: r.yhat,
            yhat_lower: r.yhat_lower,
            yhat_upper: r.yhat_upper,
        })
        .collect()
}

pub fn recent_rows(
    series: &OhlcvTimeSeries,
    indicators: &IndicatorFrame,
    n: usize,
) -> Vec<RecentRow> {
    series
        .tail_range(n)
        .filter_map(|i| {
            let c = series.candle_at(i)?;
            Some(RecentRow {
                date: c.date,
                open: c.open_price.value(),
                high: c.high_price.value(),
                low: c.low_price.value(),
                close: c.close_price.value(),
                volume: c.volume.value(),
                bb_h: indicators.bb_high.get(i).copied().flatten(),
                bb_l: indicators.bb_low.get(i).copied().flatten(),
            })
        })
        .collect()
}

pub fn indicator_rows(
    series: &OhlcvTimeSeries,
    indicators: &IndicatorFrame,
    n: usize,
) -> Vec<IndicatorRow> {
    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();
    series
        .tail_range(n)
        .map(|i| IndicatorRow {
            date: series.dates[i],
            close: series.close_prices[i].value(),
            bb_h: at(&indicators.bb_high, i),
            bb_l: at(&indicators.bb_low, i),
            macd: at(&indicators.macd, i),
            macd_signal: at(&indicators.macd_signal, i),
            rsi: at(&indicators.rsi, i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, HighPrice, INDICATORS, LowPrice, OpenPrice, Volume},
        domain::{Candle, Ticker},
    };
    use chrono::Duration;

    fn series(n: i64) -> OhlcvTimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let candles = (0..n)
            .map(|i| {
                let p = 50.0 + i as f64;
                Candle::new(
                    start + Duration::days(i),
                    OpenPrice::new(p),
                    HighPrice::new(p + 1.0),
                    LowPrice::new(p - 1.0),
                    ClosePrice::new(p + 0.5),
                    Volume::new(1000.0 * i as f64),
                )
            })
            .collect();
        OhlcvTimeSeries::from_candles(Ticker::Msft, candles).unwrap()
    }

    #[test]
    fn raw_rows_take_the_tail() {
        let s = series(30);
        let rows = raw_rows(&s, 5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 26).unwrap());
        assert_eq!(rows[4].close, 50.0 + 29.0 + 0.5);
        assert_eq!(raw_rows(&s, 100).len(), 30);
    }

    #[test]
    fn recent_rows_carry_band_edges_once_warm() {
        let s = series(30);
        let ind = IndicatorFrame::compute(&s, &INDICATORS);
        let rows = recent_rows(&s, &ind, 5);
        assert!(rows.iter().all(|r| r.bb_h.is_some() && r.bb_l.is_some()));
        assert!(rows.iter().all(|r| r.bb_h >= r.bb_l));

        let short = series(3);
        let ind = IndicatorFrame::compute(&short, &INDICATORS);
        assert!(recent_rows(&short, &ind, 5).iter().all(|r| r.bb_h.is_none()));
    }

    #[test]
    fn headers_and_missing_values_render() {
        assert_eq!(
            RecentRow::headers(),
            vec!["Date", "Open", "High", "Low", "Close", "Volume", "bb_h", "bb_l"]
        );
        let row = RecentRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.234,
            volume: 10.0,
            bb_h: None,
            bb_l: Some(0.9),
        };
        let fields = row.fields();
        assert_eq!(fields[4], "1.23");
        assert_eq!(fields[6], "-");
        assert_eq!(fields[7], "0.90");
    }
}
