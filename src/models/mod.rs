mod forecast_frame;
mod indicator_frame;
mod ohlcv;
mod table_rows;

pub use {
    forecast_frame::{ForecastFrame, ForecastRow, SeasonalProfile, SeasonalityKind},
    indicator_frame::IndicatorFrame,
    ohlcv::OhlcvTimeSeries,
    table_rows::{
        ForecastTableRow, IndicatorRow, RawRow, RecentRow, forecast_rows, indicator_rows,
        raw_rows, recent_rows,
    },
};
