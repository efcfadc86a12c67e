use chrono::NaiveDate;

use crate::config::{ClosePrice, HighPrice, LowPrice, OpenPrice, Volume};

/// One daily bar as returned by a market-data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,

    pub open_price: OpenPrice,
    pub high_price: HighPrice,
    pub low_price: LowPrice,
    pub close_price: ClosePrice,

    pub volume: Volume,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        date: NaiveDate,
        open: OpenPrice,
        high: HighPrice,
        low: LowPrice,
        close: ClosePrice,
        volume: Volume,
    ) -> Self {
        Candle {
            date,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
            volume,
        }
    }
}
