use {
    crate::{
        config::{ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike, Volume},
        domain::{Candle, Ticker},
        utils::format_date,
    },
    anyhow::{Result, bail},
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::ops::Range,
};

/// Daily bars for one ticker, stored column-wise and sorted by date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OhlcvTimeSeries {
    pub ticker: Ticker,
    pub dates: Vec<NaiveDate>,
    pub open_prices: Vec<OpenPrice>,
    pub high_prices: Vec<HighPrice>,
    pub low_prices: Vec<LowPrice>,
    pub close_prices: Vec<ClosePrice>,
    pub volumes: Vec<Volume>,
}

impl OhlcvTimeSeries {
    /// Builds the columnar table. Candles are sorted by date; a repeated
    /// date is an error since every row must be a distinct trading day.
    pub fn from_candles(ticker: Ticker, mut candles: Vec<Candle>) -> Result<Self> {
        candles.sort_by_key(|c| c.date);

        if let Some(pair) = candles.windows(2).find(|w| w[0].date == w[1].date) {
            bail!(
                "Duplicate bar for {} on {}",
                ticker,
                format_date(pair[0].date)
            );
        }

        let len = candles.len();
        let mut dates = Vec::with_capacity(len);
        let mut open_prices = Vec::with_capacity(len);
        let mut high_prices = Vec::with_capacity(len);
        let mut low_prices = Vec::with_capacity(len);
        let mut close_prices = Vec::with_capacity(len);
        let mut volumes = Vec::with_capacity(len);

        for c in candles {
            dates.push(c.date);
            open_prices.push(c.open_price);
            high_prices.push(c.high_price);
            low_prices.push(c.low_price);
            close_prices.push(c.close_price);
            volumes.push(c.volume);
        }

        Ok(Self {
            ticker,
            dates,
            open_prices,
            high_prices,
            low_prices,
            close_prices,
            volumes,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.close_prices.iter().map(|p| p.value()).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.open_prices.iter().map(|p| p.value()).collect()
    }

    /// Row `idx` as a candle (for tables).
    pub fn candle_at(&self, idx: usize) -> Option<Candle> {
        Some(Candle::new(
            *self.dates.get(idx)?,
            *self.open_prices.get(idx)?,
            *self.high_prices.get(idx)?,
            *self.low_prices.get(idx)?,
            *self.close_prices.get(idx)?,
            *self.volumes.get(idx)?,
        ))
    }

    /// Index range of the last `n` rows.
    pub fn tail_range(&self, n: usize) -> Range<usize> {
        self.len().saturating_sub(n)..self.len()
    }
}
