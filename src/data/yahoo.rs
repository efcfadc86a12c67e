use {
    crate::{
        config::{ClosePrice, HighPrice, LowPrice, MARKET, OpenPrice, Volume},
        data::MarketDataProvider,
        domain::{Candle, Ticker},
        utils::{date_to_epoch_secs, epoch_secs_to_date},
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::NaiveDate,
    reqwest::Client,
    serde::Deserialize,
    std::{error::Error, fmt, time::Duration},
};

#[cfg(debug_assertions)]
use crate::config::DF;

// Chart endpoint response, only the fields we read.
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, PartialEq)]
pub enum MarketDataError {
    Api { code: String, description: String },
    EmptyResult,
    MalformedResponse(String),
    Request(String),
}

impl fmt::Display for MarketDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarketDataError::Api { code, description } => {
                write!(f, "Market data API error: {} - {}", code, description)
            }
            MarketDataError::EmptyResult => write!(f, "No price data returned for this range"),
            MarketDataError::MalformedResponse(msg) => {
                write!(f, "Malformed market data response: {}", msg)
            }
            MarketDataError::Request(msg) => write!(f, "Market data request failed: {}", msg),
        }
    }
}

impl Error for MarketDataError {}

/// Turns a chart response body into candles. Rows with a null OHLC field
/// (halted days) are skipped; a null volume counts as 0.
pub fn parse_chart_response(body: &str) -> Result<Vec<Candle>, MarketDataError> {
    let response: YahooResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::MalformedResponse(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(MarketDataError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or(MarketDataError::EmptyResult)?;

    let Some(timestamps) = result.timestamp else {
        return Err(MarketDataError::EmptyResult);
    };
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::MalformedResponse("missing quote block".to_string()))?;

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let field = |col: &Vec<Option<f64>>| col.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        ) else {
            continue;
        };
        let Some(date) = epoch_secs_to_date(*ts) else {
            return Err(MarketDataError::MalformedResponse(format!(
                "bad timestamp {}",
                ts
            )));
        };
        candles.push(Candle::new(
            date,
            OpenPrice::new(open),
            HighPrice::new(high),
            LowPrice::new(low),
            ClosePrice::new(close),
            Volume::new(field(&quote.volume).unwrap_or(0.0)),
        ));
    }

    if candles.is_empty() {
        return Err(MarketDataError::EmptyResult);
    }
    Ok(candles)
}

pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(MARKET.client.user_agent)
            .timeout(Duration::from_millis(MARKET.client.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn chart_url(ticker: Ticker, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history",
            MARKET.client.chart_base_url,
            ticker.symbol(),
            date_to_epoch_secs(start),
            date_to_epoch_secs(end)
        )
    }

    async fn fetch_body(&self, url: &str) -> Result<String, MarketDataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::Request(e.to_string()))?;
        // Error statuses still carry a chart.error body worth parsing
        response
            .text()
            .await
            .map_err(|e| MarketDataError::Request(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn signature(&self) -> &'static str {
        "Yahoo API"
    }

    async fn fetch_daily(
        &self,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>> {
        let url = Self::chart_url(ticker, start, end);
        let mut attempt = 0;

        loop {
            #[cfg(debug_assertions)]
            if DF.log_provider {
                log::info!("GET {} (attempt {})", url, attempt + 1);
            }

            match self.fetch_body(&url).await {
                Ok(body) => {
                    let candles = parse_chart_response(&body)
                        .with_context(|| format!("Yahoo chart query failed for {}", ticker))?;

                    #[cfg(debug_assertions)]
                    if DF.log_provider {
                        log::info!("{}: {} daily bars received", ticker, candles.len());
                    }
                    return Ok(candles);
                }
                Err(e) if attempt < MARKET.client.retries => {
                    attempt += 1;
                    log::warn!("{} request failed ({}), retrying...", ticker, e);
                    tokio::time::sleep(Duration::from_millis(
                        MARKET.client.backoff_ms * attempt as u64,
                    ))
                    .await;
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Yahoo API call failed for {}", ticker)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriceLike;

    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1709821800, 1709908200, 1710163800],
                "indicators": {
                    "quote": [{
                        "open":   [169.15, null,   172.94],
                        "high":   [170.73, 173.70, 174.38],
                        "low":    [168.49, 168.94, 172.05],
                        "close":  [169.00, 170.73, 172.75],
                        "volume": [71765100, 76114600, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn drops_rows_with_missing_prices() {
        let candles = parse_chart_response(BODY).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(candles[1].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(candles[1].close_price.value(), 172.75);
        assert_eq!(candles[1].volume.value(), 0.0);
    }

    #[test]
    fn reports_api_errors() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert_eq!(
            parse_chart_response(body).unwrap_err(),
            MarketDataError::Api {
                code: "Not Found".to_string(),
                description: "No data found, symbol may be delisted".to_string()
            }
        );
    }

    #[test]
    fn empty_range_is_an_error() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert_eq!(
            parse_chart_response(body).unwrap_err(),
            MarketDataError::EmptyResult
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_chart_response("<html>rate limited</html>"),
            Err(MarketDataError::MalformedResponse(_))
        ));
    }

    #[test]
    fn url_has_epoch_bounds() {
        let url = YahooProvider::chart_url(
            Ticker::Msft,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        assert!(url.ends_with("/MSFT?period1=1704067200&period2=1704153600&interval=1d&events=history"));
    }
}
