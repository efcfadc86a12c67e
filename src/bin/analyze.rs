//! Headless dashboard: fetch, indicators and forecast for one ticker,
//! printed as terminal tables.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use strum::IntoEnumIterator;
use tabled::Table;

use stock_scope::{
    Ticker,
    analysis::forecast::ForecastModel,
    config::{FORECAST, MARKET},
    data::HistoryLoader,
    domain::DashboardInputs,
    engine::build_dashboard,
    models::{SeasonalityKind, forecast_rows, indicator_rows, raw_rows},
    utils::{days_after, today_local},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the stock dashboard tables for one ticker")]
struct Args {
    /// One of AAPL, MSFT, NVDA, TSLA, GOOG, AMZN
    #[arg(short, long, default_value = "AAPL")]
    ticker: Ticker,

    /// First day of history (YYYY-MM-DD). Defaults to 100 days before --end
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Last day of history (YYYY-MM-DD). Defaults to today
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Forecast horizon in months of 30 days
    #[arg(short, long, default_value = "1")]
    months: u32,

    /// Rows shown per table
    #[arg(long, default_value_t = MARKET.inputs.table_tail_rows)]
    rows: usize,

    /// Use API as primary source instead of the local cache
    #[arg(long)]
    prefer_api: bool,
}

impl Args {
    fn inputs(&self) -> DashboardInputs {
        let end = self.end.unwrap_or_else(today_local);
        let mut inputs = DashboardInputs::defaults_for(end);
        inputs.ticker = self.ticker;
        inputs.end_date = end;
        if let Some(start) = self.start {
            inputs.start_date = start;
        }
        inputs.months = self.months;
        let mut inputs = inputs.sanitized();
        inputs.predict_date = days_after(end, inputs.period_days());
        inputs
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let inputs = args.inputs();

    let range_check = inputs.date_range_check();
    if !range_check.is_success() {
        anyhow::bail!("{}", range_check.message());
    }

    log::info!(
        "Analyzing {} from {} to {}, {} day horizon",
        inputs.ticker,
        inputs.start_date,
        inputs.end_date,
        inputs.period_days()
    );

    let mut loader = HistoryLoader::yahoo(args.prefer_api)?;
    let data = build_dashboard(&mut loader, &inputs)
        .await
        .context("Dashboard build failed")?;

    println!("\nRaw data ({})", data.inputs.ticker);
    println!("{}", Table::new(raw_rows(&data.series, args.rows)));

    println!("\nIndicators");
    println!(
        "{}",
        Table::new(indicator_rows(&data.series, &data.indicators, args.rows))
    );

    match &data.forecast {
        Ok(frame) => {
            println!("\nForecast data ({} days)", frame.periods);
            println!("{}", Table::new(forecast_rows(frame, args.rows)));
        }
        Err(e) => log::error!("Forecast failed: {}", e),
    }

    // Refit for the model summary; the frame above does not carry it
    if let Ok(model) = ForecastModel::fit(&data.series.dates, &data.series.closes(), &FORECAST) {
        let enabled: Vec<String> = SeasonalityKind::iter()
            .filter(|k| model.has_seasonality(*k))
            .map(|k| k.to_string())
            .collect();
        println!(
            "\nNoise sigma: {:.4} | Seasonalities: {}",
            model.sigma(),
            if enabled.is_empty() {
                "none".to_string()
            } else {
                enabled.join(", ")
            }
        );
    }

    Ok(())
}
