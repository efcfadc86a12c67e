use {
    super::messages::{DashboardData, JobRequest, JobResult},
    crate::{
        analysis::forecast::forecast_series,
        config::{FORECAST, INDICATORS},
        data::HistoryLoader,
        domain::DashboardInputs,
        models::IndicatorFrame,
        utils::AppInstant,
    },
    anyhow::{Context, Result},
    std::{
        sync::{
            Arc,
            mpsc::{Receiver, Sender},
        },
        thread,
    },
    tokio::runtime::Runtime,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Spawns the background thread that owns the loader and an async runtime
/// for the provider. Requests are processed one at a time; queued requests
/// superseded by a newer one are skipped.
pub fn spawn_worker_thread(
    rx: Receiver<JobRequest>,
    tx: Sender<JobResult>,
    mut loader: HistoryLoader,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Worker could not start its runtime: {}", e);
                return;
            }
        };

        while let Ok(req) = rx.recv() {
            let req = newest_request(req, &rx);
            let response = rt.block_on(process_request(&mut loader, req));
            if tx.send(response).is_err() {
                // UI side is gone
                break;
            }
        }
    });
}

/// Drains whatever is already queued and keeps only the newest request.
fn newest_request(first: JobRequest, rx: &Receiver<JobRequest>) -> JobRequest {
    let newest = rx.try_iter().last().unwrap_or(first);

    #[cfg(debug_assertions)]
    if DF.log_engine {
        log::info!("Worker picked job #{} for {}", newest.id, newest.inputs.ticker);
    }
    newest
}

pub async fn process_request(loader: &mut HistoryLoader, req: JobRequest) -> JobResult {
    let label = format!("Total JOB [{} #{}]", req.inputs.ticker, req.id);
    let start = AppInstant::now();

    let result = crate::trace_time!(&label, 5_000, {
        build_dashboard(loader, &req.inputs)
            .await
            .map(Arc::new)
            .map_err(|e| format!("{:#}", e))
    });

    let duration_ms = start.elapsed().as_millis();

    #[cfg(debug_assertions)]
    if DF.log_engine {
        match &result {
            Ok(data) => log::info!(
                "Job #{} {}: {} bars in {}ms (forecast {})",
                req.id,
                req.inputs.ticker,
                data.series.len(),
                duration_ms,
                if data.forecast.is_ok() { "ok" } else { "failed" }
            ),
            Err(e) => log::info!("Job #{} {} failed: {}", req.id, req.inputs.ticker, e),
        }
    }

    JobResult {
        id: req.id,
        ticker: req.inputs.ticker,
        duration_ms,
        result,
    }
}

/// Load, indicators, forecast. Only the load can fail the whole job.
pub async fn build_dashboard(
    loader: &mut HistoryLoader,
    inputs: &DashboardInputs,
) -> Result<DashboardData> {
    let series = loader
        .load_data(inputs.ticker, inputs.start_date, inputs.end_date)
        .await
        .with_context(|| {
            format!(
                "Could not load {} from {} to {}",
                inputs.ticker, inputs.start_date, inputs.end_date
            )
        })?;

    let indicators = crate::trace_time!("Indicators", 1_000, {
        IndicatorFrame::compute(&series, &INDICATORS)
    });

    let periods = usize::try_from(inputs.period_days()).unwrap_or_default();
    let forecast = crate::trace_time!("Forecast", 20_000, {
        forecast_series(&series, periods, &FORECAST).map_err(|e| e.to_string())
    });

    Ok(DashboardData {
        inputs: inputs.clone(),
        series,
        indicators,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ticker;
    use chrono::NaiveDate;
    use std::sync::mpsc;

    fn request(id: u64, ticker: Ticker) -> JobRequest {
        let mut inputs = DashboardInputs::defaults_for(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        inputs.ticker = ticker;
        JobRequest { id, inputs }
    }

    #[test]
    fn queued_requests_collapse_to_the_newest() {
        let (tx, rx) = mpsc::channel();
        tx.send(request(2, Ticker::Msft)).unwrap();
        tx.send(request(3, Ticker::Nvda)).unwrap();
        tx.send(request(4, Ticker::Amzn)).unwrap();

        let picked = newest_request(request(1, Ticker::Aapl), &rx);
        assert_eq!(picked.id, 4);
        assert_eq!(picked.inputs.ticker, Ticker::Amzn);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn lone_request_is_kept() {
        let (_tx, rx) = mpsc::channel::<JobRequest>();
        let picked = newest_request(request(7, Ticker::Tsla), &rx);
        assert_eq!(picked.id, 7);
    }
}
