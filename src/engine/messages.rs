use {
    crate::{
        domain::{DashboardInputs, Ticker},
        models::{ForecastFrame, IndicatorFrame, OhlcvTimeSeries},
    },
    std::sync::Arc,
};

/// A request to rebuild the dashboard for one set of inputs
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub id: u64,
    pub inputs: DashboardInputs,
}

/// Everything the central panel draws.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub inputs: DashboardInputs,
    pub series: Arc<OhlcvTimeSeries>,
    pub indicators: IndicatorFrame,
    /// A failed forecast still leaves the price and indicator charts usable.
    pub forecast: Result<ForecastFrame, String>,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub id: u64,
    pub ticker: Ticker,
    pub duration_ms: u128,
    pub result: Result<Arc<DashboardData>, String>,
}
