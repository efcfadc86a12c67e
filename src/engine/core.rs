use {
    super::{
        messages::{DashboardData, JobRequest, JobResult},
        worker,
    },
    crate::{data::HistoryLoader, domain::DashboardInputs},
    std::sync::{
        Arc,
        mpsc::{Receiver, Sender, channel},
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub struct DashboardEngine {
    job_tx: Sender<JobRequest>,     // UI writes to this
    result_rx: Receiver<JobResult>, // UI reads from this

    /// Id of the most recent request. Results with any other id are stale.
    latest_id: u64,
    pending: bool,
    last_submitted: Option<DashboardInputs>,

    latest: Option<Arc<DashboardData>>,
    last_error: Option<String>,
    last_duration_ms: Option<u128>,
}

impl DashboardEngine {
    /// Spawns the worker thread that owns `loader`.
    pub fn new(loader: HistoryLoader) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();
        worker::spawn_worker_thread(job_rx, result_tx, loader);
        Self::with_channels(job_tx, result_rx)
    }

    fn with_channels(job_tx: Sender<JobRequest>, result_rx: Receiver<JobResult>) -> Self {
        Self {
            job_tx,
            result_rx,
            latest_id: 0,
            pending: false,
            last_submitted: None,
            latest: None,
            last_error: None,
            last_duration_ms: None,
        }
    }

    /// True if `inputs` differ from the last submission in a way that
    /// changes the data or forecast.
    pub fn needs_submit(&self, inputs: &DashboardInputs) -> bool {
        self.last_submitted
            .as_ref()
            .is_none_or(|prev| prev.requires_recompute(inputs))
    }

    /// Queues a job and returns its id. Earlier jobs still queued are skipped
    /// by the worker; results of any that already ran are discarded.
    pub fn submit(&mut self, inputs: DashboardInputs) -> u64 {
        self.latest_id += 1;
        let id = self.latest_id;

        #[cfg(debug_assertions)]
        if DF.log_engine {
            log::info!(
                "Submitting job #{}: {} {}..{} ({} days)",
                id,
                inputs.ticker,
                inputs.start_date,
                inputs.end_date,
                inputs.period_days()
            );
        }

        self.last_submitted = Some(inputs.clone());
        match self.job_tx.send(JobRequest { id, inputs }) {
            Ok(()) => self.pending = true,
            Err(_) => {
                self.pending = false;
                self.last_error = Some("Background worker is not running".to_string());
            }
        }
        id
    }

    /// Drains finished jobs. Returns true if the latest job completed.
    pub fn update(&mut self) -> bool {
        let mut accepted = false;
        while let Ok(result) = self.result_rx.try_recv() {
            if result.id != self.latest_id {
                #[cfg(debug_assertions)]
                if DF.log_engine {
                    log::info!(
                        "Dropping stale result #{} for {} (latest #{})",
                        result.id,
                        result.ticker,
                        self.latest_id
                    );
                }
                continue;
            }

            self.pending = false;
            self.last_duration_ms = Some(result.duration_ms);
            match result.result {
                Ok(data) => {
                    self.latest = Some(data);
                    self.last_error = None;
                }
                Err(e) => {
                    log::error!("Job #{} for {} failed: {}", result.id, result.ticker, e);
                    self.last_error = Some(e);
                }
            }
            accepted = true;
        }
        accepted
    }

    pub fn is_calculating(&self) -> bool {
        self.pending
    }

    pub fn latest(&self) -> Option<&Arc<DashboardData>> {
        self.latest.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_duration_ms(&self) -> Option<u128> {
        self.last_duration_ms
    }
}
