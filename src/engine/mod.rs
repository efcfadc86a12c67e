mod core;
mod messages;
mod worker;

pub use core::DashboardEngine;

pub use messages::{DashboardData, JobRequest, JobResult};

pub use worker::{build_dashboard, process_request};
