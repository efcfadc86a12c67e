// src/app/state.rs

use crate::{domain::Ticker, utils::now_timestamp_ms};

#[derive(Clone)]
pub(crate) struct RunningState;

pub(crate) enum AppState {
    Bootstrapping(BootstrapState),
    Running(RunningState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Bootstrapping(BootstrapState::default())
    }
}

/// First job in flight. Nothing to draw yet except the loading screen.
#[derive(Default, Clone)]
pub(crate) struct BootstrapState {
    pub(crate) ticker: Ticker,
    pub(crate) started_ms: i64,
}

impl BootstrapState {
    pub(crate) fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            started_ms: now_timestamp_ms(),
        }
    }
}
