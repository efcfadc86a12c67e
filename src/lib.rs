#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries)
pub use app::App;
pub use config::PERSISTENCE;
pub use domain::Ticker;
pub use models::OhlcvTimeSeries;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use API as primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Start on this ticker instead of the last one used
    #[arg(long)]
    pub ticker: Option<Ticker>,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
