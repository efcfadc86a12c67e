#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // Windows release: hide console window
use {
    clap::Parser,
    eframe::NativeOptions,
    std::{panic, path::PathBuf},
    stock_scope::{Cli, PERSISTENCE, run_app},
};

fn main() -> eframe::Result {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("stock_scope"), my_code_level)
        .init();

    let args = Cli::parse();
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(PERSISTENCE.app.state_path)),
        viewport: eframe::egui::ViewportBuilder::default()
            .with_maximized(true)
            .with_title("Stock Scope - Indicators and Forecasts"),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Scope",
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, args)))),
    )
}
