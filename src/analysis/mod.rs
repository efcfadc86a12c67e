// Indicator and forecast algorithms
pub mod forecast;
pub mod indicators;
