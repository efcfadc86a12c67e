// Domain types and value objects
mod candle;
mod inputs;
mod ticker;

// Re-export commonly used types to the world
pub use candle::Candle;
pub use ticker::Ticker;
pub use inputs::{DashboardInputs, InputCheck, check_date_range, check_predict_date, period_days};
