//! Technical indicators over a close-price column.
//!
//! Every function returns one entry per input row; `None` marks rows inside
//! the warm-up window. Empty or too-short input never panics.

mod bollinger;
mod ema;
mod macd;
mod rsi;

pub use bollinger::{BollingerBands, bollinger_bands};
pub use ema::{ema, span_alpha, wilder_alpha};
pub use macd::{Macd, macd};
pub use rsi::rsi;
