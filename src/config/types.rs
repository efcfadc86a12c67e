//! Price and volume newtypes shared by the data and model layers.

use serde::{Deserialize, Serialize};

/// A behavioral contract for anything that behaves like a price.
pub trait PriceLike {
    fn value(&self) -> f64;

    /// Formats a price with adaptive decimals.
    fn format_price(&self) -> String {
        let price = self.value();
        if price == 0.0 {
            return "$0.00".to_string();
        }

        let abs_price = price.abs();

        if abs_price >= 1.0 {
            format!("${:.2}", price)
        } else if abs_price >= 0.01 {
            format!("${:.4}", price)
        } else {
            format!("${:.6}", price)
        }
    }
}

macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const fn new(val: f64) -> Self {
                // Absolute prices should not be negative
                let v = if val < 0.0 { 0.0 } else { val };
                Self(v)
            }
        }

        impl PriceLike for $name {
            fn value(&self) -> f64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.format_price())
            }
        }
    };
}

define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let val = self.0;
        if val >= 1_000_000_000.0 {
            write!(f, "{:.2}B", val / 1_000_000_000.0)
        } else if val >= 1_000_000.0 {
            write!(f, "{:.1}M", val / 1_000_000.0)
        } else if val >= 1_000.0 {
            write!(f, "{:.0}K", val / 1_000.0)
        } else {
            write!(f, "{:.0}", val)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_prices_clamp_to_zero() {
        assert_eq!(ClosePrice::new(-3.0).value(), 0.0);
        assert_eq!(Volume::new(-1.0).value(), 0.0);
    }

    #[test]
    fn price_formatting_is_adaptive() {
        assert_eq!(ClosePrice::new(187.456).to_string(), "$187.46");
        assert_eq!(ClosePrice::new(0.5).to_string(), "$0.5000");
        assert_eq!(ClosePrice::new(0.0).to_string(), "$0.00");
    }

    #[test]
    fn volume_formatting_uses_suffixes() {
        assert_eq!(Volume::new(52_300_000.0).to_string(), "52.3M");
        assert_eq!(Volume::new(4_200.0).to_string(), "4K");
        assert_eq!(Volume::new(1_500_000_000.0).to_string(), "1.50B");
    }
}
