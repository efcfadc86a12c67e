use {
    serde::{Deserialize, Serialize},
    strum_macros::{AsRefStr, Display, EnumIter, EnumString},
};

/// Symbols offered by the ticker selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Default,
)]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    #[default]
    #[strum(serialize = "AAPL")]
    Aapl,
    #[strum(serialize = "MSFT")]
    Msft,
    #[strum(serialize = "NVDA")]
    Nvda,
    #[strum(serialize = "TSLA")]
    Tsla,
    #[strum(serialize = "GOOG")]
    Goog,
    #[strum(serialize = "AMZN")]
    Amzn,
}

impl Ticker {
    /// The exchange symbol sent to the provider.
    pub fn symbol(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn selector_order_and_symbols() {
        let symbols: Vec<String> = Ticker::iter().map(|t| t.to_string()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "NVDA", "TSLA", "GOOG", "AMZN"]);
        assert_eq!(Ticker::default(), Ticker::Aapl);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Ticker::from_str("nvda"), Ok(Ticker::Nvda));
        assert_eq!(Ticker::from_str("GOOG").map(|t| t.symbol().to_string()), Ok("GOOG".to_string()));
        assert!(Ticker::from_str("IBM").is_err());
    }
}
