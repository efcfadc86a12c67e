//! Indicator window lengths.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BollingerParams {
    pub window: usize,
    /// Band distance in standard deviations.
    pub window_dev: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdParams {
    pub window_slow: usize,
    pub window_fast: usize,
    pub window_sign: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RsiParams {
    pub window: usize,
    pub overbought: f64,
    pub oversold: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorConfig {
    pub bollinger: BollingerParams,
    pub macd: MacdParams,
    pub rsi: RsiParams,
}

pub const INDICATORS: IndicatorConfig = IndicatorConfig {
    bollinger: BollingerParams {
        window: 20,
        window_dev: 2.0,
    },
    macd: MacdParams {
        window_slow: 26,
        window_fast: 12,
        window_sign: 9,
    },
    rsi: RsiParams {
        window: 14,
        overbought: 70.0,
        oversold: 30.0,
    },
};

impl Default for IndicatorConfig {
    fn default() -> Self {
        INDICATORS
    }
}
