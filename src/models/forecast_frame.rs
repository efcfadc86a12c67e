use {
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum SeasonalityKind {
    #[strum(to_string = "weekly")]
    Weekly,
    #[strum(to_string = "yearly")]
    Yearly,
}

/// One forecast row in price units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    /// 0 when the seasonality is switched off
    pub weekly: f64,
    pub yearly: f64,
}

/// One seasonal cycle evaluated on consecutive days, for the components chart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonalProfile {
    pub kind: SeasonalityKind,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

/// Output of a forecast over the history plus `periods` future days.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForecastFrame {
    pub rows: Vec<ForecastRow>,
    /// Rows `0..history_len` line up with the fitted history.
    pub history_len: usize,
    pub periods: usize,
    /// Observed values, one per history row.
    pub actual: Vec<f64>,
    pub profiles: Vec<SeasonalProfile>,
}

impl ForecastFrame {
    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn future_rows(&self) -> &[ForecastRow] {
        &self.rows[self.history_len.min(self.rows.len())..]
    }

    pub fn profile(&self, kind: SeasonalityKind) -> Option<&SeasonalProfile> {
        self.profiles.iter().find(|p| p.kind == kind)
    }
}
