use {
    crate::{
        config::MARKET,
        domain::Ticker,
        utils::{days_after, format_date},
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// Everything the sidebar collects. A change to any field except
/// `predict_date` means a new data/forecast job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DashboardInputs {
    pub ticker: Ticker,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub months: u32,
    /// Purely cosmetic: checked against `end_date`, never drives the forecast.
    pub predict_date: NaiveDate,
}

impl DashboardInputs {
    pub fn defaults_for(today: NaiveDate) -> Self {
        let months = MARKET.inputs.min_months;
        Self {
            ticker: Ticker::default(),
            start_date: days_after(today, -MARKET.inputs.lookback_days),
            end_date: today,
            months,
            predict_date: days_after(today, period_days(months)),
        }
    }

    /// Forecast horizon in calendar days.
    pub fn period_days(&self) -> i64 {
        period_days(self.months)
    }

    /// Clamps `months` into the slider range.
    pub fn sanitized(mut self) -> Self {
        self.months = self
            .months
            .clamp(MARKET.inputs.min_months, MARKET.inputs.max_months);
        self
    }

    /// True when `other` needs a fresh fetch/forecast compared to `self`.
    pub fn requires_recompute(&self, other: &DashboardInputs) -> bool {
        self.ticker != other.ticker
            || self.start_date != other.start_date
            || self.end_date != other.end_date
            || self.months != other.months
    }

    pub fn date_range_check(&self) -> InputCheck {
        check_date_range(self.start_date, self.end_date)
    }

    pub fn predict_date_check(&self) -> InputCheck {
        check_predict_date(self.end_date, self.predict_date)
    }
}

pub fn period_days(months: u32) -> i64 {
    months as i64 * MARKET.inputs.days_per_month
}

/// A sidebar banner. Presentational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCheck {
    Success(String),
    Error(String),
}

impl InputCheck {
    pub fn is_success(&self) -> bool {
        matches!(self, InputCheck::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            InputCheck::Success(msg) | InputCheck::Error(msg) => msg,
        }
    }
}

pub fn check_date_range(start: NaiveDate, end: NaiveDate) -> InputCheck {
    if start < end {
        InputCheck::Success(format!(
            "Start date:`{}`\n\nEnd date:`{}`",
            format_date(start),
            format_date(end)
        ))
    } else {
        InputCheck::Error("Error: End date must fall after start date.".to_string())
    }
}

pub fn check_predict_date(end: NaiveDate, predict: NaiveDate) -> InputCheck {
    if predict > end {
        InputCheck::Success(format!(
            "End date:`{}`\n\nPredict date:`{}`",
            format_date(end),
            format_date(predict)
        ))
    } else {
        InputCheck::Error("Error: Predict date must fall after end date.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn start_before_end_is_success() {
        let check = check_date_range(d(2024, 1, 1), d(2024, 4, 1));
        assert!(check.is_success());
        assert!(check.message().contains("2024-01-01"));
        assert!(check.message().contains("2024-04-01"));
        assert_eq!(
            check.message(),
            "Start date:`2024-01-01`\n\nEnd date:`2024-04-01`"
        );
    }

    #[test]
    fn equal_or_reversed_dates_are_errors() {
        assert!(!check_date_range(d(2024, 4, 1), d(2024, 4, 1)).is_success());
        assert_eq!(
            check_date_range(d(2024, 5, 1), d(2024, 4, 1)),
            InputCheck::Error("Error: End date must fall after start date.".to_string())
        );
    }

    #[test]
    fn predict_date_must_be_strictly_after_end() {
        assert_eq!(
            check_predict_date(d(2024, 4, 1), d(2024, 4, 2)),
            InputCheck::Success("End date:`2024-04-01`\n\nPredict date:`2024-04-02`".to_string())
        );
        assert!(!check_predict_date(d(2024, 4, 1), d(2024, 4, 1)).is_success());
        assert!(!check_predict_date(d(2024, 4, 1), d(2024, 3, 1)).is_success());
    }

    #[test]
    fn defaults_follow_today() {
        let today = d(2024, 6, 15);
        let inputs = DashboardInputs::defaults_for(today);
        assert_eq!(inputs.ticker, Ticker::Aapl);
        assert_eq!(inputs.end_date, today);
        assert_eq!(inputs.start_date, d(2024, 3, 7));
        assert_eq!(inputs.months, 1);
        assert_eq!(inputs.period_days(), 30);
        assert_eq!(inputs.predict_date, d(2024, 7, 15));
        assert!(inputs.date_range_check().is_success());
        assert!(inputs.predict_date_check().is_success());
    }

    #[test]
    fn predict_date_change_does_not_require_recompute() {
        let base = DashboardInputs::defaults_for(d(2024, 6, 15));
        let mut moved = base.clone();
        moved.predict_date = d(2025, 1, 1);
        assert!(!base.requires_recompute(&moved));
        moved.months = 3;
        assert!(base.requires_recompute(&moved));
    }

    #[test]
    fn sanitize_clamps_months() {
        let mut inputs = DashboardInputs::defaults_for(d(2024, 6, 15));
        inputs.months = 42;
        assert_eq!(inputs.clone().sanitized().months, 6);
        inputs.months = 0;
        assert_eq!(inputs.sanitized().months, 1);
    }
}
