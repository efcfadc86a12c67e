use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

pub type AppInstant = std::time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const SECS_IN_D: i64 = 24 * 60 * 60;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

// Time Helper functions

/// Midnight UTC of `date` as epoch seconds.
pub fn date_to_epoch_secs(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Calendar date (UTC) of an epoch-seconds timestamp.
pub fn epoch_secs_to_date(epoch_sec: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch_sec, 0).map(|dt| dt.date_naive())
}

/// Days since 1970-01-01. Used as the plot x axis and the seasonality time base.
pub fn date_to_epoch_days(date: NaiveDate) -> f64 {
    date_to_epoch_secs(date) as f64 / TimeUtils::SECS_IN_D as f64
}

pub fn epoch_days_to_date(days: f64) -> Option<NaiveDate> {
    epoch_secs_to_date((days * TimeUtils::SECS_IN_D as f64).round() as i64)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_after(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    (now_timestamp_ms() - past_timestamp_ms) / TimeUtils::MS_IN_S
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    format!("{}d", days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_round_trip_is_stable() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let days = date_to_epoch_days(date);
        assert_eq!(epoch_days_to_date(days), Some(date));
        assert_eq!(epoch_days_to_date(days + 0.4), Some(date));
    }

    #[test]
    fn epoch_origin_is_day_zero() {
        let origin = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_epoch_secs(origin), 0);
        assert_eq!(date_to_epoch_days(origin), 0.0);
    }

    #[test]
    fn format_duration_picks_largest_unit() {
        assert_eq!(format_duration(12_000), "12s");
        assert_eq!(format_duration(3 * TimeUtils::MS_IN_MIN), "3m");
        assert_eq!(format_duration(5 * TimeUtils::MS_IN_H), "5h");
        assert_eq!(format_duration(2 * TimeUtils::MS_IN_D), "2d");
    }
}
