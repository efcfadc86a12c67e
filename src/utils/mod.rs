mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, date_to_epoch_days, date_to_epoch_secs, days_after,
    epoch_days_to_date, epoch_secs_to_date, format_date, format_duration, how_many_seconds_ago,
    now_timestamp_ms, today_local,
};

pub use maths_utils::{mean_and_stddev, padded_range, percentile_sorted};

pub(crate) use maths_utils::finite_min_max;
