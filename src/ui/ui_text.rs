use std::sync::LazyLock;

pub struct UiText {
    pub app_title: String,

    // --- Sidebar ---
    pub sb_heading: String,
    pub sb_select_symbol: String,
    pub sb_start_date: String,
    pub sb_end_date: String,
    pub sb_months: String,
    pub sb_predict_date: String,
    pub sb_loading: String,
    pub sb_updated_in: String,

    // --- Central panel sections ---
    pub section_raw_chart: String,
    pub section_raw_data: String,
    pub section_macd: String,
    pub section_rsi: String,
    pub section_bollinger: String,
    pub section_forecast_data: String,
    pub section_forecast_plot: String,
    pub section_components: String,
    pub section_recent_data: String,

    // --- Plot series ---
    pub series_open: String,
    pub series_close: String,
    pub series_bb_high: String,
    pub series_bb_low: String,
    pub series_macd: String,
    pub series_rsi: String,
    pub series_actual: String,
    pub series_yhat: String,
    pub series_interval: String,
    pub series_trend: String,

    // --- Loading screen ---
    pub ls_title: String,
    pub ls_fetching: String,

    // --- Errors ---
    pub error_load_title: String,
    pub error_forecast_title: String,
    pub error_startup_title: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Stock Dashboard".to_string(),

    sb_heading: "Inputs".to_string(),
    sb_select_symbol: "Select one symbol".to_string(),
    sb_start_date: "Start date".to_string(),
    sb_end_date: "End date".to_string(),
    sb_months: "Months of prediction:".to_string(),
    sb_predict_date: "Predict date".to_string(),
    sb_loading: "Loading data...".to_string(),
    sb_updated_in: "Updated in".to_string(),

    section_raw_chart: "Raw price".to_string(),
    section_raw_data: "Raw data".to_string(),
    section_macd: "MACD".to_string(),
    section_rsi: "RSI".to_string(),
    section_bollinger: "Bollinger Bands".to_string(),
    section_forecast_data: "Forecast data".to_string(),
    section_forecast_plot: "Forecast plot for".to_string(),
    section_components: "Forecast components".to_string(),
    section_recent_data: "Recent data".to_string(),

    series_open: "stock_open".to_string(),
    series_close: "stock_close".to_string(),
    series_bb_high: "bb_h".to_string(),
    series_bb_low: "bb_l".to_string(),
    series_macd: "macd".to_string(),
    series_rsi: "rsi".to_string(),
    series_actual: "actual".to_string(),
    series_yhat: "yhat".to_string(),
    series_interval: "uncertainty interval".to_string(),
    series_trend: "trend".to_string(),

    ls_title: "Stock Dashboard".to_string(),
    ls_fetching: "Fetching daily history for".to_string(),

    error_load_title: "Could not load data".to_string(),
    error_forecast_title: "Forecast failed".to_string(),
    error_startup_title: "Startup failed".to_string(),
});
