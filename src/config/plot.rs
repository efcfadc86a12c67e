//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Height of each indicator chart in the central scroll area
    pub chart_height: f32,
    /// Taller chart used for the raw price and forecast plots
    pub main_chart_height: f32,
    /// Height of each forecast component chart
    pub component_chart_height: f32,

    pub plot_y_padding_pct: f64, // Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)

    // --- RAW PRICE ---
    pub color_open: Color32,
    pub color_close: Color32,

    // --- BOLLINGER ---
    pub color_bb_high: Color32,
    pub color_bb_low: Color32,

    // --- MACD ---
    pub color_macd: Color32,

    // --- RSI ---
    pub color_rsi: Color32,
    pub color_rsi_threshold: Color32,

    // --- FORECAST ---
    pub color_actual: Color32,
    pub color_yhat: Color32,
    pub color_interval: Color32,
    pub color_trend: Color32,
    pub color_seasonal: Color32,
    pub actual_point_radius: f32,
    pub line_width: f32,

    // --- SEMANTIC COLORS ---
    pub color_success: Color32,
    pub color_error: Color32,
    pub color_warning: Color32,
    pub color_text_neutral: Color32,
    pub color_text_subdued: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    chart_height: 220.0,
    main_chart_height: 320.0,
    component_chart_height: 180.0,

    plot_y_padding_pct: 0.05,

    color_open: Color32::from_rgb(99, 110, 250),
    color_close: Color32::from_rgb(239, 85, 59),

    color_bb_high: Color32::from_rgb(0, 204, 150),
    color_bb_low: Color32::from_rgb(171, 99, 250),

    color_macd: Color32::from_rgb(99, 110, 250),

    color_rsi: Color32::from_rgb(255, 161, 90),
    color_rsi_threshold: Color32::from_gray(110),

    color_actual: Color32::from_gray(20),
    color_yhat: Color32::from_rgb(0, 114, 178),
    color_interval: Color32::from_rgba_premultiplied(0, 57, 89, 90),
    color_trend: Color32::from_rgb(0, 114, 178),
    color_seasonal: Color32::from_rgb(0, 114, 178),
    actual_point_radius: 2.0,
    line_width: 1.5,

    color_success: Color32::from_rgb(100, 200, 100),
    color_error: Color32::from_rgb(255, 80, 80),
    color_warning: Color32::from_rgb(255, 215, 0),
    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,
};
