use {
    crate::{
        config::PLOT_CONFIG,
        engine::DashboardData,
        models::{ForecastFrame, SeasonalProfile, SeasonalityKind},
        ui::UI_TEXT,
        utils::{date_to_epoch_days, epoch_days_to_date, finite_min_max, format_date, padded_range},
    },
    chrono::NaiveDate,
    eframe::egui::{Color32, Ui},
    egui_plot::{
        GridInput, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoints, PlotUi, Points,
        Polygon,
    },
    strum::IntoEnumIterator,
};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

// Helper: a human-friendly step size (1, 2, 5, 10, 20, 50...) in days
fn calculate_adaptive_step(range: f64, target_count: f64) -> f64 {
    let raw_step = range / target_count.max(1.0);
    if raw_step <= 0.0 || !raw_step.is_finite() {
        return 1.0;
    }
    let mag = 10.0_f64.powi(raw_step.log10().floor() as i32);
    let normalized = raw_step / mag;

    let nice_step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };

    // Never finer than one day
    (nice_step * mag).max(1.0)
}

fn day_grid_spacer(input: GridInput) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    let step = calculate_adaptive_step(max - min, 6.0);
    let start = (min / step).ceil() as i64;
    let end = (max / step).floor() as i64;
    (start..=end)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}

fn date_axis_label(value: f64) -> String {
    epoch_days_to_date(value).map(format_date).unwrap_or_default()
}

/// A plot whose x axis is days since the epoch, labelled as dates.
fn date_plot(id: &str, height: f32) -> Plot<'static> {
    Plot::new(id.to_string())
        .height(height)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_grid_spacer(day_grid_spacer)
        .x_axis_formatter(|mark, _range| date_axis_label(mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{}\n{:.2}", date_axis_label(value.x), value.y)
            } else {
                format!("{}\n{}\n{:.2}", name, date_axis_label(value.x), value.y)
            }
        })
}

fn with_y_bounds(plot: Plot<'static>, columns: &[&[f64]]) -> Plot<'static> {
    match y_bounds(columns) {
        Some((lo, hi)) => plot.include_y(lo).include_y(hi),
        None => plot,
    }
}

pub(crate) fn x_values(dates: &[NaiveDate]) -> Vec<f64> {
    dates.iter().map(|d| date_to_epoch_days(*d)).collect()
}

pub(crate) fn series_points(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(x, y)| [*x, *y]).collect()
}

/// Skips warm-up gaps instead of drawing them at zero.
pub(crate) fn optional_points(xs: &[f64], ys: &[Option<f64>]) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| y.map(|y| [*x, y]))
        .collect()
}

/// Padded y range over the finite values of every column.
pub(crate) fn y_bounds(columns: &[&[f64]]) -> Option<(f64, f64)> {
    let all: Vec<f64> = columns.iter().flat_map(|c| c.iter().copied()).collect();
    let (min, max) = finite_min_max(&all)?;
    Some(padded_range(min, max, PLOT_CONFIG.plot_y_padding_pct))
}

fn flatten(col: &[Option<f64>]) -> Vec<f64> {
    col.iter().flatten().copied().collect()
}

fn line(name: &str, points: Vec<[f64; 2]>, color: Color32) -> Line<'static> {
    Line::new(name.to_string(), PlotPoints::new(points))
        .color(color)
        .width(PLOT_CONFIG.line_width)
}

/// Fills between two curves with one quad per step; a single polygon over
/// the whole band would be concave.
fn draw_band(plot_ui: &mut PlotUi, name: &str, xs: &[f64], lower: &[f64], upper: &[f64]) {
    let n = xs.len().min(lower.len()).min(upper.len());
    for i in 1..n {
        let pts = vec![
            [xs[i - 1], lower[i - 1]],
            [xs[i], lower[i]],
            [xs[i], upper[i]],
            [xs[i - 1], upper[i - 1]],
        ];
        plot_ui.polygon(
            Polygon::new(name.to_string(), PlotPoints::new(pts))
                .fill_color(PLOT_CONFIG.color_interval)
                .stroke(eframe::egui::Stroke::NONE),
        );
    }
}

pub(crate) fn raw_price_chart(ui: &mut Ui, data: &DashboardData) {
    let series = &data.series;
    let xs = x_values(&series.dates);
    let opens = series.opens();
    let closes = series.closes();

    with_y_bounds(
        date_plot("raw_price_plot", PLOT_CONFIG.main_chart_height),
        &[&opens[..], &closes[..]],
    )
    .show(ui, |plot_ui| {
        plot_ui.line(line(
            &UI_TEXT.series_open,
            series_points(&xs, &opens),
            PLOT_CONFIG.color_open,
        ));
        plot_ui.line(line(
            &UI_TEXT.series_close,
            series_points(&xs, &closes),
            PLOT_CONFIG.color_close,
        ));
    });
}

pub(crate) fn macd_chart(ui: &mut Ui, data: &DashboardData) {
    let xs = x_values(&data.series.dates);
    let macd = &data.indicators.macd;
    let mut values = flatten(macd);
    values.push(0.0);

    with_y_bounds(date_plot("macd_plot", PLOT_CONFIG.chart_height), &[&values[..]]).show(
        ui,
        |plot_ui| {
            plot_ui.line(
                line(
                    &UI_TEXT.series_macd,
                    optional_points(&xs, macd),
                    PLOT_CONFIG.color_macd,
                )
                .fill(0.0_f32),
            );
        },
    );
}

pub(crate) fn rsi_chart(ui: &mut Ui, data: &DashboardData) {
    let xs = x_values(&data.series.dates);

    date_plot("rsi_plot", PLOT_CONFIG.chart_height)
        .include_y(0.0)
        .include_y(100.0)
        .show(ui, |plot_ui| {
            for level in [RSI_OVERBOUGHT, RSI_OVERSOLD] {
                plot_ui.hline(
                    HLine::new("", level)
                        .color(PLOT_CONFIG.color_rsi_threshold)
                        .style(LineStyle::dashed_loose()),
                );
            }
            plot_ui.line(line(
                &UI_TEXT.series_rsi,
                optional_points(&xs, &data.indicators.rsi),
                PLOT_CONFIG.color_rsi,
            ));
        });
}

pub(crate) fn bollinger_chart(ui: &mut Ui, data: &DashboardData) {
    let xs = x_values(&data.series.dates);
    let closes = data.series.closes();
    let high = flatten(&data.indicators.bb_high);
    let low = flatten(&data.indicators.bb_low);

    with_y_bounds(
        date_plot("bollinger_plot", PLOT_CONFIG.chart_height),
        &[&closes[..], &high[..], &low[..]],
    )
    .show(ui, |plot_ui| {
        plot_ui.line(line(
            &UI_TEXT.series_close,
            series_points(&xs, &closes),
            PLOT_CONFIG.color_close,
        ));
        plot_ui.line(line(
            &UI_TEXT.series_bb_high,
            optional_points(&xs, &data.indicators.bb_high),
            PLOT_CONFIG.color_bb_high,
        ));
        plot_ui.line(line(
            &UI_TEXT.series_bb_low,
            optional_points(&xs, &data.indicators.bb_low),
            PLOT_CONFIG.color_bb_low,
        ));
    });
}

/// Actual points over the history, yhat over history and horizon, and the
/// uncertainty band around yhat.
pub(crate) fn forecast_chart(ui: &mut Ui, frame: &ForecastFrame) {
    let dates: Vec<NaiveDate> = frame.rows.iter().map(|r| r.ds).collect();
    let xs = x_values(&dates);
    let yhat: Vec<f64> = frame.rows.iter().map(|r| r.yhat).collect();
    let lower: Vec<f64> = frame.rows.iter().map(|r| r.yhat_lower).collect();
    let upper: Vec<f64> = frame.rows.iter().map(|r| r.yhat_upper).collect();

    with_y_bounds(
        date_plot("forecast_plot", PLOT_CONFIG.main_chart_height),
        &[&frame.actual[..], &lower[..], &upper[..]],
    )
    .show(ui, |plot_ui| {
        draw_band(plot_ui, &UI_TEXT.series_interval, &xs, &lower, &upper);
        plot_ui.line(line(
            &UI_TEXT.series_yhat,
            series_points(&xs, &yhat),
            PLOT_CONFIG.color_yhat,
        ));
        plot_ui.points(
            Points::new(
                UI_TEXT.series_actual.clone(),
                PlotPoints::new(series_points(&xs, &frame.actual)),
            )
            .color(PLOT_CONFIG.color_actual)
            .radius(PLOT_CONFIG.actual_point_radius),
        );
    });
}

/// Trend with its band, then one chart per enabled seasonality.
pub(crate) fn components_chart(ui: &mut Ui, frame: &ForecastFrame) {
    let dates: Vec<NaiveDate> = frame.rows.iter().map(|r| r.ds).collect();
    let xs = x_values(&dates);
    let trend: Vec<f64> = frame.rows.iter().map(|r| r.trend).collect();
    let lower: Vec<f64> = frame.rows.iter().map(|r| r.trend_lower).collect();
    let upper: Vec<f64> = frame.rows.iter().map(|r| r.trend_upper).collect();

    ui.label(&UI_TEXT.series_trend);
    with_y_bounds(
        date_plot("trend_component_plot", PLOT_CONFIG.component_chart_height),
        &[&lower[..], &upper[..]],
    )
    .show(ui, |plot_ui| {
        draw_band(plot_ui, &UI_TEXT.series_interval, &xs, &lower, &upper);
        plot_ui.line(line(
            &UI_TEXT.series_trend,
            series_points(&xs, &trend),
            PLOT_CONFIG.color_trend,
        ));
    });

    for kind in SeasonalityKind::iter() {
        if let Some(profile) = frame.profile(kind) {
            ui.label(kind.to_string());
            profile_chart(ui, profile);
        }
    }
}

fn profile_label_format(kind: SeasonalityKind) -> &'static str {
    match kind {
        SeasonalityKind::Weekly => "%A",
        SeasonalityKind::Yearly => "%B %d",
    }
}

fn profile_chart(ui: &mut Ui, profile: &SeasonalProfile) {
    let fmt = profile_label_format(profile.kind);
    let labels: Vec<String> = profile
        .dates
        .iter()
        .map(|d| d.format(fmt).to_string())
        .collect();
    let xs: Vec<f64> = (0..profile.values.len()).map(|i| i as f64).collect();

    with_y_bounds(
        Plot::new(format!("{}_component_plot", profile.kind))
            .height(PLOT_CONFIG.component_chart_height)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            }),
        &[&profile.values[..]],
    )
    .show(ui, |plot_ui| {
        plot_ui.line(line(
            &profile.kind.to_string(),
            series_points(&xs, &profile.values),
            PLOT_CONFIG.color_seasonal,
        ));
    });
}
