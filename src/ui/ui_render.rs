use eframe::egui::{CentralPanel, Context, RichText, ScrollArea, SidePanel, Ui};

use crate::{
    app::App,
    config::{MARKET, PLOT_CONFIG},
    engine::DashboardData,
    models::{forecast_rows, raw_rows, recent_rows},
    ui::{
        UI_CONFIG, UI_TEXT, UiStyleExt, charts,
        sidebar::render_inputs,
        tables::render_table,
    },
};

impl App {
    /// Returns true if the user edited any input this frame.
    pub(crate) fn render_side_panel(&mut self, ctx: &Context) -> bool {
        let mut changed = false;

        SidePanel::left("inputs_panel")
            .exact_width(UI_CONFIG.side_panel_width)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ui.heading(RichText::new(&UI_TEXT.app_title).color(UI_CONFIG.colors.heading));
                ui.label_subdued(&UI_TEXT.sb_heading);
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("inputs_scroll")
                    .show(ui, |ui| {
                        changed = render_inputs(ui, &mut self.inputs);

                        ui.add_space(12.0);
                        if let Some(engine) = &self.engine {
                            if engine.is_calculating() {
                                ui.loading_indicator();
                            } else if let Some(ms) = engine.last_duration_ms() {
                                ui.label_subdued(format!("{} {}ms", UI_TEXT.sb_updated_in, ms));
                            }
                        }
                    });
            });

        changed
    }

    pub(crate) fn render_central_panel(&self, ctx: &Context) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                if let Some(err) = &self.startup_error {
                    render_fullscreen_message(ui, &UI_TEXT.error_startup_title, err, true);
                    return;
                }
                let Some(engine) = &self.engine else {
                    return;
                };

                // A failed load for the current inputs outranks older results,
                // which belong to different inputs.
                if let Some(err) = engine.last_error() {
                    render_fullscreen_message(ui, &UI_TEXT.error_load_title, err, true);
                    return;
                }

                match engine.latest() {
                    Some(data) => render_dashboard(ui, data),
                    None => render_fullscreen_message(
                        ui,
                        &format!("{} {}", UI_TEXT.ls_fetching, self.inputs.ticker),
                        &UI_TEXT.sb_loading,
                        false,
                    ),
                }
            });
    }
}

/// Charts and tables, top to bottom.
fn render_dashboard(ui: &mut Ui, data: &DashboardData) {
    let tail = MARKET.inputs.table_tail_rows;

    ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.section_heading(format!(
                "{} {}",
                data.inputs.ticker, UI_TEXT.section_raw_chart
            ));
            charts::raw_price_chart(ui, data);

            ui.section_heading(&UI_TEXT.section_raw_data);
            render_table(ui, "raw_data_table", &raw_rows(&data.series, tail));

            ui.section_heading(&UI_TEXT.section_macd);
            charts::macd_chart(ui, data);

            ui.section_heading(&UI_TEXT.section_rsi);
            charts::rsi_chart(ui, data);

            ui.section_heading(&UI_TEXT.section_bollinger);
            charts::bollinger_chart(ui, data);

            match &data.forecast {
                Ok(frame) => {
                    ui.section_heading(&UI_TEXT.section_forecast_data);
                    render_table(ui, "forecast_data_table", &forecast_rows(frame, tail));

                    ui.section_heading(format!(
                        "{} {} days",
                        UI_TEXT.section_forecast_plot, frame.periods
                    ));
                    charts::forecast_chart(ui, frame);

                    ui.section_heading(&UI_TEXT.section_components);
                    charts::components_chart(ui, frame);
                }
                Err(e) => {
                    ui.section_heading(&UI_TEXT.error_forecast_title);
                    ui.label(RichText::new(e).color(PLOT_CONFIG.color_error));
                }
            }

            ui.section_heading(&UI_TEXT.section_recent_data);
            render_table(
                ui,
                "recent_data_table",
                &recent_rows(&data.series, &data.indicators, tail),
            );
            ui.add_space(UI_CONFIG.section_spacing);
        });
}

fn render_fullscreen_message(ui: &mut Ui, title: &str, subtitle: &str, is_error: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);

        if is_error {
            ui.heading(RichText::new(title).color(PLOT_CONFIG.color_error));
        } else {
            ui.spinner();
            ui.add_space(12.0);
            ui.heading(title);
        }

        ui.add_space(6.0);

        let color = if is_error {
            PLOT_CONFIG.color_error
        } else {
            PLOT_CONFIG.color_text_neutral
        };

        ui.label(RichText::new(subtitle).color(color));
    });
}
