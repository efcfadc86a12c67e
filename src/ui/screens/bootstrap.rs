use {
    crate::{
        app::BootstrapState,
        config::PLOT_CONFIG,
        ui::UI_TEXT,
        utils::{format_duration, now_timestamp_ms},
    },
    eframe::egui::{CentralPanel, Context, RichText},
};

pub(crate) fn render_bootstrap(ctx: &Context, state: &BootstrapState) {
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading(
                RichText::new(&UI_TEXT.ls_title)
                    .size(24.0)
                    .strong()
                    .color(PLOT_CONFIG.color_warning),
            );
            ui.add_space(20.0);
            ui.spinner();
            ui.add_space(12.0);
            ui.label(
                RichText::new(format!("{} {}", UI_TEXT.ls_fetching, state.ticker))
                    .italics()
                    .color(PLOT_CONFIG.color_text_neutral),
            );
            let elapsed = now_timestamp_ms() - state.started_ms;
            ui.label(
                RichText::new(format_duration(elapsed))
                    .small()
                    .color(PLOT_CONFIG.color_text_subdued),
            );
        });
    });
}
