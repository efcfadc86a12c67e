use {
    crate::{
        config::PLOT_CONFIG,
        domain::InputCheck,
        ui::{UI_CONFIG, UI_TEXT},
    },
    eframe::egui::{Color32, RichText, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub(crate) fn check_color(check: &InputCheck) -> Color32 {
    if check.is_success() {
        PLOT_CONFIG.color_success
    } else {
        PLOT_CONFIG.color_error
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn label_subheader(&mut self, text: impl Into<String>);
    fn section_heading(&mut self, text: impl Into<String>);
    fn check_banner(&mut self, check: &InputCheck);
    fn loading_indicator(&mut self);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(PLOT_CONFIG.color_text_subdued));
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn section_heading(&mut self, text: impl Into<String>) {
        self.add_space(UI_CONFIG.section_spacing);
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading));
    }

    fn check_banner(&mut self, check: &InputCheck) {
        let color = check_color(check);
        UI_CONFIG.banner_frame(color).show(self, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(check.message()).color(color));
        });
    }

    fn loading_indicator(&mut self) {
        self.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new(&UI_TEXT.sb_loading).color(PLOT_CONFIG.color_warning));
        });
    }
}
