use eframe::egui::{Color32, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
}

#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_width: f32,
    /// Rows shown by every "last N rows" table
    pub table_row_height: f32,
    pub table_min_col_width: f32,
    pub section_spacing: f32,
}

pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::LIGHT_GRAY,
        heading: Color32::WHITE,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(18, 18, 22),
        side_panel: Color32::from_rgb(30, 30, 36),
    },
    side_panel_width: 240.0,
    table_row_height: 18.0,
    table_min_col_width: 70.0,
    section_spacing: 16.0,
};

impl UiConfig {
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(10),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin {
                left: 8,
                right: 12,
                top: 8,
                bottom: 0,
            },
            ..Default::default()
        }
    }

    /// Banner frame for the sidebar date checks
    pub fn banner_frame(&self, color: Color32) -> Frame {
        Frame {
            fill: color.linear_multiply(0.15),
            stroke: Stroke::new(1.0, color),
            inner_margin: Margin::same(6),
            ..Default::default()
        }
    }
}
