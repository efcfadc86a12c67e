mod charts;
mod screens;
mod sidebar;
mod styles;
mod tables;
mod ui_config;
mod ui_render;
mod ui_text;

pub(crate) use screens::render_bootstrap;

pub(crate) use styles::UiStyleExt;

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
