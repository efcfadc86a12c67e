use {
    crate::{
        config::MARKET,
        domain::{DashboardInputs, Ticker},
        ui::{UI_TEXT, UiStyleExt},
        utils::{days_after, today_local},
    },
    eframe::egui::{ComboBox, Slider, Ui},
    egui_extras::DatePickerButton,
    strum::IntoEnumIterator,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Draws the input widgets and writes edits straight into `inputs`.
/// Returns true if anything changed this frame.
pub(crate) fn render_inputs(ui: &mut Ui, inputs: &mut DashboardInputs) -> bool {
    let before = inputs.clone();

    ui.label_subheader(&UI_TEXT.sb_select_symbol);
    ComboBox::from_id_salt("ticker_select")
        .selected_text(inputs.ticker.symbol())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for ticker in Ticker::iter() {
                ui.selectable_value(&mut inputs.ticker, ticker, ticker.symbol());
            }
        });

    ui.add_space(8.0);
    ui.label_subheader(&UI_TEXT.sb_start_date);
    ui.add(DatePickerButton::new(&mut inputs.start_date).id_salt("start_date"));
    ui.label_subheader(&UI_TEXT.sb_end_date);
    ui.add(DatePickerButton::new(&mut inputs.end_date).id_salt("end_date"));
    ui.add_space(4.0);
    ui.check_banner(&inputs.date_range_check());

    ui.add_space(8.0);
    ui.label_subheader(&UI_TEXT.sb_months);
    let slider = ui.add(Slider::new(
        &mut inputs.months,
        MARKET.inputs.min_months..=MARKET.inputs.max_months,
    ));
    if slider.changed() {
        reset_predict_date(inputs, today_local());
    }

    ui.add_space(8.0);
    ui.label_subheader(&UI_TEXT.sb_predict_date);
    ui.add(DatePickerButton::new(&mut inputs.predict_date).id_salt("predict_date"));
    ui.add_space(4.0);
    ui.check_banner(&inputs.predict_date_check());

    let changed = *inputs != before;

    #[cfg(debug_assertions)]
    if DF.log_inputs && changed {
        log::info!("Inputs changed: {:?} -> {:?}", before, inputs);
    }

    changed
}

/// Moving the horizon slider moves the predict date to the end of the new horizon.
pub(crate) fn reset_predict_date(inputs: &mut DashboardInputs, today: chrono::NaiveDate) {
    inputs.predict_date = days_after(today, inputs.period_days());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn slider_change_moves_predict_date() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut inputs = DashboardInputs::defaults_for(today);
        inputs.months = 3;
        reset_predict_date(&mut inputs, today);
        assert_eq!(inputs.predict_date, NaiveDate::from_ymd_opt(2024, 7, 30).unwrap());
        assert!(inputs.predict_date_check().is_success());
    }
}
