use {
    crate::ui::UI_CONFIG,
    eframe::egui::{RichText, Ui},
    egui_extras::{Column, TableBuilder},
    tabled::Tabled,
};

/// Renders rows of any `Tabled` type with the same headers and cell text
/// the CLI prints.
pub(crate) fn render_table<T: Tabled>(ui: &mut Ui, id_salt: &str, rows: &[T]) {
    let headers = T::headers();

    ui.push_id(id_salt, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(
                Column::auto().at_least(UI_CONFIG.table_min_col_width),
                headers.len(),
            )
            .header(UI_CONFIG.table_row_height + 2.0, |mut header| {
                for h in &headers {
                    header.col(|ui| {
                        ui.label(RichText::new(h.as_ref()).strong());
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(UI_CONFIG.table_row_height, |mut table_row| {
                        for cell in row.fields() {
                            table_row.col(|ui| {
                                ui.monospace(cell.as_ref());
                            });
                        }
                    });
                }
            });
    });
}
