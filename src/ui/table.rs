use eframe::egui::Ui;
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::TrackTable;

// ---------------------------------------------------------------------------
// Shared scrollable data table
// ---------------------------------------------------------------------------

/// Render the given rows of the dataset as a striped, scrollable table.
/// Columns not present in the table are silently skipped.
pub fn show_rows(
    ui: &mut Ui,
    table: &TrackTable,
    indices: &[usize],
    columns: &[&str],
    salt: &str,
    max_height: f32,
) {
    let resolved: Vec<(&str, usize)> = columns
        .iter()
        .filter_map(|name| table.column_index(name).map(|i| (*name, i)))
        .collect();
    if resolved.is_empty() {
        ui.label("No columns to display.");
        return;
    }

    ui.push_id(salt, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(TableColumn::auto().at_least(70.0), resolved.len())
            .max_scroll_height(max_height)
            .header(20.0, |mut header| {
                for (name, _) in &resolved {
                    header.col(|ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, indices.len(), |mut row| {
                    let record = indices[row.index()];
                    for (_, col_idx) in &resolved {
                        let text = table.column_at(*col_idx).value_text(record);
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}

/// Render every column of the dataset for the given rows.
pub fn show_all_columns(
    ui: &mut Ui,
    table: &TrackTable,
    indices: &[usize],
    salt: &str,
    max_height: f32,
) {
    let names: Vec<&str> = table.names().iter().map(String::as_str).collect();
    show_rows(ui, table, indices, &names, salt, max_height);
}
