use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::col;
use crate::data::stats;
use crate::state::AppState;
use crate::ui::{table, thousands};

// ---------------------------------------------------------------------------
// Dataset Details page
// ---------------------------------------------------------------------------

/// Categorical columns whose distinct-value counts are worth showing.
const CATEGORY_COLUMNS: [&str; 6] = [
    col::ARTIST,
    col::ALBUM,
    col::ALBUM_TYPE,
    col::CHANNEL,
    col::LICENSED,
    col::OFFICIAL_VIDEO,
];

/// The artist multiselect only offers the first distinct artists; the full
/// list would make the widget unusable on the real export.
const MAX_ARTIST_OPTIONS: usize = 100;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Detailed Dataset Insights");
    ui.label(
        "A deeper dive into the structure and statistics of the dataset: distributions, \
         missing values, and high-level summaries.",
    );
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            summary_section(ui, state);
            ui.separator();
            quality_section(ui, state);
            ui.separator();
            explorer_section(ui, state);
        });
}

// ---- Section 1: statistical summary ----

fn summary_section(ui: &mut Ui, state: &AppState) {
    ui.strong("Statistical Summary");
    ui.add_space(4.0);

    let table = &state.table;
    let (n_float, n_int, n_text) = table.dtype_counts();

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.set_width(200.0);
            ui.label("Dataset shape");
            ui.label(format!("· rows: {}", thousands(table.len() as i64)));
            ui.label(format!("· columns: {}", table.n_columns()));
            ui.add_space(6.0);
            ui.label("Column types");
            ui.label(format!("· float64: {n_float}"));
            ui.label(format!("· int64: {n_int}"));
            ui.label(format!("· text: {n_text}"));
        });

        ui.separator();
        describe_grid(ui, state);
    });
}

fn describe_grid(ui: &mut Ui, state: &AppState) {
    egui::Grid::new("describe_grid")
        .striped(true)
        .min_col_width(52.0)
        .show(ui, |ui: &mut Ui| {
            for header in ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
                ui.strong(header);
            }
            ui.end_row();

            for name in state.table.numeric_column_names() {
                let summary = state
                    .table
                    .numeric(name)
                    .ok()
                    .and_then(|v| stats::describe(&v));
                ui.strong(name);
                match summary {
                    Some(s) => {
                        ui.label(thousands(s.count as i64));
                        for v in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                            ui.label(format_stat(v));
                        }
                    }
                    None => {
                        for _ in 0..8 {
                            ui.label("–");
                        }
                    }
                }
                ui.end_row();
            }
        });
}

/// Large magnitudes (streams, views) read better without decimals.
fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.abs() >= 1000.0 {
        thousands(v.round() as i64)
    } else {
        format!("{v:.3}")
    }
}

// ---- Section 2: data quality & uniqueness ----

fn quality_section(ui: &mut Ui, state: &AppState) {
    ui.strong("Data Quality & Uniqueness");
    ui.add_space(4.0);

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label("Missing values per column");
            let mut any = false;
            egui::Grid::new("missing_grid").striped(true).show(ui, |ui: &mut Ui| {
                for (name, column) in state
                    .table
                    .names()
                    .iter()
                    .map(|n| (n, state.table.column(n)))
                {
                    let Ok(column) = column else { continue };
                    let missing = column.missing_count();
                    if missing > 0 {
                        any = true;
                        ui.label(name);
                        ui.label(thousands(missing as i64));
                        ui.end_row();
                    }
                }
            });
            if !any {
                ui.label("No missing values.");
            }
        });

        ui.separator();

        ui.vertical(|ui: &mut Ui| {
            ui.label("Unique values per category");
            egui::Grid::new("unique_grid").striped(true).show(ui, |ui: &mut Ui| {
                for name in CATEGORY_COLUMNS {
                    if let Ok(count) = state.table.unique_count(name) {
                        ui.label(name);
                        ui.label(thousands(count as i64));
                        ui.end_row();
                    }
                }
            });
        });
    });
}

// ---- Section 3: full data explorer ----

fn explorer_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Full Data Explorer");
    ui.label("Browse the entire dataset. Narrow it down with the artist filter.");
    ui.add_space(4.0);

    let artists = state
        .table
        .unique_text_values(col::ARTIST)
        .unwrap_or_default();
    let options: Vec<String> = artists.into_iter().take(MAX_ARTIST_OPTIONS).collect();

    let selected_count = state.details.artist_filter.len();
    let header = format!("Filter by Artist  ({selected_count} selected)");
    egui::CollapsingHeader::new(header)
        .id_salt("artist_filter")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                state.details.artist_filter.clear();
            }
            ScrollArea::vertical()
                .id_salt("artist_filter_scroll")
                .max_height(180.0)
                .show(ui, |ui: &mut Ui| {
                    for artist in &options {
                        let mut checked = state.details.artist_filter.contains(artist);
                        if ui.checkbox(&mut checked, artist).changed() {
                            if checked {
                                state.details.artist_filter.insert(artist.clone());
                            } else {
                                state.details.artist_filter.remove(artist);
                            }
                        }
                    }
                });
        });

    // Empty selection means no filter, like an empty multiselect.
    let indices: Vec<usize> = match state.table.text(col::ARTIST) {
        Ok(column) if !state.details.artist_filter.is_empty() => column
            .iter()
            .enumerate()
            .filter(|(_, a)| state.details.artist_filter.contains(*a))
            .map(|(i, _)| i)
            .collect(),
        _ => (0..state.table.len()).collect(),
    };

    ui.add_space(4.0);
    ui.label(format!("{} rows", thousands(indices.len() as i64)));
    table::show_all_columns(ui, &state.table, &indices, "explorer_table", 420.0);
}
