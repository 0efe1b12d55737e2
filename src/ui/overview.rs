use eframe::egui::{self, RichText, Ui};

use crate::data::model::col;
use crate::data::stats;
use crate::state::AppState;
use crate::ui::{table, thousands};

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

const SAMPLE_COLUMNS: [&str; 7] = [
    col::TRACK,
    col::ARTIST,
    col::ALBUM,
    col::STREAM,
    col::DANCEABILITY,
    col::ENERGY,
    col::VALENCE,
];

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Spotify & YouTube Data Insights");
    ui.label(
        "Welcome to this data analysis project. We explore a dataset containing the top \
         songs from various artists on Spotify and their corresponding performance on \
         YouTube. This overview provides a quick glimpse into the key metrics of the \
         dataset; for personal recommendations, visit the Find Your Song page.",
    );
    ui.separator();

    ui.strong("Data Set Overview");
    ui.add_space(4.0);
    metric_row(ui, state);

    ui.separator();
    ui.strong("Explore the Data");
    ui.add_space(4.0);
    hint_row(ui);

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Random Sample");
        if ui.small_button("Resample").clicked() {
            state.resample();
        }
    });
    ui.add_space(4.0);
    let sample = state.overview.sample.clone();
    table::show_rows(ui, &state.table, &sample, &SAMPLE_COLUMNS, "overview_sample", 260.0);
}

fn metric_row(ui: &mut Ui, state: &AppState) {
    let mean_of = |name: &str| {
        state
            .table
            .numeric(name)
            .ok()
            .and_then(|v| stats::describe(&v))
            .map(|s| s.mean)
    };
    let energy = mean_of(col::ENERGY);
    let dance = mean_of(col::DANCEABILITY);
    let tempo = mean_of(col::TEMPO);

    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total Songs",
            thousands(state.table.len() as i64),
        );
        metric_card(&mut cols[1], "Avg Energy", format_mean(energy));
        metric_card(&mut cols[2], "Avg Danceability", format_mean(dance));
        metric_card(&mut cols[3], "Avg BPM", format_mean(tempo));
    });
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
    }
}

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

fn hint_row(ui: &mut Ui) {
    ui.columns(3, |cols: &mut [Ui]| {
        hint_card(
            &mut cols[0],
            "In-depth Analysis",
            "Check out Dataset Details for comprehensive stats.",
        );
        hint_card(
            &mut cols[1],
            "Visual Insights",
            "Visualize distributions in Visual Analysis.",
        );
        hint_card(
            &mut cols[2],
            "Correlations",
            "Find relationships between metrics in Correlation Analysis.",
        );
    });
}

fn hint_card(ui: &mut Ui, title: &str, body: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.strong(title);
        ui.label(body);
    });
}
