use eframe::egui::{self, Color32, Slider, Ui};

use crate::data::filter::{self, DanceLevel, EnergyLevel, Mood};
use crate::data::model::col;
use crate::state::AppState;
use crate::ui::{table, thousands};

// ---------------------------------------------------------------------------
// Find Your Song page
// ---------------------------------------------------------------------------

const RESULT_COLUMNS: [&str; 7] = [
    col::TRACK,
    col::ARTIST,
    col::ALBUM,
    col::STREAM,
    col::DANCEABILITY,
    col::ENERGY,
    col::VALENCE,
];

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Your Personal Song Recommendations");
    ui.label(
        "Don't know what to listen to right now? Adjust the filters below to match your \
         mood, and we'll find the perfect tracks for you!",
    );
    ui.separator();

    egui::CollapsingHeader::new("Filter Options")
        .id_salt("find_song_filters")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            filter_widgets(ui, state);
        });

    ui.separator();

    let filtered = match filter::filtered_indices(&state.table, &state.find_song.criteria) {
        Ok(indices) => indices,
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    ui.strong(format!(
        "Found {} matching songs",
        thousands(filtered.len() as i64)
    ));

    if filtered.is_empty() {
        // A normal outcome of narrow criteria, not a failure.
        ui.colored_label(
            Color32::from_rgb(0xb2, 0x6a, 0x00),
            "No songs found with the current filters. Try to loosen them a bit!",
        );
        return;
    }

    let limit = state.find_song.limit;
    let top = match filter::top_streamed(&state.table, &filtered, limit) {
        Ok(indices) => indices,
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    ui.add_space(4.0);
    table::show_rows(ui, &state.table, &top, &RESULT_COLUMNS, "find_song_results", 380.0);
    ui.add_space(4.0);
    ui.colored_label(
        Color32::from_rgb(0x2e, 0x7d, 0x32),
        format!(
            "Successfully found {} songs! Here are the top {}.",
            thousands(filtered.len() as i64),
            top.len()
        ),
    );
}

// ---- Filter widgets ----

fn filter_widgets(ui: &mut Ui, state: &mut AppState) {
    let max_millions = state.find_song.max_stream_millions;
    let criteria = &mut state.find_song.criteria;

    ui.columns(3, |cols: &mut [Ui]| {
        let ui = &mut cols[0];
        ui.strong("Mood & Energy");
        ui.add_space(4.0);

        ui.label("How much do you want to dance?");
        egui::ComboBox::from_id_salt("dance_level")
            .selected_text(criteria.dance.label())
            .show_ui(ui, |ui: &mut Ui| {
                for level in DanceLevel::ALL {
                    ui.selectable_value(&mut criteria.dance, level, level.label());
                }
            });

        ui.add_space(4.0);
        ui.label("What is your energy level?");
        egui::ComboBox::from_id_salt("energy_level")
            .selected_text(criteria.energy.label())
            .show_ui(ui, |ui: &mut Ui| {
                for level in EnergyLevel::ALL {
                    ui.selectable_value(&mut criteria.energy, level, level.label());
                }
            });

        ui.add_space(4.0);
        ui.label("Should the music be happy?");
        for mood in Mood::ALL {
            ui.radio_value(&mut criteria.mood, mood, mood.label());
        }

        let ui = &mut cols[1];
        ui.strong("Popularity");
        ui.add_space(4.0);
        ui.label("Spotify streams (millions)");
        let (mut lo, mut hi) = criteria.stream_millions;
        ui.add(Slider::new(&mut lo, 0..=max_millions).text("min"));
        ui.add(Slider::new(&mut hi, 0..=max_millions).text("max"));
        // Keep the window well-formed whichever handle moved.
        if lo > hi {
            hi = lo;
        }
        criteria.stream_millions = (lo, hi);

        let ui = &mut cols[2];
        ui.strong("Additional Filters");
        ui.add_space(4.0);
        ui.checkbox(&mut criteria.instrumental_only, "Prefer instrumental music?");
        ui.checkbox(&mut criteria.live_only, "Prefer live recordings?");
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Show top");
            ui.add(egui::DragValue::new(&mut state.find_song.limit).range(1..=100));
            ui.label("results");
        });
    });
}
