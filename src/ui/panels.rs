use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page};
use crate::ui::thousands;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("TuneScope");
        ui.label("Spotify & YouTube Analytics");
        ui.separator();
        ui.label(format!(
            "{} tracks · {} columns",
            thousands(state.table.len() as i64),
            state.table.n_columns()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – navigation + data dictionary
// ---------------------------------------------------------------------------

/// Render the navigation panel with the original's two page groups and the
/// sidebar data dictionary.
pub fn nav_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Pages");
    ui.separator();

    page_group(ui, state, "Overview", &Page::OVERVIEW_GROUP);
    ui.add_space(6.0);
    page_group(ui, state, "Analysis", &Page::ANALYSIS_GROUP);

    ui.add_space(10.0);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Dictionary");
            ui.label("Select a variable to see its description");

            let current = state.dictionary_column.clone();
            egui::ComboBox::from_id_salt("dictionary_column")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in state.table.names() {
                        if ui.selectable_label(current == *name, name).clicked() {
                            state.dictionary_column = name.clone();
                        }
                    }
                });

            ui.add_space(4.0);
            ui.group(|ui: &mut Ui| {
                ui.strong(&state.dictionary_column);
                ui.label(column_description(&state.dictionary_column));
            });

            ui.add_space(10.0);
            ui.strong("About");
            ui.label(
                "This dashboard analyzes the intersection of music streaming \
                 on Spotify and video engagement on YouTube.",
            );
        });
}

fn page_group(ui: &mut Ui, state: &mut AppState, group: &str, pages: &[Page]) {
    ui.label(RichText::new(group).small().weak());
    for &page in pages {
        if ui
            .selectable_label(state.page == page, page.title())
            .clicked()
        {
            state.page = page;
        }
    }
}

// ---------------------------------------------------------------------------
// Data dictionary
// ---------------------------------------------------------------------------

/// Description text for each known dataset column.
pub fn column_description(name: &str) -> &'static str {
    match name {
        "Track" => "Name of the song, as visible on the Spotify platform.",
        "Artist" => "Name of the artist.",
        "Url_spotify" => "The URL of the artist.",
        "Album" => "The album in which the song is contained on Spotify.",
        "Album_type" => {
            "Indicates if the song is released on Spotify as a single or contained in an album."
        }
        "Uri" => "A Spotify link used to find the song through the API.",
        "Danceability" => {
            "Describes how suitable a track is for dancing based on a combination of \
             musical elements including tempo, rhythm stability, beat strength, and \
             overall regularity. A value of 0.0 is least danceable and 1.0 is most danceable."
        }
        "Energy" => {
            "A measure from 0.0 to 1.0 representing a perceptual measure of intensity \
             and activity. Typically, energetic tracks feel fast, loud, and noisy."
        }
        "Key" => {
            "The key the track is in. Integers map to pitches using standard Pitch Class \
             notation. If no key was detected, the value is -1."
        }
        "Loudness" => {
            "The overall loudness of a track in decibels (dB), averaged across the track."
        }
        "Speechiness" => {
            "Detects the presence of spoken words in a track. The more exclusively \
             speech-like the recording, the closer to 1.0 the attribute value."
        }
        "Acousticness" => {
            "A confidence measure from 0.0 to 1.0 of whether the track is acoustic."
        }
        "Instrumentalness" => {
            "Predicts whether a track contains no vocals. The closer the value is to 1.0, \
             the greater likelihood the track contains no vocal content."
        }
        "Liveness" => {
            "Detects the presence of an audience in the recording. Higher values represent \
             an increased probability that the track was performed live."
        }
        "Valence" => {
            "A measure from 0.0 to 1.0 describing the musical positiveness conveyed by a track."
        }
        "Tempo" => "The overall estimated tempo of a track in beats per minute (BPM).",
        "Duration_ms" => "The total duration of the track in milliseconds.",
        "Stream" => "Number of streams of the song on Spotify.",
        "Url_youtube" => "URL of the video linked to the song on YouTube, if it has any.",
        "Title" => "Title of the videoclip on YouTube.",
        "Channel" => "Name of the channel that published the video.",
        "Views" => "Number of views.",
        "Likes" => "Number of likes.",
        "Comments" => "Number of comments.",
        "Licensed" => "Indicates whether the video represents licensed content.",
        "official_video" => {
            "Boolean value that indicates if the video found is the official video of the song."
        }
        "Description" => "Description of the video on YouTube.",
        _ => "No description available for this column.",
    }
}

#[cfg(test)]
mod tests {
    use super::column_description;

    #[test]
    fn known_columns_have_descriptions() {
        assert!(column_description("Danceability").contains("dancing"));
        assert!(column_description("Stream").contains("Spotify"));
    }

    #[test]
    fn unknown_columns_fall_back() {
        assert!(column_description("Bogus").contains("No description"));
    }
}
