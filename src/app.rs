use std::sync::Arc;

use eframe::egui;

use crate::data::model::TrackTable;
use crate::state::{AppState, Page};
use crate::ui::{correlation, details, find_song, overview, panels, visual};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TuneScopeApp {
    pub state: AppState,
}

impl TuneScopeApp {
    pub fn new(table: Arc<TrackTable>) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for TuneScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: navigation + dictionary ----
        egui::SidePanel::left("nav_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => overview::show(ui, &mut self.state),
            Page::DatasetDetails => details::show(ui, &mut self.state),
            Page::VisualAnalysis => visual::show(ui, &mut self.state),
            Page::CorrelationAnalysis => correlation::show(ui, &mut self.state),
            Page::FindYourSong => find_song::show(ui, &mut self.state),
        });
    }
}
