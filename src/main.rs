mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::TuneScopeApp;
use eframe::egui;

const DEFAULT_DATASET: &str = "data_set.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    // The table is loaded exactly once, before any page exists. A failure
    // here is fatal: no partial or degraded table is ever served.
    let table = match data::loader::load_table(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} tracks with {} columns from {}",
                table.len(),
                table.n_columns(),
                path.display()
            );
            Arc::new(table)
        }
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            eprintln!("error: failed to load dataset {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TuneScope – Spotify & YouTube Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(TuneScopeApp::new(table)))),
    )
}
