use std::collections::BTreeSet;
use std::sync::Arc;

use rand::seq::index::sample;

use crate::data::filter::SongCriteria;
use crate::data::model::{col, TrackTable};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    DatasetDetails,
    VisualAnalysis,
    CorrelationAnalysis,
    FindYourSong,
}

impl Page {
    pub const OVERVIEW_GROUP: [Page; 2] = [Page::Home, Page::DatasetDetails];
    pub const ANALYSIS_GROUP: [Page; 3] = [
        Page::VisualAnalysis,
        Page::CorrelationAnalysis,
        Page::FindYourSong,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DatasetDetails => "Dataset Details",
            Page::VisualAnalysis => "Visual Analysis",
            Page::CorrelationAnalysis => "Correlation Analysis",
            Page::FindYourSong => "Find Your Song",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    BarChart,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::BarChart => "Bar chart",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page widget state
// ---------------------------------------------------------------------------

pub struct OverviewState {
    /// Row indices of the current random sample.
    pub sample: Vec<usize>,
}

pub struct DetailsState {
    /// Selected artists in the explorer; empty set means "show all".
    pub artist_filter: BTreeSet<String>,
}

pub struct VisualState {
    pub metric: String,
    pub chart: ChartKind,
    /// Categorical column to colour/group by; `None` draws one series.
    pub color_by: Option<String>,
}

pub struct CorrelationState {
    pub var_x: String,
    pub var_y: String,
    pub show_heatmap: bool,
}

pub struct FindSongState {
    pub criteria: SongCriteria,
    pub limit: usize,
    /// Upper slider bound: the table's true stream maximum, rounded up to
    /// whole millions.
    pub max_stream_millions: u64,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The table handle is the
/// one loaded at startup; pages only ever borrow it.
pub struct AppState {
    pub table: Arc<TrackTable>,
    pub page: Page,
    /// Column selected in the sidebar data dictionary.
    pub dictionary_column: String,
    pub overview: OverviewState,
    pub details: DetailsState,
    pub visual: VisualState,
    pub correlation: CorrelationState,
    pub find_song: FindSongState,
}

impl AppState {
    pub fn new(table: Arc<TrackTable>) -> Self {
        let numeric = table.numeric_column_names();
        let pick = |preferred: &str, fallback: usize| -> String {
            if numeric.iter().any(|n| *n == preferred) {
                preferred.to_string()
            } else {
                numeric
                    .get(fallback)
                    .map(|n| n.to_string())
                    .unwrap_or_default()
            }
        };

        let metric = pick(col::STREAM, 0);
        let var_x = pick(col::DANCEABILITY, 0);
        let var_y = pick(col::VALENCE, 1);

        let max_stream_millions = table
            .numeric(col::STREAM)
            .ok()
            .and_then(|v| {
                v.into_iter()
                    .filter(|x| !x.is_nan())
                    .fold(None, |acc: Option<f64>, x| {
                        Some(acc.map_or(x, |a| a.max(x)))
                    })
            })
            .map(|max| (max / 1_000_000.0).ceil() as u64)
            .unwrap_or(0);

        let criteria = SongCriteria {
            stream_millions: (0, max_stream_millions),
            ..SongCriteria::default()
        };

        let mut state = AppState {
            dictionary_column: table.names().first().cloned().unwrap_or_default(),
            page: Page::Home,
            overview: OverviewState { sample: Vec::new() },
            details: DetailsState {
                artist_filter: BTreeSet::new(),
            },
            visual: VisualState {
                metric,
                chart: ChartKind::Histogram,
                color_by: None,
            },
            correlation: CorrelationState {
                var_x,
                var_y,
                show_heatmap: false,
            },
            find_song: FindSongState {
                criteria,
                limit: 20,
                max_stream_millions,
            },
            table,
        };
        state.resample();
        state
    }

    /// Draw a fresh random 10-row sample for the overview page.
    pub fn resample(&mut self) {
        let n = self.table.len();
        let amount = n.min(10);
        let mut rng = rand::thread_rng();
        self.overview.sample = sample(&mut rng, n, amount).into_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn table() -> Arc<TrackTable> {
        Arc::new(TrackTable::new(
            vec![
                col::TRACK.into(),
                col::DANCEABILITY.into(),
                col::VALENCE.into(),
                col::STREAM.into(),
            ],
            vec![
                Column::Text(vec!["a".into(), "b".into(), "c".into()]),
                Column::Float(vec![0.1, 0.5, 0.9]),
                Column::Float(vec![0.2, 0.6, 0.8]),
                Column::Float(vec![4_200_000.0, f64::NAN, 9_100_000.0]),
            ],
        ))
    }

    #[test]
    fn defaults_derive_from_the_table() {
        let state = AppState::new(table());
        assert_eq!(state.visual.metric, col::STREAM);
        assert_eq!(state.correlation.var_x, col::DANCEABILITY);
        assert_eq!(state.correlation.var_y, col::VALENCE);
        // 9.1M rounds up to 10.
        assert_eq!(state.find_song.max_stream_millions, 10);
        assert_eq!(state.find_song.criteria.stream_millions, (0, 10));
        assert_eq!(state.overview.sample.len(), 3);
    }
}
