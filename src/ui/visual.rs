use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::CategoryColors;
use crate::data::model::col;
use crate::data::stats;
use crate::state::{AppState, ChartKind};
use crate::ui::thousands;

// ---------------------------------------------------------------------------
// Visual Analysis page
// ---------------------------------------------------------------------------

/// Numeric columns that carry no insight as a distribution.
const UNWANTED_METRICS: [&str; 2] = [col::KEY, col::DURATION_MS];

/// Categorical columns offered for colouring/grouping.
const COLOR_BY_OPTIONS: [&str; 3] = [col::ALBUM_TYPE, col::LICENSED, col::OFFICIAL_VIDEO];

const HISTOGRAM_BINS: usize = 40;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visual Data Analysis");
    ui.label(
        "Select a metric to see its distribution across the top songs, optionally split \
         by a category.",
    );
    ui.separator();

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.set_width(220.0);
            settings(ui, state);
        });
        ui.separator();
        ui.vertical(|ui: &mut Ui| {
            chart(ui, state);
            ui.separator();
            takeaways(ui, state);
        });
    });
}

// ---- Settings column ----

fn settings(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Settings");
    ui.add_space(4.0);

    let options: Vec<String> = state
        .table
        .numeric_column_names()
        .into_iter()
        .filter(|n| !UNWANTED_METRICS.contains(n))
        .map(str::to_string)
        .collect();

    ui.label("Metric");
    egui::ComboBox::from_id_salt("visual_metric")
        .selected_text(state.visual.metric.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                if ui
                    .selectable_label(state.visual.metric == *option, option)
                    .clicked()
                {
                    state.visual.metric = option.clone();
                }
            }
        });

    ui.add_space(6.0);
    ui.label("Chart type");
    ui.radio_value(&mut state.visual.chart, ChartKind::Histogram, ChartKind::Histogram.label());
    ui.radio_value(&mut state.visual.chart, ChartKind::BarChart, ChartKind::BarChart.label());

    ui.add_space(6.0);
    ui.label("Color by (optional)");
    let selected = state
        .visual
        .color_by
        .clone()
        .unwrap_or_else(|| "None".to_string());
    egui::ComboBox::from_id_salt("visual_color_by")
        .selected_text(selected.clone())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(state.visual.color_by.is_none(), "None").clicked() {
                state.visual.color_by = None;
            }
            for option in COLOR_BY_OPTIONS {
                if state.table.column_index(option).is_none() {
                    continue;
                }
                if ui
                    .selectable_label(selected == option, option)
                    .clicked()
                {
                    state.visual.color_by = Some(option.to_string());
                }
            }
        });
}

// ---- Chart column ----

fn chart(ui: &mut Ui, state: &AppState) {
    let metric = &state.visual.metric;
    let values = match state.table.numeric(metric) {
        Ok(v) => v,
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    match state.visual.chart {
        ChartKind::Histogram => {
            ui.strong(format!("{metric} distribution"));
            histogram_chart(ui, state, metric, &values);
        }
        ChartKind::BarChart => {
            let category = state
                .visual
                .color_by
                .clone()
                .unwrap_or_else(|| col::ALBUM_TYPE.to_string());
            ui.strong(format!("Mean {metric} by {category}"));
            group_mean_chart(ui, state, metric, &category);
        }
    }
}

fn histogram_chart(ui: &mut Ui, state: &AppState, metric: &str, values: &[f64]) {
    let Some(full) = stats::histogram(values, HISTOGRAM_BINS) else {
        ui.label("Nothing to plot: the column has no finite values.");
        return;
    };

    // Per-category histograms share the full range so the stacks line up.
    let groups: Vec<(String, stats::Histogram, Color32)> = match &state.visual.color_by {
        Some(category) => match state.table.text(category) {
            Ok(labels) => {
                let distinct: BTreeSet<String> = labels.iter().cloned().collect();
                let colors = CategoryColors::new(&distinct);
                let mut split: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
                for (label, &v) in labels.iter().zip(values) {
                    split.entry(label.as_str()).or_default().push(v);
                }
                let min = full.min;
                let max = full.min + full.bin_width * HISTOGRAM_BINS as f64;
                split
                    .into_iter()
                    .map(|(label, vs)| {
                        (
                            label.to_string(),
                            stats::histogram_in(&vs, min, max, HISTOGRAM_BINS),
                            colors.color_for(label),
                        )
                    })
                    .collect()
            }
            Err(e) => {
                ui.colored_label(Color32::RED, e.to_string());
                return;
            }
        },
        None => vec![(metric.to_string(), full, Color32::LIGHT_BLUE)],
    };

    Plot::new("visual_histogram")
        .legend(Legend::default())
        .x_axis_label(metric.to_string())
        .y_axis_label("Count")
        .height(360.0)
        .show(ui, |plot_ui| {
            let mut stacked: Vec<BarChart> = Vec::new();
            for (label, histogram, color) in &groups {
                let bars: Vec<Bar> = histogram
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(histogram.center(i), count as f64)
                            .width(histogram.bin_width * 0.95)
                    })
                    .collect();
                let below: Vec<&BarChart> = stacked.iter().collect();
                let chart = BarChart::new(bars)
                    .name(label)
                    .color(*color)
                    .stack_on(&below);
                stacked.push(chart);
            }
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
        });
}

fn group_mean_chart(ui: &mut Ui, state: &AppState, metric: &str, category: &str) {
    let means = match stats::group_mean(&state.table, category, metric) {
        Ok(m) => m,
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };
    if means.is_empty() {
        ui.label("Nothing to plot: the category column is empty.");
        return;
    }

    let distinct: BTreeSet<String> = means.iter().map(|(c, _)| c.clone()).collect();
    let colors = CategoryColors::new(&distinct);
    let labels: Vec<String> = means.iter().map(|(c, _)| c.clone()).collect();

    Plot::new("visual_group_mean")
        .legend(Legend::default())
        .y_axis_label(format!("Mean {metric}"))
        .height(360.0)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (i, (label, mean)) in means.iter().enumerate() {
                if mean.is_nan() {
                    continue;
                }
                let chart = BarChart::new(vec![Bar::new(i as f64, *mean).width(0.6)])
                    .name(label)
                    .color(colors.color_for(label));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---- Key takeaways ----

fn takeaways(ui: &mut Ui, state: &AppState) {
    ui.strong("Key Takeaways");
    let Ok(values) = state.table.numeric(&state.visual.metric) else {
        return;
    };
    let Some(summary) = stats::describe(&values) else {
        ui.label("No finite values in this column.");
        return;
    };

    let metric = &state.visual.metric;
    ui.label(format!("{metric} mean: {}", format_takeaway(summary.mean)));
    ui.label(format!("{metric} median: {}", format_takeaway(summary.median)));
    ui.label(format!("{metric} max: {}", format_takeaway(summary.max)));
}

fn format_takeaway(v: f64) -> String {
    if v.abs() >= 1000.0 {
        thousands(v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}
