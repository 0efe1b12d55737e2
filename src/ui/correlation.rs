use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Sense, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::model::col;
use crate::data::stats::{self, RelationError};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Correlation Analysis page
// ---------------------------------------------------------------------------

/// Numeric columns excluded from correlation: categorical-like codes.
const NON_INSIGHTFUL: [&str; 1] = [col::KEY];

/// Stream quintile boundaries used to colour the scatter points.
const QUANTILES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Correlation & Relationship Analysis");
    ui.label(
        "Explore how musical features and performance metrics relate to each other. \
         Select two variables to see their correlation and scatter plot.",
    );
    ui.separator();

    let options: Vec<String> = state
        .table
        .numeric_column_names()
        .into_iter()
        .filter(|n| !NON_INSIGHTFUL.contains(n))
        .map(str::to_string)
        .collect();

    ui.horizontal(|ui: &mut Ui| {
        axis_combo(ui, "X-axis variable", "corr_x", &options, &mut state.correlation.var_x);
        ui.add_space(16.0);
        axis_combo(ui, "Y-axis variable", "corr_y", &options, &mut state.correlation.var_y);
    });
    ui.separator();

    let relation = match stats::relationship(
        &state.table,
        &state.correlation.var_x,
        &state.correlation.var_y,
    ) {
        Ok(r) => r,
        Err(RelationError::IdenticalAxes) => {
            ui.colored_label(
                Color32::RED,
                "X-axis and Y-axis variables cannot be the same.",
            );
            return;
        }
        Err(RelationError::Data(e)) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.set_width((ui.available_width() - 240.0).max(200.0));
            ui.strong(format!(
                "Relationship: {} vs {}",
                state.correlation.var_x, state.correlation.var_y
            ));
            scatter(ui, state, &relation);
        });
        ui.separator();
        ui.vertical(|ui: &mut Ui| {
            stats_panel(ui, relation.pearson);
        });
    });

    ui.separator();
    ui.checkbox(&mut state.correlation.show_heatmap, "Show heatmap for all features");
    if state.correlation.show_heatmap {
        heatmap(ui, state, &options);
    }
}

fn axis_combo(ui: &mut Ui, label: &str, salt: &str, options: &[String], value: &mut String) {
    ui.label(label);
    egui::ComboBox::from_id_salt(salt)
        .selected_text(value.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui.selectable_label(value == option, option).clicked() {
                    *value = option.clone();
                }
            }
        });
}

// ---- Scatter plot with trendline ----

fn scatter(ui: &mut Ui, state: &AppState, relation: &stats::Relationship) {
    // Colour points by stream quintile so popularity stays visible.
    let streams = state.table.numeric(col::STREAM).unwrap_or_default();
    let thresholds: Vec<f64> = QUANTILES
        .iter()
        .filter_map(|&q| stats::percentile_of(&streams, q))
        .collect();

    let bucket_of = |stream: f64| -> usize {
        if thresholds.len() < QUANTILES.len() || stream.is_nan() {
            return 0;
        }
        thresholds.iter().filter(|&&t| stream > t).count()
    };
    let bucket_names = [
        "Streams: bottom 20%",
        "Streams: 20–40%",
        "Streams: 40–60%",
        "Streams: 60–80%",
        "Streams: top 20%",
    ];

    let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); bucket_names.len()];
    for (i, (&x, &y)) in relation.xs.iter().zip(&relation.ys).enumerate() {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        let stream = streams.get(i).copied().unwrap_or(f64::NAN);
        buckets[bucket_of(stream)].push([x, y]);
    }

    Plot::new("correlation_scatter")
        .legend(Legend::default())
        .x_axis_label(state.correlation.var_x.clone())
        .y_axis_label(state.correlation.var_y.clone())
        .height(380.0)
        .show(ui, |plot_ui| {
            for (b, points) in buckets.into_iter().enumerate() {
                if points.is_empty() {
                    continue;
                }
                let t = b as f32 / (bucket_names.len() - 1) as f32;
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .radius(1.6)
                        .color(color::sequential(t))
                        .name(bucket_names[b]),
                );
            }

            if let Some((slope, intercept)) = relation.trend {
                let xs: Vec<f64> = relation.xs.iter().copied().filter(|v| !v.is_nan()).collect();
                if let (Some(min), Some(max)) = (
                    xs.iter().copied().reduce(f64::min),
                    xs.iter().copied().reduce(f64::max),
                ) {
                    let line: PlotPoints = [min, max]
                        .iter()
                        .map(|&x| [x, slope * x + intercept])
                        .collect();
                    plot_ui.line(Line::new(line).name("OLS trendline").width(2.0));
                }
            }
        });
}

// ---- Pearson readout ----

fn stats_panel(ui: &mut Ui, pearson: Option<f64>) {
    ui.strong("Stats");
    match pearson {
        Some(r) => {
            ui.label("Pearson correlation");
            ui.label(egui::RichText::new(format!("{r:.3}")).size(26.0).strong());
            ui.add_space(6.0);
            let (text, color) = if r.abs() > 0.7 {
                ("Strong correlation detected!", Color32::from_rgb(0x2e, 0x7d, 0x32))
            } else if r.abs() > 0.4 {
                ("Moderate correlation detected.", Color32::from_rgb(0x15, 0x65, 0xc0))
            } else {
                ("Weak or no linear correlation.", Color32::from_rgb(0xb2, 0x6a, 0x00))
            };
            ui.colored_label(color, text);
        }
        None => {
            ui.label("Correlation undefined for this pair.");
        }
    }

    ui.add_space(10.0);
    ui.label("Interpretation:");
    ui.label("· close to 1.0: strong positive relationship");
    ui.label("· close to -1.0: strong negative relationship");
    ui.label("· close to 0: no linear relationship");
}

// ---- Correlation heatmap ----

fn heatmap(ui: &mut Ui, state: &AppState, columns: &[String]) {
    let matrix = match stats::correlation_matrix(&state.table, columns) {
        Ok(m) => m,
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    let cell = egui::vec2(46.0, 22.0);
    let label_font = FontId::proportional(10.0);

    egui::ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui: &mut Ui| {
            // Header row with column names, angled space not worth it here.
            ui.horizontal(|ui: &mut Ui| {
                ui.allocate_exact_size(egui::vec2(110.0, cell.y), Sense::hover());
                for name in &matrix.columns {
                    let (rect, _) = ui.allocate_exact_size(cell, Sense::hover());
                    ui.painter().text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        truncate(name, 8),
                        label_font.clone(),
                        ui.visuals().text_color(),
                    );
                }
            });

            for (i, row_name) in matrix.columns.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(110.0, cell.y), Sense::hover());
                    ui.painter().text(
                        rect.right_center(),
                        Align2::RIGHT_CENTER,
                        row_name,
                        label_font.clone(),
                        ui.visuals().text_color(),
                    );
                    for j in 0..matrix.columns.len() {
                        let r = matrix.values[i][j];
                        let (rect, response) = ui.allocate_exact_size(cell, Sense::hover());
                        let fill = if r.is_nan() {
                            Color32::DARK_GRAY
                        } else {
                            color::diverging(r as f32)
                        };
                        ui.painter().rect_filled(rect, CornerRadius::ZERO, fill);
                        let text_color = if r.is_nan() || r.abs() < 0.5 {
                            Color32::BLACK
                        } else {
                            Color32::WHITE
                        };
                        ui.painter().text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            if r.is_nan() { "–".to_string() } else { format!("{r:.2}") },
                            label_font.clone(),
                            text_color,
                        );
                        response.on_hover_text(format!(
                            "{} × {}: {r:.3}",
                            matrix.columns[i], matrix.columns[j]
                        ));
                    }
                });
            }
        });
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let head: String = name.chars().take(max - 1).collect();
        format!("{head}…")
    }
}
