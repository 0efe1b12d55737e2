use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            srgb_to_color32(hsl.into_color())
        })
        .collect()
}

fn srgb_to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map from a column's sorted distinct values.
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values
            .iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// Diverging blue → white → red scale for correlation coefficients.
/// `r` is clamped into [-1, 1]; 0 maps to near-white.
pub fn diverging(r: f32) -> Color32 {
    let r = r.clamp(-1.0, 1.0);
    let white = Srgb::new(0.96, 0.96, 0.96).into_linear();
    let end = if r < 0.0 {
        Srgb::new(0.13, 0.35, 0.81).into_linear()
    } else {
        Srgb::new(0.79, 0.14, 0.17).into_linear()
    };
    srgb_to_color32(Srgb::from_linear(white.mix(end, r.abs())))
}

/// Sequential cold → hot scale for stream intensity, `t` in [0, 1].
pub fn sequential(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hsl = Hsl::new(220.0 - 190.0 * t, 0.75, 0.35 + 0.2 * t);
    srgb_to_color32(hsl.into_color())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn category_colors_are_distinct_and_stable() {
        let values: BTreeSet<String> =
            ["album", "single", "compilation"].map(String::from).into();
        let colors = CategoryColors::new(&values);
        assert_ne!(colors.color_for("album"), colors.color_for("single"));
        assert_eq!(colors.color_for("album"), colors.color_for("album"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_separates_sign() {
        let negative = diverging(-1.0);
        let positive = diverging(1.0);
        assert!(negative.b() > negative.r());
        assert!(positive.r() > positive.b());
    }
}
