use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Language → Color32
// ---------------------------------------------------------------------------

/// Gives each language of the loaded table its own colour, shared by all charts.
#[derive(Debug, Clone, Default)]
pub struct LanguageColors {
    mapping: BTreeMap<String, Color32>,
}

impl LanguageColors {
    pub fn new<'a>(languages: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<&str> = languages.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        let palette = generate_palette(names.len());
        LanguageColors {
            mapping: names
                .into_iter()
                .map(str::to_string)
                .zip(palette)
                .collect(),
        }
    }

    /// Colour of a language; unlisted values (such as `<null>`) are gray.
    pub fn color_for(&self, language: &str) -> Color32 {
        self.mapping
            .get(language)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
