//! Colour palettes for glyphs and noise
//!
//! A palette holds two fixed token sets, one for glyphs and one for noise,
//! picked once from the colour-mode flag. Draws never fail: an empty set or a
//! failed random draw falls back to a fixed token.

use crate::config::CaptchaConfig;
use crate::random::RandomSource;

/// Glyph colour when the text set is empty
pub const TEXT_FALLBACK: &str = "#000000";
/// Noise colour when the noise set is empty
pub const NOISE_FALLBACK: &str = "#cccccc";

const COLOR_TEXT: &[&str] = &[
    "#1a1a1a", "#2c3e50", "#34495e", "#7f8c8d", "#c0392b", "#e74c3c", "#d35400", "#e67e22",
    "#16a085", "#27ae60", "#2980b9", "#8e44ad",
];

const COLOR_NOISE: &[&str] = &[
    "#bdc3c7", "#95a5a6", "#ecf0f1", "#d5dbdb", "#f8c471", "#f7dc6f", "#aed6f1", "#a9dfbf",
];

const GRAY_TEXT: &[&str] = &[
    "#1a1a1a", "#2c2c2c", "#3f3f3f", "#525252", "#666666", "#7a7a7a", "#8d8d8d", "#a0a0a0",
];

const GRAY_NOISE: &[&str] = &["#bdc3c7", "#d5d5d5", "#e8e8e8", "#f2f2f2"];

/// Colour sets used by one renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    text_colors: Vec<String>,
    noise_colors: Vec<String>,
    background: String,
}

impl Palette {
    /// Select the built-in sets for the given colour mode
    pub fn new(color: bool, background: impl Into<String>) -> Self {
        let (text, noise) = if color {
            (COLOR_TEXT, COLOR_NOISE)
        } else {
            (GRAY_TEXT, GRAY_NOISE)
        };
        Self {
            text_colors: to_owned(text),
            noise_colors: to_owned(noise),
            background: background.into(),
        }
    }

    /// Build the palette for a configuration, honouring colour overrides
    pub fn from_config(config: &CaptchaConfig) -> Self {
        let mut palette = Self::new(config.color, config.background.clone());
        if let Some(text) = &config.text_colors {
            palette.text_colors = text.clone();
        }
        if let Some(noise) = &config.noise_colors {
            palette.noise_colors = noise.clone();
        }
        palette
    }

    /// Build a palette from explicit token sets
    pub fn with_colors(
        text_colors: Vec<String>,
        noise_colors: Vec<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            text_colors,
            noise_colors,
            background: background.into(),
        }
    }

    pub fn text_colors(&self) -> &[String] {
        &self.text_colors
    }

    pub fn noise_colors(&self) -> &[String] {
        &self.noise_colors
    }

    /// Uniform draw from the glyph set
    pub fn random_text_color(&self, rng: &mut dyn RandomSource) -> &str {
        pick(&self.text_colors, TEXT_FALLBACK, rng)
    }

    /// Uniform draw from the noise set
    pub fn random_noise_color(&self, rng: &mut dyn RandomSource) -> &str {
        pick(&self.noise_colors, NOISE_FALLBACK, rng)
    }

    /// The configured background token, verbatim
    pub fn background_color(&self) -> &str {
        &self.background
    }
}

fn to_owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn pick<'a>(set: &'a [String], fallback: &'a str, rng: &mut dyn RandomSource) -> &'a str {
    let Some(first) = set.first() else {
        return fallback;
    };
    match rng.int_below(set.len()) {
        Ok(index) => set.get(index).unwrap_or(first),
        Err(_) => first,
    }
}
