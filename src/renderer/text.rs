//! Glyph layout for the question line
//!
//! Characters are placed on a monospace grid centred in the canvas, then each
//! glyph gets its own jitter, rotation and colour.

use crate::geometry::{Point, RotationTransform};
use crate::palette::Palette;
use crate::random::RandomSource;

use super::document::Glyph;

/// Approximate glyph advance as a fraction of the font size
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Bound of the vertical offset shared by the whole line
pub const MAX_LINE_OFFSET: f64 = 5.0;
/// Bound of the per-glyph offset on each axis
pub const MAX_GLYPH_JITTER: f64 = 3.0;
/// Bound of the per-glyph rotation, in degrees
pub const MAX_ROTATION_DEGREES: f64 = 15.0;

/// Grid positions for one line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub char_width: f64,
    /// x of the first character cell
    pub start_x: f64,
    /// Unjittered baseline before the line offset
    pub baseline_y: f64,
}

impl LineMetrics {
    /// Centre `text` horizontally; the baseline sits a third of the font
    /// size below the vertical centre
    pub fn measure(text: &str, width: u32, height: u32, font_size: u32) -> Self {
        let font_size = f64::from(font_size);
        let char_width = font_size * CHAR_WIDTH_RATIO;
        let total_width = text.chars().count() as f64 * char_width;
        Self {
            char_width,
            start_x: (f64::from(width) - total_width) / 2.0,
            baseline_y: f64::from(height) / 2.0 + font_size / 3.0,
        }
    }

    /// Grid position of the character at `index`
    pub fn cell(&self, index: usize) -> Point {
        Point::new(self.start_x + index as f64 * self.char_width, self.baseline_y)
    }
}

/// Font settings shared by every glyph of a line
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    pub font_size: u32,
    pub font_family: String,
}

/// Lay out every non-space character of `text` as a glyph, left to right
///
/// Spaces produce no glyph but still advance the cursor. A failed draw
/// leaves that offset at zero; a failed rotation draw leaves the glyph
/// unrotated.
pub fn layout_glyphs(
    text: &str,
    metrics: &LineMetrics,
    style: &GlyphStyle,
    palette: &Palette,
    rng: &mut dyn RandomSource,
) -> Vec<Glyph> {
    let line_offset = rng
        .float_in(-MAX_LINE_OFFSET, MAX_LINE_OFFSET)
        .unwrap_or(0.0);

    let mut glyphs = Vec::new();
    for (i, character) in text.chars().enumerate() {
        if character.is_whitespace() {
            continue;
        }

        let jitter_x = rng
            .float_in(-MAX_GLYPH_JITTER, MAX_GLYPH_JITTER)
            .unwrap_or(0.0);
        let jitter_y = rng
            .float_in(-MAX_GLYPH_JITTER, MAX_GLYPH_JITTER)
            .unwrap_or(0.0);
        let position = metrics.cell(i).offset(jitter_x, line_offset + jitter_y);

        let rotation = rng
            .float_in(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES)
            .ok()
            .map(|angle| RotationTransform::new(angle, position));

        glyphs.push(Glyph {
            position,
            fill: palette.random_text_color(rng).to_string(),
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            rotation,
            character,
        });
    }

    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{FailingSource, ScriptedSource};
    use crate::random::RngSource;

    fn style() -> GlyphStyle {
        GlyphStyle {
            font_size: 20,
            font_family: "Arial, sans-serif".to_string(),
        }
    }

    #[test]
    fn test_measure_centres_line() {
        let metrics = LineMetrics::measure("3 + 5 = ", 150, 50, 20);
        assert!((metrics.char_width - 12.0).abs() < 1e-9);
        assert!((metrics.start_x - 27.0).abs() < 1e-9);
        assert!((metrics.baseline_y - (25.0 + 20.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spaces_advance_without_glyphs() {
        let metrics = LineMetrics::measure("3 + 5 = ", 150, 50, 20);
        let palette = Palette::new(true, "#f0f0f0");
        let glyphs = layout_glyphs("3 + 5 = ", &metrics, &style(), &palette, &mut FailingSource);

        let text: String = glyphs.iter().map(|g| g.character).collect();
        assert_eq!(text, "3+5=");
        let xs: Vec<f64> = glyphs.iter().map(|g| g.position.x).collect();
        for (x, expected) in xs.iter().zip([27.0, 51.0, 75.0, 99.0]) {
            assert!((x - expected).abs() < 1e-9, "{} != {}", x, expected);
        }
    }

    #[test]
    fn test_failed_draws_degrade_to_baseline() {
        let metrics = LineMetrics::measure("42", 100, 40, 20);
        let palette = Palette::new(false, "#ffffff");
        let glyphs = layout_glyphs("42", &metrics, &style(), &palette, &mut FailingSource);

        assert_eq!(glyphs.len(), 2);
        for (i, glyph) in glyphs.iter().enumerate() {
            assert_eq!(glyph.position, metrics.cell(i));
            assert_eq!(glyph.rotation, None);
            assert_eq!(glyph.fill, "#1a1a1a");
        }
    }

    #[test]
    fn test_scripted_offsets() {
        // line offset +2.5, jitter (-3, +1.5), rotation +7.5, colour index 0
        let metrics = LineMetrics::measure("7", 60, 40, 20);
        let palette = Palette::new(true, "#ffffff");
        let mut rng = ScriptedSource::new(&[0.75, 0.0, 0.75, 0.75, 0.0]);
        let glyphs = layout_glyphs("7", &metrics, &style(), &palette, &mut rng);

        let cell = metrics.cell(0);
        let glyph = &glyphs[0];
        assert!((glyph.position.x - (cell.x - 3.0)).abs() < 1e-9);
        assert!((glyph.position.y - (cell.y + 2.5 + 1.5)).abs() < 1e-9);
        let rotation = glyph.rotation.expect("rotation drawn");
        assert!((rotation.angle_degrees - 7.5).abs() < 1e-9);
        assert_eq!(rotation.center, glyph.position);
        assert_eq!(glyph.fill, "#1a1a1a");
    }

    #[test]
    fn test_offsets_stay_in_bounds() {
        let text = "12 - 9 = ";
        let metrics = LineMetrics::measure(text, 150, 50, 20);
        let palette = Palette::new(true, "#f0f0f0");
        let mut rng = RngSource::seeded(3);

        for _ in 0..50 {
            let glyphs = layout_glyphs(text, &metrics, &style(), &palette, &mut rng);
            assert_eq!(glyphs.len(), 5);
            let cells: Vec<usize> = text
                .char_indices()
                .filter(|(_, c)| *c != ' ')
                .map(|(i, _)| i)
                .collect();
            for (glyph, index) in glyphs.iter().zip(cells) {
                let cell = metrics.cell(index);
                assert!((glyph.position.x - cell.x).abs() <= MAX_GLYPH_JITTER);
                assert!(
                    (glyph.position.y - cell.y).abs() <= MAX_GLYPH_JITTER + MAX_LINE_OFFSET
                );
                let rotation = glyph.rotation.expect("seeded draws succeed");
                assert!(rotation.angle_degrees.abs() <= MAX_ROTATION_DEGREES);
                assert_eq!(rotation.center, glyph.position);
                assert!(palette.text_colors().contains(&glyph.fill));
            }
        }
    }

    #[test]
    fn test_empty_text() {
        let metrics = LineMetrics::measure("", 150, 50, 20);
        let palette = Palette::new(true, "#f0f0f0");
        let glyphs = layout_glyphs("", &metrics, &style(), &palette, &mut FailingSource);
        assert!(glyphs.is_empty());
    }
}
