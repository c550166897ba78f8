//! Captcha renderer: canvas, glyph layout, noise and SVG output
//!
//! A [`Renderer`] is immutable once built and can serve concurrent render
//! calls; each call builds its own [`Canvas`] from the random source it is
//! given.

pub mod config;
pub mod document;
pub mod noise;
pub mod path;
pub mod svg;
pub mod text;

pub use config::OutputConfig;
pub use document::{Canvas, Curve, CurveFamily, Dot, Glyph, Rect};
pub use noise::NoiseSynthesizer;
pub use path::{CurvePath, PathSegment};
pub use svg::render_canvas;

use crate::config::CaptchaConfig;
use crate::error::CaptchaError;
use crate::expression::MathExpression;
use crate::palette::Palette;
use crate::random::RandomSource;

use text::{layout_glyphs, GlyphStyle, LineMetrics};

/// Curves added per noise level
pub const CURVES_PER_LEVEL: usize = 2;
/// Dots added per noise level
pub const DOTS_PER_LEVEL: usize = 3;

/// Strip the answer marker: `"3 + 5 = ?"` becomes `"3 + 5 = "`
pub fn question_text(question: &str) -> String {
    question.replacen(" = ?", " = ", 1)
}

/// Builds captcha documents for one configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    config: CaptchaConfig,
    palette: Palette,
    noise: NoiseSynthesizer,
    output: OutputConfig,
}

impl Renderer {
    /// Create a renderer; the palette is selected once from the colour flag
    pub fn new(config: &CaptchaConfig) -> Self {
        Self {
            config: config.clone(),
            palette: Palette::from_config(config),
            noise: NoiseSynthesizer::default(),
            output: OutputConfig::default(),
        }
    }

    /// Set the SVG output options
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Replace the noise magnitudes
    pub fn with_noise_synthesizer(mut self, noise: NoiseSynthesizer) -> Self {
        self.noise = noise;
        self
    }

    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Root canvas with a full-size background rectangle
    pub fn create_canvas(&self) -> Canvas {
        let mut canvas = Canvas::new(self.config.width, self.config.height);
        canvas.set_background(self.palette.background_color());
        canvas
    }

    /// Append one glyph per non-space character of `text`
    pub fn layout_text(&self, canvas: &mut Canvas, text: &str, rng: &mut dyn RandomSource) {
        let metrics = LineMetrics::measure(
            text,
            self.config.width,
            self.config.height,
            self.config.font_size,
        );
        let style = GlyphStyle {
            font_size: self.config.font_size,
            font_family: self.config.font_family.clone(),
        };
        let glyphs = layout_glyphs(text, &metrics, &style, &self.palette, rng);
        canvas.glyphs.extend(glyphs);
    }

    /// Append curves then dots, scaled by the noise level; no-op at level 0
    pub fn add_noise(&self, canvas: &mut Canvas, rng: &mut dyn RandomSource) {
        let Ok(level) = usize::try_from(self.config.noise) else {
            return;
        };
        if level == 0 {
            return;
        }

        let (width, height) = (self.config.width, self.config.height);
        let curves = self.noise.generate_curves(
            level * CURVES_PER_LEVEL,
            width,
            height,
            &self.palette,
            rng,
        );
        canvas.curves.extend(curves);

        let dots = self
            .noise
            .generate_dots(level * DOTS_PER_LEVEL, width, height, &self.palette, rng);
        canvas.dots.extend(dots);
    }

    /// Assemble the full document tree for a question such as `"3 + 5 = ?"`
    pub fn build_document(&self, question: &str, rng: &mut dyn RandomSource) -> Canvas {
        let mut canvas = self.create_canvas();
        self.layout_text(&mut canvas, &question_text(question), rng);
        self.add_noise(&mut canvas, rng);
        canvas
    }

    /// Render a question to an SVG document
    pub fn render(
        &self,
        question: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<String, CaptchaError> {
        let canvas = self.build_document(question, rng);
        log::debug!(
            "rendering {}x{} captcha: {} glyphs, {} curves, {} dots",
            canvas.width,
            canvas.height,
            canvas.glyphs.len(),
            canvas.curves.len(),
            canvas.dots.len()
        );
        render_canvas(&canvas, &self.output)
    }

    /// Render the question of a generated expression
    pub fn render_expression(
        &self,
        expression: &MathExpression,
        rng: &mut dyn RandomSource,
    ) -> Result<String, CaptchaError> {
        self.render(&expression.question, rng)
    }
}
