//! SVG Math Captcha - arithmetic captchas rendered as noisy SVG documents
//!
//! This library generates a small addition or subtraction question, lays the
//! question out as individually jittered and rotated glyphs, overlays random
//! curves and dots, and serializes the result as a standalone SVG document.
//!
//! # Example
//!
//! ```rust
//! use svg_math_captcha::{validate_answer, CaptchaConfig, CaptchaGenerator, RngSource};
//!
//! let generator = CaptchaGenerator::new(CaptchaConfig::default().with_noise(2));
//! let captcha = generator.create_with_rng(&mut RngSource::seeded(7)).unwrap();
//!
//! assert!(captcha.data.contains("<svg"));
//! assert!(captcha.question.ends_with(" = ?"));
//! assert!(validate_answer(&captcha.text, &captcha.text));
//! ```

pub mod config;
pub mod error;
pub mod expression;
pub mod generator;
pub mod geometry;
pub mod palette;
pub mod random;
pub mod renderer;

pub use config::CaptchaConfig;
pub use error::CaptchaError;
pub use expression::{ExpressionGenerator, MathExpression, Operator};
pub use generator::{
    create_simple, create_with_math_range, create_with_size, validate_answer, Captcha,
    CaptchaGenerator,
};
pub use palette::Palette;
pub use random::{RandomError, RandomSource, RngSource, SecureRandom};
pub use renderer::{render_canvas, Canvas, OutputConfig, Renderer};

/// Render a question such as `"3 + 5 = ?"` with the given configuration
///
/// # Example
///
/// ```rust
/// use svg_math_captcha::{render_question, CaptchaConfig, RngSource};
///
/// let svg = render_question("3 + 5 = ?", &CaptchaConfig::default(), &mut RngSource::seeded(1))
///     .unwrap();
/// assert_eq!(svg.matches("<text").count(), 4);
/// ```
pub fn render_question(
    question: &str,
    config: &CaptchaConfig,
    rng: &mut dyn RandomSource,
) -> Result<String, CaptchaError> {
    config.validate()?;
    Renderer::new(config).render(question, rng)
}
