//! Captcha generation facade
//!
//! Ties expression generation and rendering together and returns the SVG
//! document along with the expected answer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::config::CaptchaConfig;
use crate::error::CaptchaError;
use crate::expression::ExpressionGenerator;
use crate::random::{RandomSource, SecureRandom};
use crate::renderer::Renderer;

/// Largest batch accepted by [`CaptchaGenerator::generate_multiple`]
pub const MAX_BATCH: usize = 100;

/// A rendered captcha
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Captcha {
    /// SVG document
    pub data: String,
    /// Expected answer in decimal
    pub text: String,
    /// Question shown to the user, e.g. `"3 + 5 = ?"`
    pub question: String,
}

impl Captcha {
    /// The SVG as a base64 `data:` URI, ready for an `<img src>`
    pub fn to_data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(&self.data))
    }
}

/// Generates captchas for one configuration
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    config: CaptchaConfig,
    expressions: ExpressionGenerator,
    renderer: Renderer,
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self::new(CaptchaConfig::default())
    }
}

impl CaptchaGenerator {
    /// Create a generator; an invalid configuration is replaced by the defaults
    pub fn new(config: CaptchaConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid captcha configuration, using defaults: {}", err);
                CaptchaConfig::default()
            }
        };
        Self::from_valid(config)
    }

    fn from_valid(config: CaptchaConfig) -> Self {
        Self {
            expressions: ExpressionGenerator::new(&config),
            renderer: Renderer::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Replace the configuration; the current one is kept when validation fails
    pub fn update_config(&mut self, config: CaptchaConfig) -> Result<(), CaptchaError> {
        config.validate()?;
        *self = Self::from_valid(config);
        Ok(())
    }

    /// Generate a captcha using OS entropy
    pub fn create(&self) -> Result<Captcha, CaptchaError> {
        self.create_with_rng(&mut SecureRandom::new())
    }

    /// Generate a captcha from the given random source
    pub fn create_with_rng(&self, rng: &mut dyn RandomSource) -> Result<Captcha, CaptchaError> {
        generate(&self.expressions, &self.renderer, rng)
    }

    /// Generate a captcha with a one-off configuration
    ///
    /// The options are validated first and used for both the expression and
    /// the rendering; the generator's own configuration is left untouched.
    pub fn create_with_options(&self, options: &CaptchaConfig) -> Result<Captcha, CaptchaError> {
        self.create_with_options_and_rng(options, &mut SecureRandom::new())
    }

    pub fn create_with_options_and_rng(
        &self,
        options: &CaptchaConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Captcha, CaptchaError> {
        options.validate()?;
        if *options == self.config {
            return self.create_with_rng(rng);
        }
        let expressions = ExpressionGenerator::new(options);
        let renderer = Renderer::new(options);
        generate(&expressions, &renderer, rng)
    }

    /// Generate `count` captchas, between 1 and [`MAX_BATCH`]
    pub fn generate_multiple(&self, count: usize) -> Result<Vec<Captcha>, CaptchaError> {
        self.generate_multiple_with_rng(count, &mut SecureRandom::new())
    }

    pub fn generate_multiple_with_rng(
        &self,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Captcha>, CaptchaError> {
        if count == 0 {
            return Err(CaptchaError::invalid_config("count must be positive"));
        }
        if count > MAX_BATCH {
            return Err(CaptchaError::invalid_config(format!(
                "count cannot exceed {}",
                MAX_BATCH
            )));
        }

        (0..count).map(|_| self.create_with_rng(rng)).collect()
    }
}

fn generate(
    expressions: &ExpressionGenerator,
    renderer: &Renderer,
    rng: &mut dyn RandomSource,
) -> Result<Captcha, CaptchaError> {
    let expression = expressions.generate(rng)?;
    let data = renderer.render_expression(&expression, rng)?;
    log::debug!("generated captcha for {:?}", expression.question);

    Ok(Captcha {
        data,
        text: expression.answer.to_string(),
        question: expression.question,
    })
}

/// Exact comparison; no trimming or normalisation
pub fn validate_answer(expected: &str, provided: &str) -> bool {
    expected == provided
}

/// Generate one captcha with the default configuration
pub fn create_simple() -> Result<Captcha, CaptchaError> {
    CaptchaGenerator::default().create()
}

/// Generate one captcha of the given size
///
/// Like [`CaptchaGenerator::new`], an invalid size falls back to the defaults.
pub fn create_with_size(width: u32, height: u32) -> Result<Captcha, CaptchaError> {
    CaptchaGenerator::new(CaptchaConfig::default().with_size(width, height)).create()
}

/// Generate one captcha with operands in `[min, max]`
pub fn create_with_math_range(min: i32, max: i32) -> Result<Captcha, CaptchaError> {
    CaptchaGenerator::new(CaptchaConfig::default().with_math_range(min, max)).create()
}
