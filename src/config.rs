//! Captcha configuration: defaults, validation, environment and TOML loading

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CaptchaError;

/// Largest accepted noise level
pub const MAX_NOISE: i32 = 10;

/// Configuration for expression generation and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Smallest operand value
    pub math_min: i32,
    /// Largest operand value (inclusive)
    pub math_max: i32,
    /// Operators to draw from: "+", "-" or "+-"
    pub math_operator: String,

    /// Canvas width in SVG units
    pub width: u32,
    /// Canvas height in SVG units
    pub height: u32,
    pub font_size: u32,
    /// Noise level, 0 disables noise entirely
    pub noise: i32,
    /// Full colour palette when true, grayscale otherwise
    pub color: bool,
    /// Background fill token, passed through verbatim
    pub background: String,
    pub font_family: String,

    /// Replaces the built-in glyph colours when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_colors: Option<Vec<String>>,
    /// Replaces the built-in noise colours when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_colors: Option<Vec<String>>,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            math_min: 1,
            math_max: 9,
            math_operator: "+".to_string(),
            width: 150,
            height: 50,
            font_size: 20,
            noise: 1,
            color: true,
            background: "#f0f0f0".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            text_colors: None,
            noise_colors: None,
        }
    }
}

impl CaptchaConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `CAPTCHA_*` environment variables
    ///
    /// Unset or unparsable variables keep their default value.
    pub fn from_env() -> Self {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup on top of this configuration
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("CAPTCHA_MATH_MIN").and_then(|v| v.parse().ok()) {
            self.math_min = v;
        }
        if let Some(v) = get("CAPTCHA_MATH_MAX").and_then(|v| v.parse().ok()) {
            self.math_max = v;
        }
        if let Some(v) = get("CAPTCHA_OPERATOR") {
            self.math_operator = v;
        }
        if let Some(v) = get("CAPTCHA_WIDTH").and_then(|v| v.parse().ok()) {
            self.width = v;
        }
        if let Some(v) = get("CAPTCHA_HEIGHT").and_then(|v| v.parse().ok()) {
            self.height = v;
        }
        if let Some(v) = get("CAPTCHA_FONT_SIZE").and_then(|v| v.parse().ok()) {
            self.font_size = v;
        }
        if let Some(v) = get("CAPTCHA_NOISE").and_then(|v| v.parse().ok()) {
            self.noise = v;
        }
        if let Some(v) = get("CAPTCHA_COLOR").and_then(|v| parse_bool(&v)) {
            self.color = v;
        }
        if let Some(v) = get("CAPTCHA_BACKGROUND") {
            self.background = v;
        }
        if let Some(v) = get("CAPTCHA_FONT_FAMILY") {
            self.font_family = v;
        }
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CaptchaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, CaptchaError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay the keys present in a TOML file on this configuration
    pub fn merge_file(self, path: &Path) -> Result<Self, CaptchaError> {
        let content = std::fs::read_to_string(path)?;
        self.merge_toml_str(&content)
    }

    /// Overlay the keys present in `content`; absent keys keep their current value
    pub fn merge_toml_str(self, content: &str) -> Result<Self, CaptchaError> {
        let overrides: toml::Table = content.parse()?;
        let mut merged = match toml::Value::try_from(&self) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => toml::Table::new(),
            Err(err) => return Err(CaptchaError::invalid_config(err.to_string())),
        };
        merged.extend(overrides);
        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// Check that all values are within their allowed ranges
    pub fn validate(&self) -> Result<(), CaptchaError> {
        if self.math_min < 0 {
            return Err(CaptchaError::invalid_config("math_min must be >= 0"));
        }
        if self.math_max <= self.math_min {
            return Err(CaptchaError::invalid_config(
                "math_max must be > math_min",
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::invalid_config(
                "width and height must be > 0",
            ));
        }
        if self.font_size == 0 {
            return Err(CaptchaError::invalid_config("font_size must be > 0"));
        }
        if !(0..=MAX_NOISE).contains(&self.noise) {
            return Err(CaptchaError::invalid_config(format!(
                "noise must be between 0 and {}",
                MAX_NOISE
            )));
        }
        Ok(())
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the operand range
    pub fn with_math_range(mut self, min: i32, max: i32) -> Self {
        self.math_min = min;
        self.math_max = max;
        self
    }

    /// Set the operators to draw from
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.math_operator = operator.into();
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the noise level
    pub fn with_noise(mut self, noise: i32) -> Self {
        self.noise = noise;
        self
    }

    /// Enable or disable the colour palette
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }
}

/// Boolean parsing with the spellings environment files tend to use
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
