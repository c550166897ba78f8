//! Error types for configuration, expression generation and rendering

use thiserror::Error;

use crate::random::RandomError;

/// Errors that can occur anywhere in the captcha pipeline
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Configuration values outside their allowed ranges
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The random source failed while drawing operands or the operator
    #[error("failed to generate math expression: {0}")]
    ExpressionGeneration(#[source] RandomError),

    /// The document tree could not be serialized
    #[error("failed to render svg: {reason}")]
    Rendering { reason: String },

    #[error("failed to read config file: {0}")]
    ConfigFile(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CaptchaError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a rendering error
    pub fn rendering(reason: impl Into<String>) -> Self {
        Self::Rendering {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) | Self::ConfigFile(_) | Self::ConfigParse(_) => {
                "INVALID_CONFIG"
            }
            Self::ExpressionGeneration(_) => "MATH_GENERATION_FAILED",
            Self::Rendering { .. } => "SVG_GENERATION_FAILED",
        }
    }

    /// HTTP-style status code: 400 for caller mistakes, 500 for internal failures
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidConfig(_) | Self::ConfigFile(_) | Self::ConfigParse(_) => 400,
            Self::ExpressionGeneration(_) | Self::Rendering { .. } => 500,
        }
    }
}
