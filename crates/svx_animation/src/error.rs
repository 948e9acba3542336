//! Animation error types
//!
//! Running animations never fail. Errors only arise while turning external
//! input (easing ids, configuration files) into engine values.

use thiserror::Error;

/// Errors produced while configuring the animation engine
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Easing identifier not in the supported set
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Configuration text could not be parsed
    #[error("Failed to parse animation config: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid animation config: {0}")]
    InvalidConfig(String),
}

/// Result type for animation configuration
pub type Result<T> = std::result::Result<T, AnimationError>;
