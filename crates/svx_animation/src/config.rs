//! Animation configuration
//!
//! Defaults for effect durations and the carousel, loadable from TOML.

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use serde::{Deserialize, Serialize};

/// Engine-wide animation defaults
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Duration used by effects when the caller does not pass one
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: f64,
    /// Easing used by `animate_to` when the caller does not pass one
    #[serde(default)]
    pub default_easing: Easing,
    /// Duration of a smooth scroll
    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: f64,
    #[serde(default)]
    pub carousel: CarouselConfig,
}

fn default_duration_ms() -> f64 {
    400.0
}

fn default_scroll_duration_ms() -> f64 {
    800.0
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            default_easing: Easing::default(),
            scroll_duration_ms: default_scroll_duration_ms(),
            carousel: CarouselConfig::default(),
        }
    }
}

/// Carousel timing
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CarouselConfig {
    /// Time between automatic advances
    #[serde(default = "default_interval_ms")]
    pub interval_ms: f64,
    /// Crossfade duration between slides
    #[serde(default = "default_fade_ms")]
    pub fade_ms: f64,
    #[serde(default = "default_fade_easing")]
    pub fade_easing: Easing,
}

fn default_interval_ms() -> f64 {
    3000.0
}

fn default_fade_ms() -> f64 {
    500.0
}

fn default_fade_easing() -> Easing {
    Easing::EaseInOut
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            fade_ms: default_fade_ms(),
            fade_easing: default_fade_easing(),
        }
    }
}

impl AnimationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AnimationConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every duration is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("default_duration_ms", self.default_duration_ms),
            ("scroll_duration_ms", self.scroll_duration_ms),
            ("carousel.interval_ms", self.carousel.interval_ms),
            ("carousel.fade_ms", self.carousel.fade_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(AnimationError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number of milliseconds (got {value})"
                )));
            }
        }
        if self.carousel.interval_ms == 0.0 {
            return Err(AnimationError::InvalidConfig(
                "carousel.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
