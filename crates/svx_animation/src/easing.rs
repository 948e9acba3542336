//! Easing functions for tweens

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Easing curve identifier
///
/// Every curve maps `[0, 1]` onto `[0, 1]` without overshoot, so a tween's
/// output never leaves its `[from, to]` interval. New curves must keep that
/// property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // `ease` was the historical default id and has always run linearly
            "linear" | "ease" => Ok(Easing::Linear),
            "ease-in" => Ok(Easing::EaseIn),
            "ease-out" => Ok(Easing::EaseOut),
            "ease-in-out" => Ok(Easing::EaseInOut),
            other => Err(AnimationError::UnknownEasing(other.to_string())),
        }
    }
}
