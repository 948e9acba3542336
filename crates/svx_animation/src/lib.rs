//! SVX Animation Engine
//!
//! Frame-driven numeric tweens and the effects composed from them.
//!
//! # Features
//!
//! - **Easing**: linear and quadratic in/out/in-out curves that never overshoot
//! - **Tweens**: start time captured on the first frame, progress computed from
//!   absolute elapsed time so stalled hosts resume correctly
//! - **Last writer wins**: at most one tween owns a `(target, property)` pair
//! - **Effects**: fade, slide, toggles, smooth scroll, carousel crossfades
//! - **Completion handles**: poll or await a tween's outcome from any number of
//!   observers

pub mod carousel;
pub mod clock;
pub mod config;
pub mod controller;
pub mod easing;
pub mod effects;
pub mod error;
pub mod handle;
pub mod runtime;
pub mod tween;

pub use carousel::{Carousel, CarouselOptions};
pub use clock::{FrameClock, FrameToken, ManualClock, SystemClock, Timestamp};
pub use config::{AnimationConfig, CarouselConfig};
pub use controller::{CompletionHook, TweenController, TweenId};
pub use easing::Easing;
pub use effects::SCROLL_TOP;
pub use error::{AnimationError, Result};
pub use handle::{TweenHandle, TweenOutcome, TweenState};
pub use runtime::AnimationRuntime;
pub use tween::{PropertyDelta, StepResult, Tween};
