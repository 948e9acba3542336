//! SVX Core
//!
//! The boundary between the animation engine and whatever owns the visual
//! objects being animated:
//!
//! - **Targets**: opaque, host-issued handles compared by identity
//! - **Host traits**: style mutation, natural-size measurement, visibility
//! - **Style values**: unitless and `px` numeric output
//! - **Memory host**: an in-process host for headless drivers and tests
//!
//! # Example
//!
//! ```rust
//! use svx_core::{MemoryHost, StyleSink, StyleValue};
//!
//! let mut host = MemoryHost::new();
//! let panel = host.create_target(120.0);
//!
//! host.set_property(panel, "height", &StyleValue::Px(60.0));
//! assert_eq!(host.property(panel, "height"), Some(60.0));
//! assert_eq!(host.css(panel, "height").as_deref(), Some("60px"));
//! ```

pub mod host;
pub mod memory;
pub mod style;

pub use host::{Host, LayoutQuery, StyleSink, TargetId, VisibilityControl};
pub use memory::{MemoryHost, StyleWrite};
pub use style::{StyleValue, Unit};
