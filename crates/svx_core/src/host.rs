//! Host interface
//!
//! The animation engine never owns the objects it animates. Everything it
//! needs from the outside world goes through these traits: a mutation sink
//! for numeric style properties, a layout query for natural sizes, and a
//! visibility switch.
//!
//! Hosts are expected to be forgiving. Writing to a target that has been
//! detached since the animation started is silently ignored by the sink and
//! never reported back to the engine.

use crate::style::StyleValue;
use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a visual object owned by the host.
    ///
    /// Two handles refer to the same object iff they compare equal.
    pub struct TargetId;
}

/// Writes and reads named style properties on a target
pub trait StyleSink {
    /// Write a property value. Failures are swallowed by the implementation.
    fn set_property(&mut self, target: TargetId, name: &str, value: &StyleValue);

    /// Remove an explicit override so natural layout resumes
    fn clear_property(&mut self, target: TargetId, name: &str);

    /// Current numeric value of a property, if the target has one
    fn property(&self, target: TargetId, name: &str) -> Option<f32>;
}

/// Layout measurements
pub trait LayoutQuery {
    /// Full content height of the target, independent of any explicit
    /// height override currently applied to it.
    fn measure_natural_height(&self, target: TargetId) -> f32;
}

/// Display state of a target
pub trait VisibilityControl {
    fn is_visible(&self, target: TargetId) -> bool;

    fn set_hidden(&mut self, target: TargetId, hidden: bool);
}

/// Everything the animation engine requires from its host
pub trait Host: StyleSink + LayoutQuery + VisibilityControl {
    /// Whether the handle still refers to a live object.
    ///
    /// Effects started on a detached target are no-ops.
    fn is_attached(&self, target: TargetId) -> bool;
}
