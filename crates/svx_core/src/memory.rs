//! In-memory host
//!
//! A [`Host`] that keeps targets in a slot map. Used by headless drivers and
//! by the engine's tests, which inspect the write log to observe every frame.

use crate::host::{Host, LayoutQuery, StyleSink, TargetId, VisibilityControl};
use crate::style::StyleValue;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

/// A single recorded property write
#[derive(Clone, Debug, PartialEq)]
pub struct StyleWrite {
    pub target: TargetId,
    pub name: String,
    pub value: StyleValue,
}

#[derive(Debug, Default)]
struct TargetState {
    natural_height: f32,
    hidden: bool,
    styles: FxHashMap<String, StyleValue>,
}

/// Host backed by plain data structures
#[derive(Debug, Default)]
pub struct MemoryHost {
    targets: SlotMap<TargetId, TargetState>,
    writes: Vec<StyleWrite>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visible target whose content measures `natural_height` pixels
    pub fn create_target(&mut self, natural_height: f32) -> TargetId {
        self.targets.insert(TargetState {
            natural_height,
            ..Default::default()
        })
    }

    /// Detach a target. Later writes to it are ignored.
    pub fn remove_target(&mut self, target: TargetId) -> bool {
        self.targets.remove(target).is_some()
    }

    pub fn set_natural_height(&mut self, target: TargetId, height: f32) {
        if let Some(state) = self.targets.get_mut(target) {
            state.natural_height = height;
        }
    }

    /// Current value of a property
    pub fn value(&self, target: TargetId, name: &str) -> Option<&StyleValue> {
        self.targets.get(target)?.styles.get(name)
    }

    /// Current value of a property formatted the way a stylesheet would hold it
    pub fn css(&self, target: TargetId, name: &str) -> Option<String> {
        self.value(target, name).map(ToString::to_string)
    }

    /// Every write issued so far, oldest first
    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Numeric values written to one property, oldest first
    pub fn history(&self, target: TargetId, name: &str) -> Vec<f32> {
        self.writes
            .iter()
            .filter(|w| w.target == target && w.name == name)
            .filter_map(|w| w.value.numeric())
            .collect()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl StyleSink for MemoryHost {
    fn set_property(&mut self, target: TargetId, name: &str, value: &StyleValue) {
        let Some(state) = self.targets.get_mut(target) else {
            tracing::trace!(?target, name, "write to detached target ignored");
            return;
        };
        state.styles.insert(name.to_string(), value.clone());
        self.writes.push(StyleWrite {
            target,
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn clear_property(&mut self, target: TargetId, name: &str) {
        if let Some(state) = self.targets.get_mut(target) {
            state.styles.remove(name);
        }
    }

    fn property(&self, target: TargetId, name: &str) -> Option<f32> {
        self.value(target, name)?.numeric()
    }
}

impl LayoutQuery for MemoryHost {
    fn measure_natural_height(&self, target: TargetId) -> f32 {
        self.targets
            .get(target)
            .map(|s| s.natural_height)
            .unwrap_or(0.0)
    }
}

impl VisibilityControl for MemoryHost {
    fn is_visible(&self, target: TargetId) -> bool {
        self.targets.get(target).is_some_and(|s| !s.hidden)
    }

    fn set_hidden(&mut self, target: TargetId, hidden: bool) {
        if let Some(state) = self.targets.get_mut(target) {
            state.hidden = hidden;
        }
    }
}

impl Host for MemoryHost {
    fn is_attached(&self, target: TargetId) -> bool {
        self.targets.contains_key(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_writes_are_recorded_in_order() {
        let mut host = MemoryHost::new();
        let t = host.create_target(50.0);

        host.set_property(t, "opacity", &StyleValue::Number(0.0));
        host.set_property(t, "opacity", &StyleValue::Number(0.5));
        host.set_property(t, "height", &StyleValue::Px(10.0));

        assert_eq!(host.history(t, "opacity"), vec![0.0, 0.5]);
        assert_eq!(host.history(t, "height"), vec![10.0]);
        assert_eq!(host.writes().len(), 3);
        assert_eq!(host.css(t, "opacity").as_deref(), Some("0.5"));
    }

    #[test]
    fn test_clear_property_removes_override() {
        let mut host = MemoryHost::new();
        let t = host.create_target(50.0);

        host.set_property(t, "overflow", &StyleValue::Keyword("hidden"));
        host.clear_property(t, "overflow");

        assert_eq!(host.value(t, "overflow"), None);
        assert_eq!(host.property(t, "overflow"), None);
    }

    #[test]
    fn test_detached_target_is_tolerated() {
        let mut host = MemoryHost::new();
        let t = host.create_target(80.0);
        assert!(host.is_attached(t));

        assert!(host.remove_target(t));
        assert!(!host.is_attached(t));

        // Writes and queries on a detached target are silent no-ops
        host.set_property(t, "height", &StyleValue::Px(1.0));
        host.set_hidden(t, true);
        assert!(host.writes().is_empty());
        assert_eq!(host.measure_natural_height(t), 0.0);
        assert!(!host.is_visible(t));
    }

    #[test]
    fn test_visibility_and_natural_height() {
        let mut host = MemoryHost::new();
        let t = host.create_target(80.0);

        assert!(host.is_visible(t));
        host.set_hidden(t, true);
        assert!(!host.is_visible(t));

        host.set_natural_height(t, 120.0);
        assert_eq!(host.measure_natural_height(t), 120.0);
    }
}
