//! Effect library
//!
//! Named, pre-composed tweens with fixed semantics. Every effect is a thin
//! layer over [`AnimationRuntime::start`]: it prepares the target, picks the
//! property set and easing, and wires any follow-up (hiding, clearing
//! overrides) into the completion hook.
//!
//! Because the controller is last-writer-wins, an effect's follow-up is
//! skipped when a later effect takes over the same property first. A
//! `fade_out` interrupted by a `fade_in` leaves the target visible.

use crate::clock::FrameClock;
use crate::controller::CompletionHook;
use crate::easing::Easing;
use crate::handle::TweenHandle;
use crate::runtime::AnimationRuntime;
use crate::tween::PropertyDelta;
use std::borrow::Cow;
use svx_core::{Host, StyleValue, TargetId, Unit};

const OPACITY: &str = "opacity";
const HEIGHT: &str = "height";
const OVERFLOW: &str = "overflow";
/// Vertical scroll offset of a scroll container
pub const SCROLL_TOP: &str = "scroll-top";

impl<H: Host + 'static, C: FrameClock> AnimationRuntime<H, C> {
    /// Animate each property from its current value to the given one.
    ///
    /// `opacity` is written unitless, every other property in `px`.
    /// Properties with no usable current value start from 0; non-finite end
    /// values are dropped.
    pub fn animate_to<N>(
        &mut self,
        target: TargetId,
        props: impl IntoIterator<Item = (N, f32)>,
        duration_ms: impl Into<Option<f64>>,
        easing: impl Into<Option<Easing>>,
    ) -> TweenHandle
    where
        N: Into<Cow<'static, str>>,
    {
        self.animate_to_hooked(target, props, duration_ms.into(), easing.into(), None)
    }

    /// [`animate_to`](Self::animate_to) with a completion callback
    pub fn animate_to_with<N, F>(
        &mut self,
        target: TargetId,
        props: impl IntoIterator<Item = (N, f32)>,
        duration_ms: impl Into<Option<f64>>,
        easing: impl Into<Option<Easing>>,
        on_complete: F,
    ) -> TweenHandle
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce(&mut H, TargetId) + 'static,
    {
        self.animate_to_hooked(
            target,
            props,
            duration_ms.into(),
            easing.into(),
            Some(Box::new(on_complete)),
        )
    }

    fn animate_to_hooked<N>(
        &mut self,
        target: TargetId,
        props: impl IntoIterator<Item = (N, f32)>,
        duration_ms: Option<f64>,
        easing: Option<Easing>,
        on_complete: Option<CompletionHook<H>>,
    ) -> TweenHandle
    where
        N: Into<Cow<'static, str>>,
    {
        if !self.ensure_attached(target, "animate_to") {
            return TweenHandle::inert();
        }
        let duration_ms = self.resolve_duration(duration_ms);
        let easing = easing.unwrap_or(self.config().default_easing);

        let host = self.host();
        let deltas: Vec<PropertyDelta> = props
            .into_iter()
            .filter_map(|(name, to)| {
                let name = name.into();
                if !to.is_finite() {
                    tracing::warn!(?target, property = %name, to, "non-finite end value skipped");
                    return None;
                }
                let from = host
                    .property(target, &name)
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0);
                let unit = Unit::for_property(&name);
                Some(PropertyDelta::new(name, from, to, unit))
            })
            .collect();

        self.start(target, deltas, duration_ms, easing, on_complete)
    }

    // ========================================================================
    // Fade
    // ========================================================================

    /// Show the target and fade opacity from 0 to 1
    pub fn fade_in(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        if !self.ensure_attached(target, "fade_in") {
            return TweenHandle::inert();
        }
        let duration_ms = self.resolve_duration(duration_ms.into());

        let host = self.host_mut();
        host.set_property(target, OPACITY, &StyleValue::Number(0.0));
        host.set_hidden(target, false);

        self.start(
            target,
            [PropertyDelta::number(OPACITY, 0.0, 1.0)],
            duration_ms,
            Easing::EaseIn,
            None,
        )
    }

    /// Fade opacity from 1 to 0, then hide the target
    pub fn fade_out(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        self.fade_out_hooked(target, duration_ms.into(), None)
    }

    /// [`fade_out`](Self::fade_out), then run `on_complete` after hiding
    pub fn fade_out_with<F>(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
        on_complete: F,
    ) -> TweenHandle
    where
        F: FnOnce(&mut H, TargetId) + 'static,
    {
        self.fade_out_hooked(target, duration_ms.into(), Some(Box::new(on_complete)))
    }

    fn fade_out_hooked(
        &mut self,
        target: TargetId,
        duration_ms: Option<f64>,
        then: Option<CompletionHook<H>>,
    ) -> TweenHandle {
        if !self.ensure_attached(target, "fade_out") {
            return TweenHandle::inert();
        }
        let duration_ms = self.resolve_duration(duration_ms);

        let hide: CompletionHook<H> = Box::new(move |host: &mut H, target: TargetId| {
            host.set_hidden(target, true);
            if let Some(then) = then {
                then(host, target);
            }
        });

        self.start(
            target,
            [PropertyDelta::number(OPACITY, 1.0, 0.0)],
            duration_ms,
            Easing::EaseOut,
            Some(hide),
        )
    }

    /// Fade out a visible target, fade in a hidden one.
    ///
    /// The choice is made once, now. It is not revisited if visibility
    /// changes before the first frame.
    pub fn fade_toggle(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        if self.host().is_visible(target) {
            self.fade_out(target, duration_ms)
        } else {
            self.fade_in(target, duration_ms)
        }
    }

    // ========================================================================
    // Slide
    // ========================================================================

    /// Show the target and grow its height from 0 to its natural height
    pub fn slide_down(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        if !self.ensure_attached(target, "slide_down") {
            return TweenHandle::inert();
        }
        let duration_ms = self.resolve_duration(duration_ms.into());

        let host = self.host_mut();
        host.set_hidden(target, false);
        let natural = host.measure_natural_height(target);
        host.set_property(target, HEIGHT, &StyleValue::Px(0.0));
        host.set_property(target, OVERFLOW, &StyleValue::Keyword("hidden"));

        self.start(
            target,
            [PropertyDelta::px(HEIGHT, 0.0, natural)],
            duration_ms,
            Easing::EaseOut,
            None,
        )
    }

    /// Collapse the target's height to 0, then hide it and restore natural
    /// layout
    pub fn slide_up(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        self.slide_up_hooked(target, duration_ms.into(), None)
    }

    /// [`slide_up`](Self::slide_up), then run `on_complete` after cleanup
    pub fn slide_up_with<F>(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
        on_complete: F,
    ) -> TweenHandle
    where
        F: FnOnce(&mut H, TargetId) + 'static,
    {
        self.slide_up_hooked(target, duration_ms.into(), Some(Box::new(on_complete)))
    }

    fn slide_up_hooked(
        &mut self,
        target: TargetId,
        duration_ms: Option<f64>,
        then: Option<CompletionHook<H>>,
    ) -> TweenHandle {
        if !self.ensure_attached(target, "slide_up") {
            return TweenHandle::inert();
        }
        let duration_ms = self.resolve_duration(duration_ms);

        let host = self.host_mut();
        let natural = host.measure_natural_height(target);
        host.set_property(target, HEIGHT, &StyleValue::Px(natural));
        host.set_property(target, OVERFLOW, &StyleValue::Keyword("hidden"));

        let collapse: CompletionHook<H> = Box::new(move |host: &mut H, target: TargetId| {
            host.set_hidden(target, true);
            host.clear_property(target, HEIGHT);
            host.clear_property(target, OVERFLOW);
            if let Some(then) = then {
                then(host, target);
            }
        });

        self.start(
            target,
            [PropertyDelta::px(HEIGHT, natural, 0.0)],
            duration_ms,
            Easing::EaseIn,
            Some(collapse),
        )
    }

    /// Slide up a visible target, slide down a hidden one
    pub fn slide_toggle(
        &mut self,
        target: TargetId,
        duration_ms: impl Into<Option<f64>>,
    ) -> TweenHandle {
        if self.host().is_visible(target) {
            self.slide_up(target, duration_ms)
        } else {
            self.slide_down(target, duration_ms)
        }
    }

    // ========================================================================
    // Scroll
    // ========================================================================

    /// Scroll `container` so that `position` ends up `offset` pixels below
    /// its top edge, linearly over the configured scroll duration
    pub fn scroll_to(&mut self, container: TargetId, position: f32, offset: f32) -> TweenHandle {
        if !self.ensure_attached(container, "scroll_to") {
            return TweenHandle::inert();
        }
        let from = self.host().property(container, SCROLL_TOP).unwrap_or(0.0);
        let duration_ms = self.config().scroll_duration_ms;

        self.start(
            container,
            [PropertyDelta::px(SCROLL_TOP, from, position - offset)],
            duration_ms,
            Easing::Linear,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::handle::{TweenOutcome, TweenState};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;
    use svx_core::{MemoryHost, StyleSink, VisibilityControl};

    struct Fixture {
        rt: AnimationRuntime<MemoryHost, ManualClock>,
        clock: ManualClock,
        target: TargetId,
    }

    impl Fixture {
        fn new(natural_height: f32) -> Self {
            let clock = ManualClock::new();
            let mut host = MemoryHost::new();
            let target = host.create_target(natural_height);
            Self {
                rt: AnimationRuntime::new(host, clock.clone()),
                clock,
                target,
            }
        }

        /// Tick at 16ms intervals until nothing is animating
        fn run(&mut self) {
            while self.rt.frame_requested() {
                self.rt.tick();
                self.clock.advance(16.0);
            }
        }

        fn value(&self, name: &str) -> Option<f32> {
            self.rt.host().property(self.target, name)
        }

        fn visible(&self) -> bool {
            self.rt.host().is_visible(self.target)
        }
    }

    #[test]
    fn test_fade_in_shows_and_reaches_full_opacity() {
        let mut f = Fixture::new(0.0);
        f.rt.host_mut().set_hidden(f.target, true);

        let handle = f.rt.fade_in(f.target, 200.0);
        assert!(f.visible());
        assert_eq!(f.value(OPACITY), Some(0.0));

        f.run();
        assert_eq!(handle.outcome(), Some(TweenOutcome::Completed));
        assert_eq!(f.value(OPACITY), Some(1.0));
        assert_eq!(f.rt.host().css(f.target, OPACITY).as_deref(), Some("1"));
    }

    #[test]
    fn test_fade_out_hides_on_completion() {
        let mut f = Fixture::new(0.0);
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();

        f.rt.fade_out_with(f.target, 200.0, move |_: &mut MemoryHost, _: TargetId| {
            flag.set(true)
        });
        f.rt.tick();
        assert!(f.visible());

        f.run();
        assert!(!f.visible());
        assert!(called.get());
        assert_eq!(f.value(OPACITY), Some(0.0));
    }

    #[test]
    fn test_fade_round_trip_settles_hidden_at_zero() {
        let mut f = Fixture::new(0.0);

        let fade_in = f.rt.fade_in(f.target, 200.0);
        let fade_out = f.rt.fade_out(f.target, 200.0);
        assert_eq!(fade_in.state(), TweenState::Cancelled);

        f.run();
        assert_eq!(fade_out.state(), TweenState::Completed);
        assert!(!f.visible());
        assert_eq!(f.value(OPACITY), Some(0.0));
    }

    #[test]
    fn test_interrupted_fade_out_skips_hide() {
        let mut f = Fixture::new(0.0);

        f.rt.fade_out(f.target, 200.0);
        f.rt.tick();
        f.clock.advance(100.0);
        f.rt.tick();
        f.rt.fade_in(f.target, 200.0);

        f.run();
        assert!(f.visible());
        assert_eq!(f.value(OPACITY), Some(1.0));
    }

    #[test]
    fn test_slide_down_grows_to_natural_height() {
        let mut f = Fixture::new(240.0);
        f.rt.host_mut().set_hidden(f.target, true);

        f.rt.slide_down(f.target, 300.0);
        assert!(f.visible());
        assert_eq!(f.value(HEIGHT), Some(0.0));
        assert_eq!(f.rt.host().css(f.target, OVERFLOW).as_deref(), Some("hidden"));

        f.run();
        assert_eq!(f.value(HEIGHT), Some(240.0));
        assert_eq!(f.rt.host().css(f.target, HEIGHT).as_deref(), Some("240px"));
    }

    #[test]
    fn test_slide_up_hides_and_clears_overrides() {
        let mut f = Fixture::new(240.0);

        f.rt.slide_up(f.target, 300.0);
        assert_eq!(f.value(HEIGHT), Some(240.0));

        f.run();
        assert!(!f.visible());
        assert_eq!(f.rt.host().value(f.target, HEIGHT), None);
        assert_eq!(f.rt.host().value(f.target, OVERFLOW), None);

        let heights = f.rt.host().history(f.target, HEIGHT);
        assert_eq!(heights.first(), Some(&240.0));
        assert_eq!(heights.last(), Some(&0.0));
    }

    #[test]
    fn test_slide_height_restore() {
        let mut f = Fixture::new(180.0);

        f.rt.slide_up(f.target, 300.0);
        f.rt.tick();
        f.clock.advance(120.0);
        f.rt.tick();
        f.rt.slide_down(f.target, 300.0);

        f.run();
        assert!(f.visible());
        assert_eq!(f.value(HEIGHT), Some(180.0));
    }

    #[test]
    fn test_slide_measures_once() {
        let mut f = Fixture::new(100.0);

        f.rt.slide_down(f.target, 300.0);
        f.rt.tick();
        // Content grows mid-animation; the tween keeps the measured height
        f.rt.host_mut().set_natural_height(f.target, 500.0);

        f.run();
        assert_eq!(f.value(HEIGHT), Some(100.0));
    }

    #[test]
    fn test_toggles_dispatch_on_visibility() {
        let mut f = Fixture::new(60.0);

        f.rt.fade_toggle(f.target, 100.0);
        f.run();
        assert!(!f.visible());

        f.rt.fade_toggle(f.target, 100.0);
        f.run();
        assert!(f.visible());
        assert_eq!(f.value(OPACITY), Some(1.0));

        f.rt.slide_toggle(f.target, 100.0);
        f.run();
        assert!(!f.visible());

        f.rt.slide_toggle(f.target, 100.0);
        f.run();
        assert!(f.visible());
        assert_eq!(f.value(HEIGHT), Some(60.0));
    }

    #[test]
    fn test_animate_to_starts_from_current_values() {
        let mut f = Fixture::new(0.0);
        f.rt.host_mut().set_property(f.target, "width", &StyleValue::Px(100.0));

        f.rt.animate_to(
            f.target,
            [("width", 200.0), ("opacity", 0.5)],
            100.0,
            Easing::Linear,
        );
        f.rt.tick();
        assert_eq!(f.value("width"), Some(100.0));
        assert_eq!(f.value(OPACITY), Some(0.0));

        f.clock.set(50.0);
        f.rt.tick();
        assert_eq!(f.value("width"), Some(150.0));
        assert_eq!(f.value(OPACITY), Some(0.25));

        f.run();
        assert_eq!(f.rt.host().css(f.target, "width").as_deref(), Some("200px"));
        assert_eq!(f.rt.host().css(f.target, OPACITY).as_deref(), Some("0.5"));
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut f = Fixture::new(0.0);
        let fired = Rc::new(Cell::new(0));
        let count = fired.clone();

        let handle = f.rt.animate_to_with(
            f.target,
            [(OPACITY, 1.0)],
            0.0,
            Easing::Linear,
            move |_: &mut MemoryHost, _: TargetId| count.set(count.get() + 1),
        );
        assert!(!f.rt.tick());

        assert_eq!(handle.state(), TweenState::Completed);
        assert_eq!(f.value(OPACITY), Some(1.0));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_animate_to_tolerates_non_finite_values() {
        let mut f = Fixture::new(0.0);
        let t = f.target;
        f.rt.host_mut().set_property(t, "left", &StyleValue::Px(f32::NAN));

        f.rt.animate_to(t, [("left", 80.0), ("top", f32::NAN)], 100.0, Easing::Linear);
        f.rt.tick();
        assert_eq!(f.value("left"), Some(0.0));
        assert_eq!(f.value("top"), None);

        f.clock.set(50.0);
        f.rt.tick();
        assert_eq!(f.value("left"), Some(40.0));

        f.run();
        assert_eq!(f.value("left"), Some(80.0));
        assert!(!f.rt.is_animating(t, "top"));
    }

    #[test]
    fn test_nan_duration_completes_on_first_frame() {
        let mut f = Fixture::new(0.0);

        let handle = f.rt.fade_out(f.target, f64::NAN);
        assert!(!f.rt.tick());
        assert_eq!(handle.state(), TweenState::Completed);
        assert_eq!(f.value(OPACITY), Some(0.0));
        assert!(!f.visible());
    }

    #[test]
    fn test_defaults_come_from_config() {
        let mut f = Fixture::new(0.0);

        f.rt.animate_to(f.target, [("left", 40.0)], None, None);
        let (_, tween) = f.rt.controller().iter().next().unwrap();
        assert_eq!(tween.duration_ms(), 400.0);
        assert_eq!(tween.easing(), Easing::Linear);
    }

    #[test]
    fn test_effects_on_detached_target_are_inert() {
        let mut f = Fixture::new(50.0);
        f.rt.host_mut().remove_target(f.target);

        let handles = [
            f.rt.fade_in(f.target, 100.0),
            f.rt.fade_out(f.target, 100.0),
            f.rt.slide_down(f.target, 100.0),
            f.rt.slide_up(f.target, 100.0),
            f.rt.animate_to(f.target, [("width", 1.0)], 100.0, None),
            f.rt.scroll_to(f.target, 500.0, 0.0),
        ];
        for handle in &handles {
            assert!(handle.is_inert());
            assert_eq!(handle.state(), TweenState::Completed);
        }
        assert!(!f.rt.frame_requested());
    }

    #[test]
    fn test_scroll_to_lands_on_offset_target() {
        let mut f = Fixture::new(0.0);
        f.rt.host_mut().set_property(f.target, SCROLL_TOP, &StyleValue::Px(100.0));

        f.rt.scroll_to(f.target, 900.0, 60.0);
        f.rt.tick();
        f.clock.advance(400.0);
        f.rt.tick();
        assert_eq!(f.value(SCROLL_TOP), Some(470.0));

        f.run();
        assert_eq!(f.value(SCROLL_TOP), Some(840.0));
    }
}
