//! Animation runtime
//!
//! The composition root: owns the host, the frame clock, the tween controller
//! and the configuration. Built once per session and handed to whatever needs
//! to animate, instead of being looked up from a global registry.
//!
//! The embedding loop drives it:
//!
//! ```rust
//! use svx_animation::{AnimationRuntime, ManualClock};
//! use svx_core::MemoryHost;
//!
//! let clock = ManualClock::new();
//! let mut host = MemoryHost::new();
//! let panel = host.create_target(80.0);
//! let mut runtime = AnimationRuntime::new(host, clock.clone());
//!
//! let handle = runtime.fade_in(panel, 200.0);
//! while runtime.frame_requested() {
//!     runtime.tick();
//!     clock.advance(16.0);
//! }
//! assert!(handle.is_finished());
//! ```

use crate::clock::{FrameClock, Timestamp};
use crate::config::AnimationConfig;
use crate::controller::{CompletionHook, TweenController};
use crate::easing::Easing;
use crate::handle::TweenHandle;
use crate::tween::PropertyDelta;
use svx_core::{Host, TargetId};

/// Host, clock, controller and configuration wired together
pub struct AnimationRuntime<H: Host, C: FrameClock> {
    host: H,
    clock: C,
    controller: TweenController<H>,
    config: AnimationConfig,
    /// A frame was requested through [`Self::request_frame`] and has not been
    /// delivered yet
    external_request: bool,
}

impl<H: Host, C: FrameClock> AnimationRuntime<H, C> {
    pub fn new(host: H, clock: C) -> Self {
        Self::with_config(host, clock, AnimationConfig::default())
    }

    pub fn with_config(host: H, clock: C, config: AnimationConfig) -> Self {
        Self {
            host,
            clock,
            controller: TweenController::new(),
            config,
            external_request: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn controller(&self) -> &TweenController<H> {
        &self.controller
    }

    /// Tear down, returning the host
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Start a tween on `target`, applying the controller's conflict policy.
    ///
    /// Returns an inert, already completed handle if the target is detached.
    pub fn start(
        &mut self,
        target: TargetId,
        deltas: impl IntoIterator<Item = PropertyDelta>,
        duration_ms: f64,
        easing: Easing,
        on_complete: Option<CompletionHook<H>>,
    ) -> TweenHandle {
        if !self.ensure_attached(target, "start") {
            return TweenHandle::inert();
        }
        let handle = self
            .controller
            .start(target, deltas, duration_ms, easing, on_complete);
        self.clock.request_frame();
        handle
    }

    /// Cancel a tween without running its completion hook
    pub fn cancel(&mut self, handle: &TweenHandle) -> bool {
        let cancelled = self.controller.cancel(handle);
        self.settle();
        cancelled
    }

    /// Cancel every tween on `target`
    pub fn cancel_target(&mut self, target: TargetId) -> usize {
        let count = self.controller.cancel_target(target);
        self.settle();
        count
    }

    pub fn is_animating(&self, target: TargetId, property: &str) -> bool {
        self.controller.is_animating(target, property)
    }

    /// Ask the clock for another frame even if no tween is running.
    ///
    /// Used by components that measure time between frames, such as an
    /// autoplaying carousel.
    pub fn request_frame(&mut self) {
        self.external_request = true;
        self.clock.request_frame();
    }

    /// Whether the runtime is waiting for a frame
    pub fn frame_requested(&self) -> bool {
        self.clock.frame_pending()
    }

    /// Run one frame at the clock's current time.
    ///
    /// Consumes the pending frame request and issues a new one while any
    /// tween is still running. Returns whether tweens remain.
    pub fn tick(&mut self) -> bool {
        self.clock.take_frame_request();
        self.external_request = false;
        let now = self.clock.now();
        let active = self.controller.tick(now, &mut self.host);
        if active {
            self.clock.request_frame();
        }
        active
    }

    /// Drop a pending frame request once nothing is left to animate and no
    /// other component asked for the frame
    fn settle(&mut self) {
        if !self.controller.has_active_tweens() && !self.external_request {
            self.clock.take_frame_request();
        }
    }

    pub(crate) fn ensure_attached(&self, target: TargetId, effect: &str) -> bool {
        if self.host.is_attached(target) {
            return true;
        }
        tracing::warn!(?target, effect, "target is not attached; animation skipped");
        false
    }

    pub(crate) fn resolve_duration(&self, duration_ms: Option<f64>) -> f64 {
        duration_ms.unwrap_or(self.config.default_duration_ms)
    }
}
