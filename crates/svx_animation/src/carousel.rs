//! Carousel
//!
//! A deck of stacked slides where exactly one is opaque. Switching slides
//! crossfades every slide's opacity toward 1 (selected) or 0 (the rest), so a
//! switch issued mid-fade simply retargets the running tweens.
//!
//! Autoplay is measured on the runtime's frame clock rather than a separate
//! timer. Call [`Carousel::tick`] after [`AnimationRuntime::tick`] on every
//! frame; while autoplay is active the carousel keeps frames coming.

use crate::clock::{FrameClock, Timestamp};
use crate::easing::Easing;
use crate::runtime::AnimationRuntime;
use svx_core::{Host, StyleValue, TargetId};

const OPACITY: &str = "opacity";

/// Carousel behaviour switches. Unset timings fall back to the runtime
/// configuration.
#[derive(Clone, Debug, Default)]
pub struct CarouselOptions {
    pub autoplay: bool,
    pub interval_ms: Option<f64>,
    pub fade_ms: Option<f64>,
}

impl CarouselOptions {
    pub fn autoplay() -> Self {
        Self {
            autoplay: true,
            ..Default::default()
        }
    }

    pub fn with_interval(mut self, interval_ms: f64) -> Self {
        self.interval_ms = Some(interval_ms);
        self
    }

    pub fn with_fade(mut self, fade_ms: f64) -> Self {
        self.fade_ms = Some(fade_ms);
        self
    }
}

/// Crossfading slide deck
#[derive(Debug)]
pub struct Carousel {
    slides: Vec<TargetId>,
    current: usize,
    autoplay: bool,
    paused: bool,
    interval_ms: f64,
    fade_ms: f64,
    easing: Easing,
    last_advance: Timestamp,
}

impl Carousel {
    /// Show the first slide immediately and hide the rest
    pub fn new<H: Host + 'static, C: FrameClock>(
        rt: &mut AnimationRuntime<H, C>,
        slides: Vec<TargetId>,
        options: CarouselOptions,
    ) -> Self {
        let defaults = &rt.config().carousel;
        let interval_ms = options.interval_ms.unwrap_or(defaults.interval_ms);
        let fade_ms = options.fade_ms.unwrap_or(defaults.fade_ms);
        let easing = defaults.fade_easing;

        // A running fade would overwrite the initial opacities on the next frame
        for &slide in &slides {
            rt.cancel_target(slide);
        }
        let host = rt.host_mut();
        for (i, &slide) in slides.iter().enumerate() {
            let opacity = if i == 0 { 1.0 } else { 0.0 };
            host.set_property(slide, OPACITY, &StyleValue::Number(opacity));
        }

        let carousel = Self {
            slides,
            current: 0,
            autoplay: options.autoplay,
            paused: false,
            interval_ms,
            fade_ms,
            easing,
            last_advance: rt.now(),
        };
        if carousel.is_playing() {
            rt.request_frame();
        }
        tracing::debug!(
            slides = carousel.slides.len(),
            autoplay = carousel.autoplay,
            interval_ms,
            "carousel created"
        );
        carousel
    }

    /// Index of the selected slide
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[TargetId] {
        &self.slides
    }

    /// Whether autoplay is on and not paused
    pub fn is_playing(&self) -> bool {
        self.autoplay && !self.paused && !self.slides.is_empty()
    }

    /// Crossfade to slide `index`. Out-of-range indices are ignored.
    pub fn go_to<H: Host + 'static, C: FrameClock>(
        &mut self,
        rt: &mut AnimationRuntime<H, C>,
        index: usize,
    ) -> bool {
        if index >= self.slides.len() {
            tracing::warn!(index, len = self.slides.len(), "carousel index out of range");
            return false;
        }
        for (i, &slide) in self.slides.iter().enumerate() {
            let opacity = if i == index { 1.0 } else { 0.0 };
            rt.animate_to(slide, [(OPACITY, opacity)], self.fade_ms, self.easing);
        }
        self.current = index;
        true
    }

    /// Advance to the following slide, wrapping at the end
    pub fn next<H: Host + 'static, C: FrameClock>(&mut self, rt: &mut AnimationRuntime<H, C>) {
        if self.slides.is_empty() {
            return;
        }
        let index = (self.current + 1) % self.slides.len();
        self.go_to(rt, index);
    }

    /// Go back to the previous slide, wrapping at the start
    pub fn prev<H: Host + 'static, C: FrameClock>(&mut self, rt: &mut AnimationRuntime<H, C>) {
        if self.slides.is_empty() {
            return;
        }
        let len = self.slides.len();
        let index = (self.current + len - 1) % len;
        self.go_to(rt, index);
    }

    /// Suspend autoplay, e.g. while the pointer hovers the carousel
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume autoplay. The next advance is a full interval away.
    pub fn resume<H: Host, C: FrameClock>(&mut self, rt: &mut AnimationRuntime<H, C>) {
        self.paused = false;
        self.last_advance = rt.now();
        if self.is_playing() {
            rt.request_frame();
        }
    }

    /// Stop autoplay and halt any crossfade in progress
    pub fn stop<H: Host, C: FrameClock>(&mut self, rt: &mut AnimationRuntime<H, C>) {
        self.autoplay = false;
        for &slide in &self.slides {
            rt.cancel_target(slide);
        }
    }

    /// Per-frame autoplay check. Returns whether the carousel advanced.
    pub fn tick<H: Host + 'static, C: FrameClock>(
        &mut self,
        rt: &mut AnimationRuntime<H, C>,
    ) -> bool {
        if !self.is_playing() {
            return false;
        }
        let now = rt.now();
        let advanced = now - self.last_advance >= self.interval_ms;
        if advanced {
            self.last_advance = now;
            self.next(rt);
        }
        rt.request_frame();
        advanced
    }
}
