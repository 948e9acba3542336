//! Tweens
//!
//! A tween interpolates one or more numeric properties of a single target
//! from their start values to their end values over a fixed duration. It
//! knows nothing about the registry it lives in; the controller decides when
//! to step it and what to do once it finishes.

use crate::clock::Timestamp;
use crate::easing::Easing;
use crate::handle::TweenState;
use smallvec::SmallVec;
use std::borrow::Cow;
use svx_core::{StyleSink, StyleValue, TargetId, Unit};

/// One animated property
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDelta {
    pub name: Cow<'static, str>,
    pub from: f32,
    pub to: f32,
    pub unit: Unit,
}

impl PropertyDelta {
    pub fn new(name: impl Into<Cow<'static, str>>, from: f32, to: f32, unit: Unit) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            unit,
        }
    }

    /// Unitless delta, used for opacity
    pub fn number(name: impl Into<Cow<'static, str>>, from: f32, to: f32) -> Self {
        Self::new(name, from, to, Unit::None)
    }

    /// Pixel delta, used for geometry
    pub fn px(name: impl Into<Cow<'static, str>>, from: f32, to: f32) -> Self {
        Self::new(name, from, to, Unit::Px)
    }

    /// Interpolated value at an eased progress.
    ///
    /// Always inside `[from, to]`; exactly `to` once `eased` reaches 1.0.
    /// Non-finite endpoints have no range to interpolate over and jump to `to`.
    pub fn value_at(&self, eased: f32) -> f32 {
        if eased >= 1.0 || !self.from.is_finite() || !self.to.is_finite() {
            return self.to;
        }
        let value = self.from + (self.to - self.from) * eased;
        value.clamp(self.from.min(self.to), self.from.max(self.to))
    }
}

/// Per-tween delta storage. Effects animate a single property almost always.
pub type Deltas = SmallVec<[PropertyDelta; 2]>;

/// Result of stepping a tween once
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Values written; another frame is needed
    Running,
    /// Final values written; the tween is now `Completed`
    Completed,
    /// The tween was already terminal; nothing was written
    Skipped,
}

/// A single time-driven interpolation
#[derive(Clone, Debug)]
pub struct Tween {
    target: TargetId,
    deltas: Deltas,
    duration_ms: f64,
    easing: Easing,
    /// Captured on the first frame, not at creation, so queueing delay does
    /// not eat into the duration
    start_time: Option<Timestamp>,
    state: TweenState,
}

impl Tween {
    pub fn new(
        target: TargetId,
        deltas: impl IntoIterator<Item = PropertyDelta>,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            deltas: deltas.into_iter().collect(),
            duration_ms,
            easing,
            start_time: None,
            state: TweenState::Running,
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn deltas(&self) -> &[PropertyDelta] {
        &self.deltas
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    /// Whether the tween has reached its end at `elapsed` milliseconds.
    ///
    /// Decided on elapsed time rather than on the f32 progress so rounding can
    /// never finish a tween early. A NaN duration counts as zero; an infinite
    /// one never ends.
    fn finished_at(&self, elapsed: f64) -> bool {
        self.deltas.is_empty()
            || self.duration_ms.is_nan()
            || self.duration_ms <= 0.0
            || elapsed >= self.duration_ms
    }

    /// Raw (un-eased) progress after `elapsed` milliseconds, in `[0, 1]`
    pub fn progress_at(&self, elapsed: f64) -> f32 {
        if self.finished_at(elapsed) {
            return 1.0;
        }
        (elapsed / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Property values after `elapsed` milliseconds, in delta order
    pub fn sample(&self, elapsed: f64) -> SmallVec<[f32; 2]> {
        let eased = self.easing.apply(self.progress_at(elapsed));
        self.deltas.iter().map(|d| d.value_at(eased)).collect()
    }

    /// Advance to `now`, writing every property through `sink`.
    pub fn step<S: StyleSink + ?Sized>(&mut self, now: Timestamp, sink: &mut S) -> StepResult {
        if self.state != TweenState::Running {
            return StepResult::Skipped;
        }

        let start = *self.start_time.get_or_insert(now);
        let elapsed = now - start;
        let finished = self.finished_at(elapsed);
        let eased = if finished {
            1.0
        } else {
            self.easing.apply(self.progress_at(elapsed))
        };

        for delta in &self.deltas {
            let value = StyleValue::with_unit(delta.value_at(eased), delta.unit);
            sink.set_property(self.target, &delta.name, &value);
        }

        if finished {
            self.state = TweenState::Completed;
            StepResult::Completed
        } else {
            StepResult::Running
        }
    }

    /// Stop without writing anything further. No-op once terminal.
    pub fn cancel(&mut self) -> bool {
        if self.state != TweenState::Running {
            return false;
        }
        self.state = TweenState::Cancelled;
        true
    }
}
