//! Frame clock
//!
//! The only component that knows how frames are produced. The runtime asks
//! for a frame whenever a tween is running, and the embedding loop checks
//! [`FrameClock::take_frame_request`] before each repaint to decide whether
//! to tick the runtime.
//!
//! Requests coalesce: while one frame is pending, further requests return the
//! same token, so tweens ticked together share one frame.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds on the clock's monotonic timeline
pub type Timestamp = f64;

/// Identifies a pending frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Monotonic time plus a "run before next repaint" request primitive
pub trait FrameClock {
    /// Current time in milliseconds
    fn now(&self) -> Timestamp;

    /// Ask for a frame to be delivered before the next repaint
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a request. Stale tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);

    /// Consume the pending request, returning whether there was one
    fn take_frame_request(&mut self) -> bool;

    /// Whether a frame is currently requested
    fn frame_pending(&self) -> bool;
}

// ============================================================================
// Manual clock
// ============================================================================

#[derive(Debug, Default)]
struct ManualState {
    now: Cell<Timestamp>,
    next_token: Cell<u64>,
    pending: Cell<Option<FrameToken>>,
}

/// A clock driven by explicit calls
///
/// Clones share the same timeline and request state, so a test can keep one
/// clone while the runtime owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    state: Rc<ManualState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock whose timeline starts at `start`
    pub fn starting_at(start: Timestamp) -> Self {
        let clock = Self::new();
        clock.set(start);
        clock
    }

    /// Move time forward by `ms`
    pub fn advance(&self, ms: f64) {
        self.state.now.set(self.state.now.get() + ms);
    }

    /// Jump to an absolute time. Going backwards is not supported.
    pub fn set(&self, now: Timestamp) {
        debug_assert!(now >= self.state.now.get(), "clock went backwards");
        self.state.now.set(now);
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Timestamp {
        self.state.now.get()
    }

    fn request_frame(&mut self) -> FrameToken {
        if let Some(token) = self.state.pending.get() {
            return token;
        }
        let token = FrameToken(self.state.next_token.get());
        self.state.next_token.set(token.0 + 1);
        self.state.pending.set(Some(token));
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.state.pending.get() == Some(token) {
            self.state.pending.set(None);
        }
    }

    fn take_frame_request(&mut self) -> bool {
        self.state.pending.take().is_some()
    }

    fn frame_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }
}

// ============================================================================
// System clock
// ============================================================================

/// Wall-clock backed frame clock for native redraw loops
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    next_token: u64,
    pending: Option<FrameToken>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_token: 0,
            pending: None,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameToken {
        *self.pending.get_or_insert_with(|| {
            let token = FrameToken(self.next_token);
            self.next_token += 1;
            token
        })
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }

    fn take_frame_request(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn frame_pending(&self) -> bool {
        self.pending.is_some()
    }
}
