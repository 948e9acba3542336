//! Tween handles and completion notification
//!
//! Each tween owns the sending half of a `watch` channel carrying its
//! lifecycle state. The handle returned to callers holds a receiver, so any
//! number of observers can poll the state or await the terminal outcome
//! without tracking "already finished" themselves.

use crate::controller::TweenId;
use tokio::sync::watch;

/// Lifecycle state of a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenState {
    Running,
    Completed,
    Cancelled,
}

impl TweenState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TweenState::Running)
    }
}

/// How a tween ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenOutcome {
    /// Progress reached 1.0 and the completion hook ran
    Completed,
    /// Stopped explicitly or superseded by a newer tween; the hook was dropped
    Cancelled,
}

/// Sending half, owned by the controller's tween entry
#[derive(Debug)]
pub(crate) struct Completion {
    tx: watch::Sender<TweenState>,
}

impl Completion {
    pub(crate) fn new() -> (Self, watch::Receiver<TweenState>) {
        let (tx, rx) = watch::channel(TweenState::Running);
        (Self { tx }, rx)
    }

    /// Resolve the notification. Only the first terminal state sticks.
    pub(crate) fn resolve(&self, state: TweenState) {
        self.tx.send_if_modified(|current| {
            if current.is_terminal() {
                return false;
            }
            *current = state;
            true
        });
    }
}

/// Caller-facing handle to a started tween
#[derive(Clone, Debug)]
pub struct TweenHandle {
    id: Option<TweenId>,
    rx: watch::Receiver<TweenState>,
}

impl TweenHandle {
    pub(crate) fn new(id: TweenId, rx: watch::Receiver<TweenState>) -> Self {
        Self { id: Some(id), rx }
    }

    /// A handle that was never scheduled and reports `Completed`.
    ///
    /// Returned when an effect is invoked on a detached target.
    pub fn inert() -> Self {
        let (_tx, rx) = watch::channel(TweenState::Completed);
        Self { id: None, rx }
    }

    pub(crate) fn id(&self) -> Option<TweenId> {
        self.id
    }

    /// Whether this handle was produced without scheduling anything
    pub fn is_inert(&self) -> bool {
        self.id.is_none()
    }

    pub fn state(&self) -> TweenState {
        *self.rx.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Outcome once the tween has reached a terminal state
    pub fn outcome(&self) -> Option<TweenOutcome> {
        match self.state() {
            TweenState::Running => None,
            TweenState::Completed => Some(TweenOutcome::Completed),
            TweenState::Cancelled => Some(TweenOutcome::Cancelled),
        }
    }

    /// Wait for the tween to finish.
    ///
    /// If the runtime is dropped while the tween is still running, the tween
    /// counts as cancelled.
    pub async fn finished(&self) -> TweenOutcome {
        let mut rx = self.rx.clone();
        let state = match rx.wait_for(TweenState::is_terminal).await {
            Ok(state) => *state,
            Err(_) => TweenState::Cancelled,
        };
        match state {
            TweenState::Completed => TweenOutcome::Completed,
            _ => TweenOutcome::Cancelled,
        }
    }
}
