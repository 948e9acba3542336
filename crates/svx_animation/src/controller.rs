//! Tween controller
//!
//! Owns every live tween and the `(target, property) → tween` ownership
//! registry, and ticks all tweens together once per frame.
//!
//! Conflict policy is last writer wins: starting a tween on a property that
//! is already animating cancels the previous owner outright (all of its
//! properties, not just the contested one) and drops its completion hook.
//! Callers that chain work off a hook must not assume it always runs.

use crate::clock::Timestamp;
use crate::easing::Easing;
use crate::handle::{Completion, TweenHandle, TweenState};
use crate::tween::{PropertyDelta, StepResult, Tween};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::borrow::Cow;
use svx_core::{Host, TargetId};

new_key_type! {
    /// Registry key of a live tween
    pub struct TweenId;
}

/// Runs once, after a tween's final frame has been written
pub type CompletionHook<H> = Box<dyn FnOnce(&mut H, TargetId)>;

struct TweenEntry<H> {
    tween: Tween,
    completion: Completion,
    on_complete: Option<CompletionHook<H>>,
}

type OwnerMap = FxHashMap<TargetId, FxHashMap<Cow<'static, str>, TweenId>>;

/// Registry and scheduler loop for tweens
pub struct TweenController<H> {
    tweens: SlotMap<TweenId, TweenEntry<H>>,
    owners: OwnerMap,
}

impl<H: Host> TweenController<H> {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            owners: FxHashMap::default(),
        }
    }

    /// Start animating `deltas` on `target`.
    ///
    /// Any tween currently owning one of the same properties on the same
    /// target is cancelled and deregistered before the new one is installed.
    pub fn start(
        &mut self,
        target: TargetId,
        deltas: impl IntoIterator<Item = PropertyDelta>,
        duration_ms: f64,
        easing: Easing,
        on_complete: Option<CompletionHook<H>>,
    ) -> TweenHandle {
        self.start_tween(Tween::new(target, deltas, duration_ms, easing), on_complete)
    }

    /// Install an already-built tween
    pub fn start_tween(
        &mut self,
        tween: Tween,
        on_complete: Option<CompletionHook<H>>,
    ) -> TweenHandle {
        let target = tween.target();

        let mut superseded: SmallVec<[TweenId; 2]> = SmallVec::new();
        if let Some(props) = self.owners.get(&target) {
            for delta in tween.deltas() {
                if let Some(&id) = props.get(delta.name.as_ref()) {
                    if !superseded.contains(&id) {
                        superseded.push(id);
                    }
                }
            }
        }
        for id in superseded {
            tracing::trace!(?id, ?target, "superseding running tween");
            self.cancel_id(id);
        }

        let (completion, rx) = Completion::new();
        let names: SmallVec<[Cow<'static, str>; 2]> =
            tween.deltas().iter().map(|d| d.name.clone()).collect();
        tracing::debug!(
            ?target,
            properties = ?names,
            duration_ms = tween.duration_ms(),
            easing = %tween.easing(),
            "tween started"
        );

        let id = self.tweens.insert(TweenEntry {
            tween,
            completion,
            on_complete,
        });
        let props = self.owners.entry(target).or_default();
        for name in names {
            props.insert(name, id);
        }

        TweenHandle::new(id, rx)
    }

    /// Cancel the tween behind `handle` without running its hook.
    ///
    /// Returns `false` if the tween had already finished or was never
    /// scheduled.
    pub fn cancel(&mut self, handle: &TweenHandle) -> bool {
        match handle.id() {
            Some(id) => self.cancel_id(id),
            None => false,
        }
    }

    /// Cancel every tween animating `target`
    pub fn cancel_target(&mut self, target: TargetId) -> usize {
        let Some(props) = self.owners.get(&target) else {
            return 0;
        };
        let mut ids: SmallVec<[TweenId; 4]> = SmallVec::new();
        for &id in props.values() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids.into_iter().filter(|&id| self.cancel_id(id)).count()
    }

    fn cancel_id(&mut self, id: TweenId) -> bool {
        let Some(mut entry) = self.tweens.remove(id) else {
            return false;
        };
        entry.tween.cancel();
        release(&mut self.owners, id, &entry.tween);
        entry.completion.resolve(TweenState::Cancelled);
        tracing::trace!(?id, target = ?entry.tween.target(), "tween cancelled");
        true
    }

    /// Whether some running tween owns `(target, property)`
    pub fn is_animating(&self, target: TargetId, property: &str) -> bool {
        self.owner(target, property).is_some()
    }

    /// The tween currently owning `(target, property)`
    pub fn owner(&self, target: TargetId, property: &str) -> Option<TweenId> {
        self.owners.get(&target)?.get(property).copied()
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id).map(|e| &e.tween)
    }

    /// Step every running tween to `now`, then retire the ones that finished
    /// and run their hooks.
    ///
    /// Returns whether any tween still needs another frame.
    pub fn tick(&mut self, now: Timestamp, host: &mut H) -> bool {
        let mut finished: SmallVec<[TweenId; 4]> = SmallVec::new();
        for (id, entry) in self.tweens.iter_mut() {
            if entry.tween.step(now, &mut *host) == StepResult::Completed {
                finished.push(id);
            }
        }

        for id in finished {
            let Some(entry) = self.tweens.remove(id) else {
                continue;
            };
            release(&mut self.owners, id, &entry.tween);
            tracing::debug!(?id, target = ?entry.tween.target(), "tween completed");
            if let Some(hook) = entry.on_complete {
                hook(&mut *host, entry.tween.target());
            }
            entry.completion.resolve(TweenState::Completed);
        }

        self.has_active_tweens()
    }

    pub fn has_active_tweens(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Number of live tweens
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Iterate over live tweens
    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &Tween)> {
        self.tweens.iter().map(|(id, e)| (id, &e.tween))
    }
}

impl<H: Host> Default for TweenController<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop every ownership entry still pointing at `id`
fn release(owners: &mut OwnerMap, id: TweenId, tween: &Tween) {
    let target = tween.target();
    let Some(props) = owners.get_mut(&target) else {
        return;
    };
    for delta in tween.deltas() {
        if props.get(delta.name.as_ref()) == Some(&id) {
            props.remove(delta.name.as_ref());
        }
    }
    if props.is_empty() {
        owners.remove(&target);
    }
}
