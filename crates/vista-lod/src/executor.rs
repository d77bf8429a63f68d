//! Applies transitions as visibility toggles on renderable handles.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::DanglingHandle;
use crate::object::LevelRecord;
use crate::tracker::Transition;

/// External store of renderable entities whose "active" flag the LOD core flips.
///
/// Implementations must be idempotent: activating an active handle or
/// deactivating an inactive one is a silent no-op.
pub trait RenderableStore {
    /// Opaque reference to one renderable entity.
    type Handle: Copy + fmt::Debug;

    /// Set the active flag of `handle`, or report that it no longer resolves.
    fn set_active(&mut self, handle: Self::Handle, active: bool) -> Result<(), DanglingHandle>;
}

/// Counts of what one transition actually did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Handles hidden (0 or 1).
    pub deactivated: u8,
    /// Handles shown (0 or 1).
    pub activated: u8,
    /// Halves skipped because the handle was dangling or the level unknown.
    pub skipped: u8,
}

impl ApplyOutcome {
    /// Total toggles issued to the store.
    pub fn toggles(&self) -> u8 {
        self.deactivated + self.activated
    }
}

/// Hide the level being left and show the level being entered.
///
/// A half whose handle is dangling is skipped and not retried; the caller's
/// level bookkeeping has already moved on regardless.
pub fn apply_transition<S: RenderableStore>(
    transition: Transition,
    levels: &[LevelRecord<S::Handle>],
    store: &mut S,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    if let Some(from) = transition.from.index() {
        if toggle(levels, from, false, store) {
            outcome.deactivated += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    if let Some(to) = transition.to.index() {
        if toggle(levels, to, true, store) {
            outcome.activated += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    outcome
}

fn toggle<S: RenderableStore>(
    levels: &[LevelRecord<S::Handle>],
    level: usize,
    active: bool,
    store: &mut S,
) -> bool {
    let Some(record) = levels.get(level) else {
        tracing::warn!(level, "transition references a level the object does not have");
        return false;
    };
    match store.set_active(record.handle, active) {
        Ok(()) => true,
        Err(DanglingHandle) => {
            tracing::warn!(level, handle = ?record.handle, active, "skipping dangling LOD handle");
            false
        }
    }
}

/// Opaque handle into a [`VisibilityTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableHandle(pub u64);

/// In-memory renderable store keyed by [`RenderableHandle`].
#[derive(Debug, Default)]
pub struct VisibilityTable {
    active: FxHashMap<RenderableHandle, bool>,
    next_id: u64,
    writes: usize,
}

impl VisibilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new handle with the given initial state.
    pub fn spawn(&mut self, active: bool) -> RenderableHandle {
        let handle = RenderableHandle(self.next_id);
        self.next_id += 1;
        self.active.insert(handle, active);
        handle
    }

    /// Forget a handle; later toggles on it report [`DanglingHandle`].
    pub fn remove(&mut self, handle: RenderableHandle) -> bool {
        self.active.remove(&handle).is_some()
    }

    /// Whether `handle` is active, or `None` if it does not resolve.
    pub fn is_active(&self, handle: RenderableHandle) -> Option<bool> {
        self.active.get(&handle).copied()
    }

    /// Number of active handles.
    pub fn active_count(&self) -> usize {
        self.active.values().filter(|&&a| a).count()
    }

    /// Number of successful `set_active` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl RenderableStore for VisibilityTable {
    type Handle = RenderableHandle;

    fn set_active(&mut self, handle: RenderableHandle, active: bool) -> Result<(), DanglingHandle> {
        let slot = self.active.get_mut(&handle).ok_or(DanglingHandle)?;
        *slot = active;
        self.writes += 1;
        Ok(())
    }
}
