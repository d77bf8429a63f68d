//! Registry of tracked objects and the per-tick evaluation driver.
//!
//! A tick runs in two phases. Every object is evaluated in parallel
//! (distance, selection, diff against its current level); objects share
//! nothing but the read-only viewpoint, so no locking is needed. The
//! collected transitions are then applied to the renderable store one
//! after another, which is the only step that touches handle visibility.

use std::fmt;

use glam::Vec3;
use rayon::prelude::*;

use crate::diagnostics::{DebugFlags, LodDiagnostics};
use crate::error::LodError;
use crate::executor::{RenderableStore, apply_transition};
use crate::object::{LodDescriptor, TrackedObject};
use crate::selector::{GracePolicy, LodSelector};
use crate::settings::LodSettings;
use crate::tracker::Transition;

/// Identifier handed out at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick was skipped because no viewpoint was available.
    pub skipped: bool,
    /// Objects evaluated.
    pub evaluated: usize,
    /// Level changes, in registration order.
    pub transitions: Vec<(ObjectId, Transition)>,
    /// Visibility toggles issued to the store.
    pub toggles: usize,
    /// Toggle halves skipped on dangling handles.
    pub dangling: usize,
}

#[derive(Debug)]
struct Entry<H> {
    id: ObjectId,
    position: Vec3,
    object: TrackedObject<H>,
}

/// Owns every tracked object and drives their evaluation each tick.
#[derive(Debug)]
pub struct LodRegistry<H> {
    settings: LodSettings,
    selector: LodSelector,
    /// Sorted by id; ids only ever grow.
    entries: Vec<Entry<H>>,
    next_id: u64,
}

impl<H> LodRegistry<H>
where
    H: Copy + fmt::Debug + Send + Sync,
{
    /// Create an empty registry.
    pub fn new(settings: LodSettings) -> Self {
        Self {
            selector: LodSelector::new(settings.grace),
            settings,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Settings objects are registered with.
    pub fn settings(&self) -> &LodSettings {
        &self.settings
    }

    /// Switch the grace policy used from the next tick on.
    ///
    /// Distance-model changes only affect objects registered afterwards.
    pub fn set_grace_policy(&mut self, grace: GracePolicy) {
        self.settings.grace = grace;
        self.selector = LodSelector::new(grace);
    }

    /// Register an object at `position` and put its levels into their
    /// initial visibility (level 0 shown, the rest hidden).
    ///
    /// Returns `Ok(None)` for an object without levels.
    pub fn register<S>(
        &mut self,
        descriptor: LodDescriptor<H>,
        position: Vec3,
        store: &mut S,
    ) -> Result<Option<ObjectId>, LodError>
    where
        S: RenderableStore<Handle = H>,
    {
        let Some(object) = TrackedObject::new(descriptor, &self.settings)? else {
            return Ok(None);
        };

        let dangling = object.initialize_visibility(store);

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            %id,
            levels = object.level_count(),
            cull_distance = object.table().cull_distance(),
            dangling,
            "registered LOD object"
        );
        self.entries.push(Entry {
            id,
            position,
            object,
        });
        Ok(Some(id))
    }

    /// Stop tracking an object. Its handles are left as they are.
    pub fn unregister(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Move an object.
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<(), LodError> {
        let i = self.index_of(id).ok_or(LodError::UnknownObject(id.0))?;
        self.entries[i].position = position;
        Ok(())
    }

    /// Apply debug overlay flags to one object.
    pub fn apply_debug_config(&mut self, id: ObjectId, flags: DebugFlags) -> Result<(), LodError> {
        let i = self.index_of(id).ok_or(LodError::UnknownObject(id.0))?;
        self.entries[i].object.set_debug(flags);
        Ok(())
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject<H>> {
        self.index_of(id).map(|i| &self.entries[i].object)
    }

    /// Current position of an object.
    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.index_of(id).map(|i| self.entries[i].position)
    }

    /// All objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &TrackedObject<H>)> {
        self.entries.iter().map(|e| (e.id, &e.object))
    }

    /// Number of tracked objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Debug snapshot of one object, measured from `viewpoint` if given.
    pub fn diagnostics(&self, id: ObjectId, viewpoint: Option<Vec3>) -> Option<LodDiagnostics> {
        let entry = &self.entries[self.index_of(id)?];
        let distance = viewpoint.map(|eye| eye.distance(entry.position));
        Some(entry.object.diagnostics(distance))
    }

    /// Evaluate every object against `viewpoint` and apply the resulting
    /// transitions to `store`.
    ///
    /// Without a viewpoint the whole tick is skipped and nothing changes.
    pub fn tick<S>(&mut self, viewpoint: Option<Vec3>, store: &mut S) -> TickReport
    where
        S: RenderableStore<Handle = H>,
    {
        let Some(eye) = viewpoint else {
            tracing::trace!("no active viewpoint, skipping LOD tick");
            return TickReport {
                skipped: true,
                ..Default::default()
            };
        };

        let selector = self.selector;
        let pending: Vec<(usize, Transition)> = self
            .entries
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, entry)| {
                let distance = eye.distance(entry.position);
                entry.object.evaluate(&selector, distance).map(|t| (i, t))
            })
            .collect();

        let mut report = TickReport {
            evaluated: self.entries.len(),
            transitions: Vec::with_capacity(pending.len()),
            ..Default::default()
        };

        for (i, transition) in pending {
            let entry = &self.entries[i];
            let outcome = apply_transition(transition, entry.object.levels(), store);
            report.toggles += usize::from(outcome.toggles());
            report.dangling += usize::from(outcome.skipped);
            tracing::trace!(
                id = %entry.id,
                from = %transition.from,
                to = %transition.to,
                "LOD transition"
            );
            report.transitions.push((entry.id, transition));
        }

        report
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |e| e.id).ok()
    }
}
