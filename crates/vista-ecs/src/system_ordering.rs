//! System sets for the LOD pipeline and their ordering.
//!
//! The viewpoint is resolved first, every group is then evaluated against it
//! in parallel, and the resulting transitions are applied one by one.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;

use crate::systems::{apply_lod_transitions, evaluate_lod_groups, update_viewpoint};

/// Sets for the per-frame LOD update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LodSet {
    /// Copy the camera position into [`Viewpoint`](crate::Viewpoint).
    Viewpoint,
    /// Select a level per group and record the pending transition.
    Evaluate,
    /// Flip renderable visibility for pending transitions.
    Apply,
}

/// Configure ordering constraints for the LOD sets.
pub fn configure_lod_ordering(schedule: &mut Schedule) {
    schedule.configure_sets((
        LodSet::Viewpoint.before(LodSet::Evaluate),
        LodSet::Evaluate.before(LodSet::Apply),
    ));
}

/// Register the LOD systems, each in its set, with ordering configured.
pub fn add_lod_systems(schedule: &mut Schedule) {
    configure_lod_ordering(schedule);
    schedule.add_systems((
        update_viewpoint.in_set(LodSet::Viewpoint),
        evaluate_lod_groups.in_set(LodSet::Evaluate),
        apply_lod_transitions.in_set(LodSet::Apply),
    ));
}
