//! LOD systems.
//!
//! Evaluation only touches each group's own state, so groups are evaluated in
//! parallel. Visibility writes reach other entities and run afterwards on a
//! single thread.

use bevy_ecs::prelude::*;
use vista_lod::{DanglingHandle, RenderableStore, apply_transition};

use crate::{Active, LodGroup, LodSelectorRes, LodStats, Position, Viewpoint, ViewpointCamera};

/// Copies the first [`ViewpointCamera`]'s position into [`Viewpoint`], or
/// clears it when no camera exists.
///
/// **Set:** `LodSet::Viewpoint`.
pub fn update_viewpoint(
    cameras: Query<&Position, With<ViewpointCamera>>,
    mut viewpoint: ResMut<Viewpoint>,
) {
    viewpoint.position = cameras.iter().next().map(|position| position.0);
}

/// Selects a level for every group and records the transition, if any.
///
/// **Set:** `LodSet::Evaluate` (reads `Viewpoint`, `Position`; writes `LodGroup`).
pub fn evaluate_lod_groups(
    viewpoint: Res<Viewpoint>,
    selector: Res<LodSelectorRes>,
    mut stats: ResMut<LodStats>,
    mut groups: Query<(&Position, &mut LodGroup)>,
) {
    stats.begin_frame();

    let Some(origin) = viewpoint.position else {
        stats.skipped_frames += 1;
        tracing::trace!("no viewpoint, LOD evaluation skipped");
        return;
    };

    let selector = &selector.0;
    groups.par_iter_mut().for_each(|(position, group)| {
        let group = group.into_inner();
        let distance = position.0.distance(origin);
        group.pending = group.object.evaluate(selector, distance);
    });

    stats.evaluated = groups.iter().count();
}

/// Visibility writes against renderables' [`Active`] components.
struct ActiveStore<'q, 'w, 's> {
    renderables: &'q mut Query<'w, 's, &'static mut Active>,
}

impl RenderableStore for ActiveStore<'_, '_, '_> {
    type Handle = Entity;

    fn set_active(&mut self, handle: Entity, active: bool) -> Result<(), DanglingHandle> {
        let mut flag = self.renderables.get_mut(handle).map_err(|_| DanglingHandle)?;
        flag.0 = active;
        Ok(())
    }
}

/// Applies every pending transition: hides the old level, shows the new one.
///
/// **Set:** `LodSet::Apply` (writes `LodGroup`, `Active`, `LodStats`).
pub fn apply_lod_transitions(
    mut stats: ResMut<LodStats>,
    mut groups: Query<(Entity, &mut LodGroup)>,
    mut renderables: Query<&'static mut Active>,
) {
    let mut store = ActiveStore {
        renderables: &mut renderables,
    };

    for (entity, mut group) in &mut groups {
        let Some(transition) = group.pending.take() else {
            continue;
        };
        let outcome = apply_transition(transition, group.object.levels(), &mut store);

        stats.transitions += 1;
        stats.total_transitions += 1;
        stats.toggles += usize::from(outcome.toggles());
        stats.dangling += usize::from(outcome.skipped);
        tracing::debug!(
            ?entity,
            from = %transition.from,
            to = %transition.to,
            "LOD transition"
        );
    }
}
