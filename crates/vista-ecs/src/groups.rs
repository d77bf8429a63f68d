//! Spawning LOD groups and reading their debug state.

use bevy_ecs::prelude::*;
use glam::Vec3;
use vista_lod::{
    DanglingHandle, DebugFlags, LodDescriptor, LodDiagnostics, LodError, LodSettings,
    RenderableStore, TrackedObject,
};

use crate::{Active, LodDebugInfo, LodGroup, Position, Viewpoint};

/// Visibility writes made directly on the world, outside any schedule.
struct WorldStore<'w>(&'w mut World);

impl RenderableStore for WorldStore<'_> {
    type Handle = Entity;

    fn set_active(&mut self, handle: Entity, active: bool) -> Result<(), DanglingHandle> {
        let mut flag = self.0.get_mut::<Active>(handle).ok_or(DanglingHandle)?;
        flag.0 = active;
        Ok(())
    }
}

/// Spawn a LOD group at `position` whose levels are the renderable entities
/// named in `descriptor`.
///
/// Level 0 is shown and every other level hidden before this returns.
/// Renderables must already carry an [`Active`] component; those that don't
/// are logged and left alone. Returns `Ok(None)` for a descriptor without
/// levels, which needs no LOD management.
pub fn spawn_lod_group(
    world: &mut World,
    position: Vec3,
    descriptor: LodDescriptor<Entity>,
    settings: &LodSettings,
) -> Result<Option<Entity>, LodError> {
    let Some(object) = TrackedObject::new(descriptor, settings)? else {
        return Ok(None);
    };

    let dangling = object.initialize_visibility(&mut WorldStore(world));
    let levels = object.level_count();
    let debug = object.debug();
    let entity = world
        .spawn((Position(position), LodGroup::new(object), LodDebugInfo(debug)))
        .id();

    tracing::debug!(?entity, levels, dangling, "spawned LOD group");
    Ok(Some(entity))
}

/// Set the debug overlay switches of one group. Returns `false` when
/// `entity` is not a LOD group.
pub fn apply_debug_config(world: &mut World, entity: Entity, flags: DebugFlags) -> bool {
    let Some(mut group) = world.get_mut::<LodGroup>(entity) else {
        return false;
    };
    group.object.set_debug(flags);

    if let Some(mut info) = world.get_mut::<LodDebugInfo>(entity) {
        info.0 = flags;
    } else {
        world.entity_mut(entity).insert(LodDebugInfo(flags));
    }
    true
}

/// Snapshot every group's LOD state for debug overlays.
///
/// Distances are measured from the current [`Viewpoint`]; they are `None`
/// when there is no viewpoint.
pub fn collect_lod_diagnostics(world: &mut World) -> Vec<(Entity, LodDiagnostics)> {
    let origin = world
        .get_resource::<Viewpoint>()
        .and_then(|viewpoint| viewpoint.position);

    let mut query = world.query::<(Entity, &Position, &LodGroup)>();
    query
        .iter(world)
        .map(|(entity, position, group)| {
            let distance = origin.map(|origin| position.0.distance(origin));
            (entity, group.object.diagnostics(distance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add_lod_systems, create_world, ViewpointCamera};
    use vista_lod::LodLevel;

    fn renderables(world: &mut World, n: usize) -> Vec<Entity> {
        (0..n).map(|_| world.spawn(Active(true)).id()).collect()
    }

    #[test]
    fn test_spawn_sets_initial_visibility() {
        let mut world = create_world();
        let levels = renderables(&mut world, 3);
        let descriptor = LodDescriptor::from_parts(2.0, [0.6, 0.3, 0.1], levels.clone()).unwrap();

        let group = spawn_lod_group(&mut world, Vec3::ONE, descriptor, &LodSettings::default())
            .unwrap()
            .unwrap();

        let visible: Vec<bool> = levels
            .iter()
            .map(|e| world.get::<Active>(*e).unwrap().0)
            .collect();
        assert_eq!(visible, vec![true, false, false]);
        assert_eq!(world.get::<Position>(group).unwrap().0, Vec3::ONE);
        assert_eq!(world.get::<LodDebugInfo>(group).unwrap().0, DebugFlags::default());
    }

    #[test]
    fn test_spawn_without_levels_is_untracked() {
        let mut world = create_world();
        let descriptor = LodDescriptor::from_parts(1.0, Vec::new(), Vec::<Entity>::new()).unwrap();
        let result = spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default());
        assert_eq!(result, Ok(None));
        assert_eq!(world.query::<&LodGroup>().iter(&world).count(), 0);
    }

    #[test]
    fn test_spawn_rejects_bad_size() {
        let mut world = create_world();
        let levels = renderables(&mut world, 1);
        let descriptor = LodDescriptor::from_parts(-1.0, [0.5], levels).unwrap();
        let result = spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default());
        assert!(matches!(result, Err(LodError::InvalidObjectSize(_))));
    }

    #[test]
    fn test_spawn_tolerates_missing_renderable() {
        let mut world = create_world();
        let mut levels = renderables(&mut world, 2);
        let gone = world.spawn_empty().id();
        world.despawn(gone);
        levels.push(gone);
        let descriptor = LodDescriptor::from_parts(1.0, [0.5, 0.2, 0.05], levels).unwrap();

        let group = spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default())
            .unwrap();
        assert!(group.is_some());
    }

    #[test]
    fn test_apply_debug_config() {
        let mut world = create_world();
        let levels = renderables(&mut world, 2);
        let descriptor = LodDescriptor::from_parts(1.0, [0.5, 0.2], levels).unwrap();
        let group = spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default())
            .unwrap()
            .unwrap();
        let flags = DebugFlags {
            show_gizmos: false,
            show_debug_text: true,
        };

        assert!(apply_debug_config(&mut world, group, flags));
        assert_eq!(world.get::<LodDebugInfo>(group).unwrap().0, flags);
        assert_eq!(world.get::<LodGroup>(group).unwrap().object.debug(), flags);
    }

    #[test]
    fn test_apply_debug_config_ignores_non_groups() {
        let mut world = create_world();
        let plain = world.spawn(Active(true)).id();
        assert!(!apply_debug_config(&mut world, plain, DebugFlags::default()));
        assert!(world.get::<LodDebugInfo>(plain).is_none());
    }

    #[test]
    fn test_diagnostics_without_viewpoint() {
        let mut world = create_world();
        let levels = renderables(&mut world, 2);
        let descriptor = LodDescriptor::from_parts(1.0, [0.5, 0.2], levels).unwrap();
        spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default()).unwrap();

        let diagnostics = collect_lod_diagnostics(&mut world);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].1.distance, None);
        assert_eq!(diagnostics[0].1.current, LodLevel::Level(0));
    }

    #[test]
    fn test_diagnostics_label_after_update() {
        let mut world = create_world();
        let levels = renderables(&mut world, 3);
        let descriptor = LodDescriptor::from_parts(1.0, [0.5, 0.2, 0.05], levels).unwrap();
        spawn_lod_group(&mut world, Vec3::ZERO, descriptor, &LodSettings::default()).unwrap();
        world.spawn((Position(Vec3::new(0.0, 3.0, 0.0)), ViewpointCamera));

        let mut schedule = Schedule::default();
        add_lod_systems(&mut schedule);
        schedule.run(&mut world);

        let diagnostics = collect_lod_diagnostics(&mut world);
        assert_eq!(diagnostics[0].1.label(), "LOD 1/2\nDist: 3.0m");
        assert_eq!(diagnostics[0].1.gizmo_radii().len(), 4);
    }
}
