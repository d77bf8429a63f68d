//! World factory and LOD resource registration.

use bevy_ecs::prelude::*;
use vista_lod::{LodSelector, LodSettings};

use crate::{LodSelectorRes, LodStats, Viewpoint};

/// Inserts the LOD resources, with the selector built from `settings`.
pub fn register_lod_resources(world: &mut World, settings: &LodSettings) {
    world.insert_resource(Viewpoint::default());
    world.insert_resource(LodSelectorRes(LodSelector::new(settings.grace)));
    world.insert_resource(LodStats::default());
}

/// Creates a world with the LOD resources at their defaults.
pub fn create_world() -> World {
    let mut world = World::new();
    register_lod_resources(&mut world, &LodSettings::default());
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_lod::GracePolicy;

    #[test]
    fn test_create_world_has_all_resources() {
        let world = create_world();
        assert!(world.contains_resource::<Viewpoint>());
        assert!(world.contains_resource::<LodSelectorRes>());
        assert!(world.contains_resource::<LodStats>());
        assert_eq!(world.resource::<Viewpoint>().position, None);
    }

    #[test]
    fn test_selector_uses_settings_grace() {
        let mut world = World::new();
        let settings = LodSettings {
            grace: GracePolicy::Multiplier(1.5),
            ..Default::default()
        };
        register_lod_resources(&mut world, &settings);
        assert_eq!(
            world.resource::<LodSelectorRes>().0.grace(),
            GracePolicy::Multiplier(1.5)
        );
    }

    #[test]
    fn test_register_resets_existing_resources() {
        let mut world = create_world();
        world.resource_mut::<Viewpoint>().position = Some(glam::Vec3::ONE);
        world.resource_mut::<LodStats>().total_transitions = 7;

        register_lod_resources(&mut world, &LodSettings::default());

        assert_eq!(world.resource::<Viewpoint>().position, None);
        assert_eq!(world.resource::<LodStats>().total_transitions, 0);
        assert_eq!(world.resource::<LodSelectorRes>().0.grace(), GracePolicy::None);
    }
}
