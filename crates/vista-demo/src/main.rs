//! Headless LOD demo.
//!
//! Flies a viewpoint past a row of LOD objects, once through the plain
//! registry and once through the ECS schedule, and logs level changes.
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags:
//! `cargo run -p vista-demo -- --objects 32 --grace-multiplier 1.5`.

mod scene;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use tracing::{info, warn};
use vista_config::{CliArgs, Config};
use vista_ecs::{
    Active, LodStats, Position, ViewpointCamera, add_lod_systems, apply_debug_config,
    collect_lod_diagnostics, register_lod_resources, spawn_lod_group,
};
use vista_lod::{LodDescriptor, LodRegistry, VisibilityTable};

use scene::{SceneObject, build_scene, viewpoint_at};

const SCENE_SEED: u64 = 42;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid overrides: {e}, using defaults");
        config = Config::default();
    }

    let log_dir = config_dir.join("logs");
    vista_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let scene = build_scene(&config.demo, SCENE_SEED);
    info!(
        objects = scene.len(),
        ticks = config.demo.ticks,
        fov = config.lod.model.fov_degrees,
        grace = ?config.lod.grace,
        "LOD demo starting"
    );

    let registry_transitions = demonstrate_registry(&config, &scene);
    let ecs_transitions = demonstrate_ecs(&config, &scene);

    if registry_transitions != ecs_transitions {
        warn!(
            registry_transitions,
            ecs_transitions, "registry and ECS runs disagree"
        );
    }
    info!("LOD demo finished");
}

/// Drive the scene through [`LodRegistry`] against an in-memory visibility table.
fn demonstrate_registry(config: &Config, scene: &[SceneObject]) -> u64 {
    let mut table = VisibilityTable::new();
    let mut registry = LodRegistry::new(config.lod.clone());

    for object in scene {
        let handles: Vec<_> = object.coverages.iter().map(|_| table.spawn(false)).collect();
        let registered = LodDescriptor::from_parts(object.size, object.coverages.iter().copied(), handles)
            .and_then(|descriptor| registry.register(descriptor, object.position, &mut table));
        match registered {
            Ok(Some(id)) => {
                if let Err(e) = registry.apply_debug_config(id, config.debug.flags()) {
                    warn!("{e}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(size = object.size, "object not registered: {e}"),
        }
    }

    let mut transitions = 0u64;
    let mut skipped = 0u32;
    for tick in 1..=config.demo.ticks {
        let report = registry.tick(viewpoint_at(&config.demo, tick), &mut table);
        if report.skipped {
            skipped += 1;
            continue;
        }
        for (id, transition) in &report.transitions {
            info!(tick, object = %id, from = %transition.from, to = %transition.to, "registry transition");
        }
        transitions += report.transitions.len() as u64;
    }

    info!(
        objects = registry.len(),
        transitions,
        skipped_ticks = skipped,
        visible = table.active_count(),
        writes = table.writes(),
        "registry run complete"
    );
    transitions
}

/// Drive the same scene through the ECS schedule.
fn demonstrate_ecs(config: &Config, scene: &[SceneObject]) -> u64 {
    let mut world = World::new();
    register_lod_resources(&mut world, &config.lod);

    for object in scene {
        let handles: Vec<Entity> = object
            .coverages
            .iter()
            .map(|_| world.spawn(Active(false)).id())
            .collect();
        let spawned = LodDescriptor::from_parts(object.size, object.coverages.iter().copied(), handles)
            .and_then(|descriptor| {
                spawn_lod_group(&mut world, object.position, descriptor, &config.lod)
            });
        match spawned {
            Ok(Some(group)) => {
                apply_debug_config(&mut world, group, config.debug.flags());
            }
            Ok(None) => {}
            Err(e) => warn!(size = object.size, "group not spawned: {e}"),
        }
    }

    let camera = world.spawn(Position::default()).id();
    let mut schedule = Schedule::default();
    add_lod_systems(&mut schedule);

    for tick in 1..=config.demo.ticks {
        match viewpoint_at(&config.demo, tick) {
            Some(position) => {
                world
                    .entity_mut(camera)
                    .insert((Position(position), ViewpointCamera));
            }
            None => {
                world.entity_mut(camera).remove::<ViewpointCamera>();
            }
        }

        schedule.run(&mut world);

        let stats = *world.resource::<LodStats>();
        if stats.transitions > 0 {
            info!(
                tick,
                transitions = stats.transitions,
                toggles = stats.toggles,
                dangling = stats.dangling,
                "ECS frame"
            );
        }
        if config.debug.show_debug_text && tick % 60 == 0 {
            log_overlays(&mut world);
        }
    }

    let stats = *world.resource::<LodStats>();
    info!(
        frames = stats.frames,
        skipped = stats.skipped_frames,
        transitions = stats.total_transitions,
        "ECS run complete"
    );
    stats.total_transitions
}

/// Log the overlay each debug-enabled group would draw.
fn log_overlays(world: &mut World) {
    for (entity, diagnostics) in collect_lod_diagnostics(world) {
        if !diagnostics.debug.any() {
            continue;
        }
        let radii = if diagnostics.debug.show_gizmos {
            diagnostics.gizmo_radii()
        } else {
            Vec::new()
        };
        info!(
            ?entity,
            label = %diagnostics.label().replace('\n', " | "),
            ?radii,
            "LOD overlay"
        );
    }
}
