//! ECS integration for discrete LOD switching.
//!
//! LOD groups are entities carrying a [`LodGroup`] whose level renderables are
//! other entities with an [`Active`] flag. [`add_lod_systems`] registers the
//! per-frame viewpoint, evaluate and apply passes.

mod components;
mod groups;
mod resources;
mod system_ordering;
mod systems;
mod world;

pub use components::{Active, LodDebugInfo, LodGroup, Position, ViewpointCamera};
pub use groups::{apply_debug_config, collect_lod_diagnostics, spawn_lod_group};
pub use resources::{LodSelectorRes, LodStats, Viewpoint};
pub use system_ordering::{LodSet, add_lod_systems, configure_lod_ordering};
pub use systems::{apply_lod_transitions, evaluate_lod_groups, update_viewpoint};
pub use world::{create_world, register_lod_resources};
