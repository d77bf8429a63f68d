//! Components attached to LOD groups, their renderables, and the viewpoint camera.

use bevy_ecs::prelude::*;
use glam::Vec3;
use vista_lod::{DebugFlags, TrackedObject, Transition};

/// World-space position used for distance measurement.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Position(pub Vec3);

/// Whether a renderable is drawn. Every level renderable of a LOD group
/// carries one; the LOD systems only ever flip it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Active(pub bool);

impl Default for Active {
    fn default() -> Self {
        Self(true)
    }
}

/// Marker for the entity whose [`Position`] is the LOD viewpoint.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewpointCamera;

/// A LOD-managed object whose levels are other entities.
///
/// `pending` is written by the evaluate pass and drained by the apply pass
/// within the same frame.
#[derive(Component, Debug)]
pub struct LodGroup {
    /// Tracked LOD state of the group.
    pub object: TrackedObject<Entity>,
    /// Transition selected this frame and not yet applied.
    pub pending: Option<Transition>,
}

impl LodGroup {
    /// Wraps `object` with no transition pending.
    pub fn new(object: TrackedObject<Entity>) -> Self {
        Self {
            object,
            pending: None,
        }
    }
}

/// Debug overlay switches mirrored from the group's object.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LodDebugInfo(pub DebugFlags);
