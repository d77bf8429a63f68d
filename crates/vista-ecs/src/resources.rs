//! Resources shared by the LOD systems.

use bevy_ecs::prelude::*;
use glam::Vec3;
use vista_lod::LodSelector;

/// Position LOD distances are measured from this frame.
///
/// `None` when no [`ViewpointCamera`](crate::ViewpointCamera) exists; LOD
/// evaluation is skipped for the whole frame in that case.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewpoint {
    pub position: Option<Vec3>,
}

/// Level selector shared by every group.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct LodSelectorRes(pub LodSelector);

/// Counters for the last frame plus running totals.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodStats {
    /// Frames the evaluate pass has run.
    pub frames: u64,
    /// Frames skipped for lack of a viewpoint.
    pub skipped_frames: u64,
    /// Groups evaluated in the last frame.
    pub evaluated: usize,
    /// Transitions applied in the last frame.
    pub transitions: usize,
    /// Visibility writes in the last frame.
    pub toggles: usize,
    /// Toggles skipped in the last frame because a renderable was gone.
    pub dangling: usize,
    /// Transitions applied since startup.
    pub total_transitions: u64,
}

impl LodStats {
    pub(crate) fn begin_frame(&mut self) {
        self.frames += 1;
        self.evaluated = 0;
        self.transitions = 0;
        self.toggles = 0;
        self.dangling = 0;
    }
}
