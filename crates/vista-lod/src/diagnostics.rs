//! Read-only LOD state exposed to debug overlays.

use serde::{Deserialize, Serialize};

use crate::selector::LodLevel;

/// Which debug overlays an object wants drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugFlags {
    /// Distance spheres at each threshold.
    pub show_gizmos: bool,
    /// Current level and distance label.
    pub show_debug_text: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self {
            show_gizmos: true,
            show_debug_text: true,
        }
    }
}

impl DebugFlags {
    /// Whether any overlay is enabled.
    pub fn any(&self) -> bool {
        self.show_gizmos || self.show_debug_text
    }
}

/// Snapshot of one object's LOD state.
#[derive(Clone, Debug, PartialEq)]
pub struct LodDiagnostics {
    /// Level shown when the snapshot was taken.
    pub current: LodLevel,
    /// Number of levels the object has.
    pub level_count: usize,
    /// Upper distance bound of each level.
    pub max_distances: Vec<f32>,
    /// Distance past which the object is culled.
    pub cull_distance: f32,
    /// Distance to the viewpoint, when one was available.
    pub distance: Option<f32>,
    /// Overlays requested for this object.
    pub debug: DebugFlags,
}

impl LodDiagnostics {
    /// Overlay text, e.g. `"LOD 1/2\nDist: 20.0m"` or `"CULLED\nDist: 90.0m"`.
    pub fn label(&self) -> String {
        let distance = self.distance.unwrap_or(0.0);
        match self.current {
            LodLevel::Culled => format!("CULLED\nDist: {distance:.1}m"),
            LodLevel::Level(i) => format!(
                "LOD {i}/{}\nDist: {distance:.1}m",
                self.level_count.saturating_sub(1)
            ),
        }
    }

    /// Threshold spheres to draw, skipping non-positive radii. The cull
    /// distance is always last.
    pub fn gizmo_radii(&self) -> Vec<f32> {
        self.max_distances
            .iter()
            .copied()
            .filter(|&d| d > 0.0)
            .chain(std::iter::once(self.cull_distance))
            .collect()
    }
}
