//! Screen-coverage to viewing-distance conversion under a fixed field of view.

use serde::{Deserialize, Serialize};

/// Vertical field of view assumed when converting coverage fractions.
pub const DEFAULT_FOV_DEGREES: f32 = 60.0;

/// Coverage fractions at or below this value are treated as "always visible".
pub const MIN_COVERAGE_FRACTION: f32 = 1e-4;

/// Distance returned for coverage fractions that are effectively zero.
pub const UNBOUNDED_DISTANCE: f32 = 10_000.0;

/// Compute the distance at which an object of `object_size` fills
/// `coverage` of the screen's vertical extent.
///
/// Coverage fractions at or below [`MIN_COVERAGE_FRACTION`] (including
/// negative ones) return [`UNBOUNDED_DISTANCE`].
pub fn max_distance(object_size: f32, coverage: f32, fov_degrees: f32) -> f32 {
    DistanceModel {
        fov_degrees,
        ..DistanceModel::default()
    }
    .max_distance(object_size, coverage)
}

/// Projection parameters used to derive per-level distance thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceModel {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Coverage fraction at or below which a level never falls out of range.
    pub min_coverage: f32,
    /// Sentinel distance for levels that never fall out of range.
    pub unbounded_distance: f32,
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            min_coverage: MIN_COVERAGE_FRACTION,
            unbounded_distance: UNBOUNDED_DISTANCE,
        }
    }
}

impl DistanceModel {
    /// Maximum viewing distance for a level authored with `coverage`.
    pub fn max_distance(&self, object_size: f32, coverage: f32) -> f32 {
        if coverage <= self.min_coverage {
            return self.unbounded_distance;
        }

        let tan_half_fov = (self.fov_degrees.to_radians() / 2.0).tan();
        (object_size / (2.0 * tan_half_fov)) / coverage
    }
}
