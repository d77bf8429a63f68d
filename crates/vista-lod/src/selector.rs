//! Distance-based LOD selection with an optional grace band before culling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::thresholds::ThresholdTable;

/// The representation an object should show, or none at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LodLevel {
    /// Index into the object's levels, 0 being the most detailed.
    Level(usize),
    /// Too far away to render.
    Culled,
}

impl LodLevel {
    /// The level index, or `None` when culled.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Level(i) => Some(i),
            Self::Culled => None,
        }
    }

    /// Whether this is the culled state.
    pub fn is_culled(self) -> bool {
        self == Self::Culled
    }

    /// Signed form used by diagnostics: the index, or `-1` when culled.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Level(i) => i32::try_from(i).unwrap_or(i32::MAX),
            Self::Culled => -1,
        }
    }
}

impl fmt::Display for LodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(i) => write!(f, "LOD {i}"),
            Self::Culled => f.write_str("CULLED"),
        }
    }
}

/// What happens when the distance matches no level's threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum GracePolicy {
    /// Cull strictly beyond the cull distance, otherwise hold the last level.
    #[default]
    #[serde(rename = "Disabled", alias = "None")]
    None,
    /// Hold the last level up to `last threshold * factor`, then cull.
    Multiplier(f32),
}

/// Selects a LOD level from a viewing distance and an object's thresholds.
#[derive(Clone, Copy, Debug, Default)]
pub struct LodSelector {
    grace: GracePolicy,
}

impl LodSelector {
    /// Create a selector using the given grace policy.
    pub fn new(grace: GracePolicy) -> Self {
        Self { grace }
    }

    /// The active grace policy.
    pub fn grace(&self) -> GracePolicy {
        self.grace
    }

    /// Pick the level for an object `distance` away from the viewpoint.
    ///
    /// Levels are scanned from most to least detailed and the first one whose
    /// threshold covers the distance wins. Negative distances count as zero
    /// and NaN distances cull.
    pub fn select(&self, distance: f32, table: &ThresholdTable) -> LodLevel {
        if distance.is_nan() {
            return LodLevel::Culled;
        }
        let distance = distance.max(0.0);

        let level_count = table.level_count();
        if level_count == 0 {
            return LodLevel::Culled;
        }
        let last = level_count - 1;

        match self.grace {
            GracePolicy::None => {
                if distance > table.cull_distance() {
                    return LodLevel::Culled;
                }
                first_covering(distance, table).unwrap_or(LodLevel::Level(last))
            }
            GracePolicy::Multiplier(factor) => {
                if let Some(level) = first_covering(distance, table) {
                    return level;
                }
                let last_threshold = table.max_distances()[last];
                if distance <= last_threshold * factor {
                    LodLevel::Level(last)
                } else {
                    LodLevel::Culled
                }
            }
        }
    }
}

fn first_covering(distance: f32, table: &ThresholdTable) -> Option<LodLevel> {
    table
        .max_distances()
        .iter()
        .position(|&max| distance <= max)
        .map(LodLevel::Level)
}
