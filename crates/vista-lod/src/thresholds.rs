//! Per-object distance thresholds derived from authored coverage fractions.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceModel;
use crate::error::LodError;

/// How to treat thresholds that shrink as the level index grows.
///
/// Coverage fractions are authored by hand, so nothing guarantees that
/// level `i + 1` reaches further than level `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdValidation {
    /// Keep the derived thresholds untouched.
    Off,
    /// Refuse to build the table.
    Reject,
    /// Raise a short threshold up to its predecessor.
    #[default]
    Clamp,
}

/// Maximum viewing distance for every level of one object, plus its cull distance.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    /// `max_distances[i]` is the furthest distance at which level `i` is shown.
    max_distances: Vec<f32>,
    /// Beyond this distance the object is not rendered at all.
    cull_distance: f32,
}

impl ThresholdTable {
    /// Derive the table for an object of `object_size` from per-level coverage
    /// fractions, ordered from the most to the least detailed level.
    ///
    /// The cull distance is the last level's own threshold.
    pub fn build(
        model: &DistanceModel,
        object_size: f32,
        coverages: &[f32],
        validation: ThresholdValidation,
    ) -> Result<Self, LodError> {
        if !object_size.is_finite() || object_size < 0.0 {
            return Err(LodError::InvalidObjectSize(object_size));
        }

        let mut max_distances = Vec::with_capacity(coverages.len());
        for (level, &coverage) in coverages.iter().enumerate() {
            if !coverage.is_finite() {
                return Err(LodError::InvalidCoverage {
                    level,
                    value: coverage,
                });
            }
            max_distances.push(model.max_distance(object_size, coverage));
        }

        validate(&mut max_distances, validation)?;

        let cull_distance = max_distances.last().copied().unwrap_or(0.0);
        Ok(Self {
            max_distances,
            cull_distance,
        })
    }

    /// Threshold distances, one per level.
    pub fn max_distances(&self) -> &[f32] {
        &self.max_distances
    }

    /// Threshold for a single level, if it exists.
    pub fn max_distance(&self, level: usize) -> Option<f32> {
        self.max_distances.get(level).copied()
    }

    /// Distance beyond which the object is culled.
    pub fn cull_distance(&self) -> f32 {
        self.cull_distance
    }

    /// Number of levels in the table.
    pub fn level_count(&self) -> usize {
        self.max_distances.len()
    }

    /// Whether every threshold reaches at least as far as the one before it.
    pub fn is_monotonic(&self) -> bool {
        self.max_distances.windows(2).all(|w| w[1] >= w[0])
    }
}

fn validate(distances: &mut [f32], validation: ThresholdValidation) -> Result<(), LodError> {
    for level in 1..distances.len() {
        let previous = distances[level - 1];
        let distance = distances[level];
        if distance >= previous {
            continue;
        }
        match validation {
            ThresholdValidation::Off => return Ok(()),
            ThresholdValidation::Reject => {
                return Err(LodError::NonMonotonicThresholds {
                    level,
                    distance,
                    previous,
                });
            }
            ThresholdValidation::Clamp => {
                tracing::warn!(level, distance, previous, "clamping non-monotonic LOD threshold");
                distances[level] = previous;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{UNBOUNDED_DISTANCE, max_distance};

    fn build(size: f32, coverages: &[f32], validation: ThresholdValidation) -> ThresholdTable {
        ThresholdTable::build(&DistanceModel::default(), size, coverages, validation).unwrap()
    }

    /// The three-level reference object produces the expected thresholds.
    #[test]
    fn test_three_level_table() {
        let table = build(10.0, &[0.5, 0.25, 0.1], ThresholdValidation::Clamp);
        let d = table.max_distances();
        assert_eq!(d.len(), 3);
        assert!((d[0] - 17.32).abs() < 0.01);
        assert!((d[1] - 34.64).abs() < 0.01);
        assert!((d[2] - 86.60).abs() < 0.01);
        assert_eq!(table.cull_distance(), d[2]);
    }

    /// Each threshold equals the distance model applied to the same inputs.
    #[test]
    fn test_thresholds_match_distance_model_exactly() {
        let coverages = [0.8, 0.4, 0.2, 0.05, 0.01];
        let table = build(3.25, &coverages, ThresholdValidation::Off);
        assert_eq!(table.level_count(), coverages.len());
        for (i, &c) in coverages.iter().enumerate() {
            assert_eq!(
                table.max_distance(i).unwrap().to_bits(),
                max_distance(3.25, c, 60.0).to_bits()
            );
        }
    }

    /// A single near-zero coverage level reaches the unbounded sentinel.
    #[test]
    fn test_single_unbounded_level() {
        let table = build(10.0, &[0.0001], ThresholdValidation::Clamp);
        assert_eq!(table.max_distances(), &[UNBOUNDED_DISTANCE]);
        assert_eq!(table.cull_distance(), UNBOUNDED_DISTANCE);
    }

    /// With validation off, inconsistent authoring propagates as-is.
    #[test]
    fn test_validation_off_keeps_non_monotonic() {
        let table = build(10.0, &[0.25, 0.5, 0.1], ThresholdValidation::Off);
        assert!(!table.is_monotonic());
        assert!(table.max_distance(1).unwrap() < table.max_distance(0).unwrap());
    }

    /// Reject refuses inconsistent authoring and names the offending level.
    #[test]
    fn test_validation_reject() {
        let err = ThresholdTable::build(
            &DistanceModel::default(),
            10.0,
            &[0.25, 0.5, 0.1],
            ThresholdValidation::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, LodError::NonMonotonicThresholds { level: 1, .. }));
    }

    /// Clamp raises short thresholds to their predecessor.
    #[test]
    fn test_validation_clamp() {
        let table = build(10.0, &[0.25, 0.5, 0.1], ThresholdValidation::Clamp);
        assert!(table.is_monotonic());
        assert_eq!(table.max_distance(1), table.max_distance(0));
        assert!((table.cull_distance() - 86.60).abs() < 0.01);
    }

    /// Clamping the last level also moves the cull distance.
    #[test]
    fn test_clamp_updates_cull_distance() {
        let table = build(10.0, &[0.0, 0.5], ThresholdValidation::Clamp);
        assert_eq!(table.cull_distance(), UNBOUNDED_DISTANCE);
    }

    /// Equal neighbouring thresholds are accepted under every policy.
    #[test]
    fn test_equal_thresholds_accepted() {
        let table = ThresholdTable::build(
            &DistanceModel::default(),
            10.0,
            &[0.5, 0.5],
            ThresholdValidation::Reject,
        );
        assert!(table.is_ok());
    }

    /// NaN coverage is refused at build time.
    #[test]
    fn test_nan_coverage_rejected() {
        let err = ThresholdTable::build(
            &DistanceModel::default(),
            10.0,
            &[0.5, f32::NAN],
            ThresholdValidation::Off,
        )
        .unwrap_err();
        assert!(matches!(err, LodError::InvalidCoverage { level: 1, .. }));
    }

    /// Negative or infinite object sizes are refused.
    #[test]
    fn test_invalid_object_size_rejected() {
        for size in [-1.0, f32::INFINITY, f32::NAN] {
            let result = ThresholdTable::build(
                &DistanceModel::default(),
                size,
                &[0.5],
                ThresholdValidation::Off,
            );
            assert!(matches!(result, Err(LodError::InvalidObjectSize(_))));
        }
    }
}
