//! Tunables shared by every tracked object.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceModel;
use crate::selector::GracePolicy;
use crate::thresholds::ThresholdValidation;

/// Upper bound on the number of levels kept per object unless configured otherwise.
pub const DEFAULT_MAX_LEVELS: usize = 5;

/// LOD configuration applied at registration (model, bounds, validation)
/// and at evaluation (grace policy).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodSettings {
    /// Projection used to turn coverage fractions into distances.
    pub model: DistanceModel,
    /// Levels past this count are dropped at registration.
    pub max_levels: usize,
    /// Behaviour when a distance matches no level.
    pub grace: GracePolicy,
    /// Treatment of thresholds that shrink with level index.
    pub validation: ThresholdValidation,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            model: DistanceModel::default(),
            max_levels: DEFAULT_MAX_LEVELS,
            grace: GracePolicy::None,
            validation: ThresholdValidation::Clamp,
        }
    }
}
