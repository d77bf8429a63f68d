//! Discrete level-of-detail switching: distance thresholds from screen coverage,
//! per-object level selection, and the visibility toggles that enact it.

mod diagnostics;
mod distance;
mod error;
mod executor;
mod object;
mod registry;
mod selector;
mod settings;
mod thresholds;
mod tracker;

pub use diagnostics::{DebugFlags, LodDiagnostics};
pub use distance::{
    DEFAULT_FOV_DEGREES, DistanceModel, MIN_COVERAGE_FRACTION, UNBOUNDED_DISTANCE, max_distance,
};
pub use error::{DanglingHandle, LodError};
pub use executor::{ApplyOutcome, RenderableHandle, RenderableStore, VisibilityTable, apply_transition};
pub use object::{LevelDescriptor, LevelRecord, LodDescriptor, TrackedObject};
pub use registry::{LodRegistry, ObjectId, TickReport};
pub use selector::{GracePolicy, LodLevel, LodSelector};
pub use settings::{DEFAULT_MAX_LEVELS, LodSettings};
pub use thresholds::{ThresholdTable, ThresholdValidation};
pub use tracker::{LodState, Transition};
