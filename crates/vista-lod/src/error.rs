//! LOD registration and transition error types.

/// Errors raised while building an object's LOD data.
///
/// Registration failures are scoped to the object being registered; they
/// never affect objects that are already tracked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    /// The object size is negative, NaN or infinite.
    #[error("invalid object size {0}")]
    InvalidObjectSize(f32),

    /// A level's coverage fraction is NaN or infinite.
    #[error("invalid coverage fraction {value} at level {level}")]
    InvalidCoverage {
        /// Level index of the offending entry.
        level: usize,
        /// The rejected value.
        value: f32,
    },

    /// A level's threshold is shorter than the level before it.
    #[error(
        "non-monotonic thresholds: level {level} reaches {distance}, below the previous level's {previous}"
    )]
    NonMonotonicThresholds {
        /// Level index whose threshold is too short.
        level: usize,
        /// Threshold of `level`.
        distance: f32,
        /// Threshold of `level - 1`.
        previous: f32,
    },

    /// Coverage and handle sequences describe different numbers of levels.
    #[error("{coverages} coverage fractions but {handles} renderable handles")]
    LevelCountMismatch {
        /// Number of coverage fractions supplied.
        coverages: usize,
        /// Number of renderable handles supplied.
        handles: usize,
    },

    /// No tracked object carries this id.
    #[error("unknown object {0}")]
    UnknownObject(u64),
}

/// A renderable handle no longer resolves in its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("renderable handle no longer resolves")]
pub struct DanglingHandle;
