//! Per-object record of the active level and the transitions it produces.

use crate::selector::LodLevel;

/// A single level change for one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Level being hidden (`Culled` when nothing was visible).
    pub from: LodLevel,
    /// Level being shown (`Culled` when nothing should be visible).
    pub to: LodLevel,
}

/// The currently active level of one object.
///
/// Updates go through `&mut self`, so the compare and the write happen
/// under exclusive access and two evaluations of the same object cannot
/// interleave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LodState {
    current: LodLevel,
}

impl Default for LodState {
    fn default() -> Self {
        Self::new(LodLevel::Level(0))
    }
}

impl LodState {
    /// Create a state that starts at `current`.
    pub fn new(current: LodLevel) -> Self {
        Self { current }
    }

    /// The level currently shown.
    pub fn current(&self) -> LodLevel {
        self.current
    }

    /// Record `new_level` as active, returning the transition if it differs
    /// from the current level.
    pub fn update(&mut self, new_level: LodLevel) -> Option<Transition> {
        if new_level == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: new_level,
        };
        self.current = new_level;
        Some(transition)
    }
}
