//! LOD-managed objects: registration input and the per-object record.

use std::fmt;

use crate::diagnostics::{DebugFlags, LodDiagnostics};
use crate::error::LodError;
use crate::executor::RenderableStore;
use crate::selector::{LodLevel, LodSelector};
use crate::settings::LodSettings;
use crate::thresholds::ThresholdTable;
use crate::tracker::{LodState, Transition};

/// Authored data for one level: its screen coverage and its renderable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelDescriptor<H> {
    /// Fraction of the screen height the object covers when this level hands over.
    pub coverage: f32,
    /// Renderable entity shown for this level.
    pub handle: H,
}

/// Registration input for one object.
#[derive(Clone, Debug, PartialEq)]
pub struct LodDescriptor<H> {
    /// Characteristic world-space size of the object.
    pub object_size: f32,
    /// Levels ordered from most to least detailed.
    pub levels: Vec<LevelDescriptor<H>>,
}

impl<H> LodDescriptor<H> {
    /// Describe an object from parallel coverage and handle sequences.
    ///
    /// Both sequences must have one entry per level.
    pub fn from_parts(
        object_size: f32,
        coverages: impl IntoIterator<Item = f32>,
        handles: impl IntoIterator<Item = H>,
    ) -> Result<Self, LodError> {
        let coverages: Vec<f32> = coverages.into_iter().collect();
        let handles: Vec<H> = handles.into_iter().collect();
        if coverages.len() != handles.len() {
            return Err(LodError::LevelCountMismatch {
                coverages: coverages.len(),
                handles: handles.len(),
            });
        }

        let levels = coverages
            .into_iter()
            .zip(handles)
            .map(|(coverage, handle)| LevelDescriptor { coverage, handle })
            .collect();
        Ok(Self {
            object_size,
            levels,
        })
    }
}

/// Registered per-level data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelRecord<H> {
    /// Renderable entity for this level.
    pub handle: H,
    /// Coverage fraction it was authored with.
    pub coverage: f32,
    /// Derived maximum viewing distance.
    pub max_distance: f32,
}

/// One object whose visible representation is chosen by distance.
///
/// Everything except the active level is fixed at registration.
#[derive(Clone, Debug)]
pub struct TrackedObject<H> {
    object_size: f32,
    levels: Vec<LevelRecord<H>>,
    table: ThresholdTable,
    state: LodState,
    debug: DebugFlags,
}

impl<H: Copy + fmt::Debug> TrackedObject<H> {
    /// Build the object and its threshold table.
    ///
    /// Returns `Ok(None)` when no levels were authored: such objects have no
    /// LOD and are simply not tracked.
    pub fn new(descriptor: LodDescriptor<H>, settings: &LodSettings) -> Result<Option<Self>, LodError> {
        let LodDescriptor {
            object_size,
            mut levels,
        } = descriptor;

        if levels.is_empty() {
            tracing::debug!("no LOD levels authored, object not tracked");
            return Ok(None);
        }

        let max_levels = settings.max_levels.max(1);
        if levels.len() > max_levels {
            tracing::warn!(
                authored = levels.len(),
                max_levels,
                "dropping LOD levels beyond the configured maximum"
            );
            levels.truncate(max_levels);
        }

        let coverages: Vec<f32> = levels.iter().map(|l| l.coverage).collect();
        let table = ThresholdTable::build(&settings.model, object_size, &coverages, settings.validation)?;

        let levels = levels
            .into_iter()
            .zip(table.max_distances())
            .map(|(level, &max_distance)| LevelRecord {
                handle: level.handle,
                coverage: level.coverage,
                max_distance,
            })
            .collect();

        Ok(Some(Self {
            object_size,
            levels,
            table,
            state: LodState::default(),
            debug: DebugFlags::default(),
        }))
    }

    /// Characteristic size used by the distance model.
    pub fn object_size(&self) -> f32 {
        self.object_size
    }

    /// Per-level records, most detailed first.
    pub fn levels(&self) -> &[LevelRecord<H>] {
        &self.levels
    }

    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Derived thresholds.
    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// Level currently shown.
    pub fn current_level(&self) -> LodLevel {
        self.state.current()
    }

    /// Debug overlay flags.
    pub fn debug(&self) -> DebugFlags {
        self.debug
    }

    /// Replace the debug overlay flags.
    pub fn set_debug(&mut self, flags: DebugFlags) {
        self.debug = flags;
    }

    /// Select the level for `distance` and record it, returning the
    /// transition to apply if the level changed.
    pub fn evaluate(&mut self, selector: &LodSelector, distance: f32) -> Option<Transition> {
        let level = selector.select(distance, &self.table);
        self.state.update(level)
    }

    /// Show level 0 and hide every other level, matching the state a new
    /// object starts in. Returns the number of handles that did not resolve.
    pub fn initialize_visibility<S>(&self, store: &mut S) -> usize
    where
        S: RenderableStore<Handle = H>,
    {
        let mut dangling = 0;
        for (i, level) in self.levels.iter().enumerate() {
            if store.set_active(level.handle, i == 0).is_err() {
                tracing::warn!(level = i, handle = ?level.handle, "LOD handle missing at registration");
                dangling += 1;
            }
        }
        dangling
    }

    /// Read-only snapshot for debug overlays.
    pub fn diagnostics(&self, distance: Option<f32>) -> LodDiagnostics {
        LodDiagnostics {
            current: self.current_level(),
            level_count: self.level_count(),
            max_distances: self.table.max_distances().to_vec(),
            cull_distance: self.table.cull_distance(),
            distance,
            debug: self.debug,
        }
    }
}
