//! Round snapshots.
//!
//! [`UndoSnapshot`] holds the one level of undo. [`RoundSnapshot`] is a
//! read-only copy for observers, with cells flattened to their `u8` wire codes.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::progress::Progress;
use crate::round::{RoundMode, RoundPhase};
use crate::shapes::Shape;
use crate::types::{Theme, GRID_SIZE, SHAPES_PER_BATCH};

/// State captured right before a placement, restored by undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub grid: Grid,
    pub shapes: ArrayVec<Shape, SHAPES_PER_BATCH>,
    pub score: u32,
}

impl UndoSnapshot {
    pub fn capture(grid: &Grid, shapes: &[Shape], score: u32) -> Self {
        Self {
            grid: grid.clone(),
            shapes: shapes.iter().copied().collect(),
            score,
        }
    }
}

/// Read-only copy of a round for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub cells: [[u8; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub shapes: ArrayVec<Shape, SHAPES_PER_BATCH>,
    pub score: u32,
    pub combo: u32,
    pub mode: RoundMode,
    pub target: Option<u32>,
    pub phase: RoundPhase,
    pub can_undo: bool,
    pub revive_used: bool,
    pub progress: Progress,
    pub theme: Theme,
}

impl RoundSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == RoundPhase::AwaitingPlacement
    }
}
