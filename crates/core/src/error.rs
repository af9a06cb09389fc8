//! Engine error taxonomy.
//!
//! Every error is local to the call that produced it: the round is left exactly
//! as it was before the call. Operations that can be silently ignored (undo with
//! nothing to undo, a second revive) return `None` instead of an error.

use thiserror::Error;

use crate::shapes::ShapeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Coordinate outside the 8x8 grid.
    #[error("cell ({x}, {y}) is outside the 8x8 grid")]
    OutOfBounds { x: i8, y: i8 },

    /// The shape does not fit at the requested origin.
    #[error("shape {id} does not fit at ({x}, {y})")]
    InvalidPlacement { id: ShapeId, x: i8, y: i8 },

    /// No shape with this id is in the available batch.
    #[error("shape {0} is not in the available batch")]
    UnknownShape(ShapeId),

    /// The round is idle or has reached a terminal state.
    #[error("round is not accepting placements")]
    RoundOver,

    /// Daily seed with a day outside 1..=366.
    #[error("day {day_of_year} is not a valid day of the year")]
    InvalidDailySeed { day_of_year: u16 },
}
