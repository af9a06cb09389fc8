//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the puzzle rules, round state, and progression logic.
//! It has **zero dependencies** on UI, networking, storage, or audio, making it:
//!
//! - **Deterministic**: Same seed produces identical rounds
//! - **Testable**: Unit tests for every rule, fixtures via [`Grid::from_rows`]
//! - **Portable**: Runs anywhere a caller can hold a [`Round`]
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 playfield with bounds-checked cell access
//! - [`shapes`]: The fixed catalog of non-rotating shapes
//! - [`placement`]: Fit checks and the game-over oracle
//! - [`scoring`]: Row/column clears, combos, targets and rewards
//! - [`round`]: The round controller (levels, daily challenge, undo, skip, revive)
//! - [`progress`]: Unlock ceiling, high score and daily completion
//! - [`rng`]: Seedable generator and daily seeds
//!
//! # Game Rules
//!
//! - **Batches**: Three shapes are dealt at a time; the next batch arrives once all three are placed
//! - **Clears**: Full rows and columns clear together, every cell counted once
//! - **Combo**: Each clearing placement bumps the combo; a dry placement resets it
//! - **Scoring**: `lines * 10 * combo` per clear
//! - **Game over**: No remaining shape fits anywhere on the grid
//!
//! # Example
//!
//! ```
//! use blockfit_core::{Round, RoundPhase};
//!
//! let mut round = Round::new(12345);
//! round.start_level(1);
//!
//! let shape = round.shapes()[0];
//! let events = round.place(shape.id, 0, 0).unwrap();
//!
//! assert!(!events.is_empty());
//! assert_eq!(round.phase(), RoundPhase::AwaitingPlacement);
//! assert!(round.can_undo());
//! ```

pub mod error;
pub mod grid;
pub mod placement;
pub mod progress;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfit_types as types;

// Re-export commonly used types for convenience
pub use error::EngineError;
pub use grid::Grid;
pub use placement::{any_shape_fits, can_place, fits_anywhere};
pub use progress::Progress;
pub use rng::{DailySeed, RandomSource, SimpleRng};
pub use round::{Round, RoundEvent, RoundEvents, RoundMode, RoundPhase};
pub use scoring::{evaluate_and_clear, ClearResult, ClearedCell};
pub use shapes::{Shape, ShapeId};
pub use snapshot::{RoundSnapshot, UndoSnapshot};
