//! Scoring module - line clears, combos and level parameters
//!
//! Scoring rules:
//! - Rows and columns are evaluated independently; garbage counts as filled.
//! - Any clear bumps the combo by one, including single-line clears.
//! - Points are `lines * LINE_POINTS * combo`.
//! - A placement that clears nothing resets the combo to 0.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{
    Cell, DAILY_COIN_REWARD, GARBAGE_LEVEL_THRESHOLD, GRID_CELLS, GRID_SIZE, LEVEL_BASE_TARGET,
    LEVEL_COIN_BASE, LEVEL_TARGET_STEP, LINE_POINTS, MAX_LEVEL_GARBAGE,
};

/// A cell emptied by a clear, with what it held before
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearedCell {
    pub x: u8,
    pub y: u8,
    pub prior: Cell,
}

/// Outcome of evaluating the grid after a placement
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Indices of full rows, top to bottom.
    pub rows: ArrayVec<u8, { GRID_SIZE as usize }>,
    /// Indices of full columns, left to right.
    pub cols: ArrayVec<u8, { GRID_SIZE as usize }>,
    pub points: u32,
    /// Combo value after this evaluation.
    pub combo: u32,
    /// Every emptied cell, each reported once.
    pub cleared: ArrayVec<ClearedCell, GRID_CELLS>,
}

impl ClearResult {
    pub fn lines(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_clear(&self) -> bool {
        self.lines() > 0
    }
}

/// Points for clearing `lines` lines at combo value `combo`
pub fn line_clear_points(lines: usize, combo: u32) -> u32 {
    (lines as u32)
        .saturating_mul(LINE_POINTS)
        .saturating_mul(combo)
}

/// Detect full rows/columns, score them and empty their cells
pub fn evaluate_and_clear(grid: &mut Grid, combo: u32) -> ClearResult {
    let mut result = ClearResult::default();

    for i in 0..GRID_SIZE {
        if grid.is_row_full(i) {
            result.rows.push(i);
        }
        if grid.is_col_full(i) {
            result.cols.push(i);
        }
    }

    if !result.is_clear() {
        result.combo = 0;
        return result;
    }

    result.combo = combo.saturating_add(1);
    result.points = line_clear_points(result.lines(), result.combo);

    for y in 0..GRID_SIZE as i8 {
        for x in 0..GRID_SIZE as i8 {
            let in_row = result.rows.contains(&(y as u8));
            let in_col = result.cols.contains(&(x as u8));
            if !(in_row || in_col) {
                continue;
            }
            if let Some(prior) = grid.take(x, y) {
                result.cleared.push(ClearedCell {
                    x: x as u8,
                    y: y as u8,
                    prior,
                });
            }
        }
    }

    result
}

/// Target score for a level (`None` for classic mode, level 0)
pub fn level_target(level: u32) -> Option<u32> {
    if level == 0 {
        return None;
    }
    Some(LEVEL_BASE_TARGET.saturating_add(level.saturating_mul(LEVEL_TARGET_STEP)))
}

/// Garbage cells a level starts with
pub fn level_garbage_count(level: u32) -> u32 {
    if level <= GARBAGE_LEVEL_THRESHOLD {
        return 0;
    }
    ((level - GARBAGE_LEVEL_THRESHOLD) / 2).min(MAX_LEVEL_GARBAGE)
}

/// Coins granted for completing a level
pub fn level_coin_reward(level: u32) -> u32 {
    LEVEL_COIN_BASE.saturating_add(level.saturating_mul(2))
}

/// Coins granted for completing the daily challenge
pub fn daily_coin_reward() -> u32 {
    DAILY_COIN_REWARD
}
