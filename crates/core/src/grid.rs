//! Grid module - manages the 8x8 playfield
//!
//! Each cell is empty, garbage, or filled with a shape color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..8 (left to right), y ranges 0..8 (top to bottom)

use crate::error::EngineError;
use crate::types::{BlockColor, Cell, GRID_CELLS, GRID_SIZE};

/// The playfield - 8 columns x 8 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * SIZE + x)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_SIZE as i8 || y < 0 || y >= GRID_SIZE as i8 {
            return None;
        }
        Some((y as usize) * (GRID_SIZE as usize) + (x as usize))
    }

    /// Get the side length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at position (x, y)
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Cell, EngineError> {
        Self::index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(EngineError::OutOfBounds { x, y })
    }

    /// Overwrite cell at position (x, y)
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), EngineError> {
        let idx = Self::index(x, y).ok_or(EngineError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Empty cell at position (x, y)
    pub fn clear_cell(&mut self, x: i8, y: i8) -> Result<(), EngineError> {
        self.set_cell(x, y, Cell::Empty)
    }

    /// Empty (x, y) and return what it held, None if out of bounds
    pub fn take(&mut self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| std::mem::replace(&mut self.cells[idx], Cell::Empty))
    }

    /// Write by flat index; `idx` comes from iterating `0..GRID_CELLS`
    pub(crate) fn set_index(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    /// Get cell at position (x, y), None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u8) -> bool {
        if y >= GRID_SIZE {
            return false;
        }
        let start = y as usize * GRID_SIZE as usize;
        let end = start + GRID_SIZE as usize;
        self.cells[start..end].iter().all(|cell| !cell.is_empty())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: u8) -> bool {
        if x >= GRID_SIZE {
            return false;
        }
        self.cells
            .iter()
            .skip(x as usize)
            .step_by(GRID_SIZE as usize)
            .all(|cell| !cell.is_empty())
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of garbage cells
    pub fn garbage_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Garbage))
            .count()
    }

    /// True when every cell is occupied
    pub fn is_full(&self) -> bool {
        self.filled_count() == GRID_CELLS
    }

    /// True when every cell is empty
    pub fn is_clear(&self) -> bool {
        self.filled_count() == 0
    }

    /// Empty the entire grid
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }

    /// Write the wire encoding of every cell, indexed `[y][x]`
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_SIZE as usize]; GRID_SIZE as usize]) {
        let width = GRID_SIZE as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].as_u8();
            }
        }
    }

    /// Build a grid from text rows, top row first
    ///
    /// `.` is empty, `#` is garbage, anything else is a red block. Missing
    /// rows and columns stay empty; extra characters are ignored.
    ///
    /// ```
    /// use blockfit_core::Grid;
    ///
    /// let grid = Grid::from_rows(&["xx......", "#......."]);
    /// assert_eq!(grid.filled_count(), 3);
    /// assert_eq!(grid.garbage_count(), 1);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let width = GRID_SIZE as usize;
        for (y, row) in rows.iter().take(width).enumerate() {
            for (x, ch) in row.chars().take(width).enumerate() {
                grid.cells[y * width + x] = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Garbage,
                    _ => Cell::Block(BlockColor::Red),
                };
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
