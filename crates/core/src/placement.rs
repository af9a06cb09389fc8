//! Placement validation and the game-over oracle.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shapes::{get_offsets, Shape};
use crate::types::{ShapeKind, GRID_CELLS, GRID_SIZE};

/// Check whether `kind` fits with its origin at (x, y)
///
/// Every occupied offset must land inside the grid on an empty cell.
pub fn can_place(grid: &Grid, kind: ShapeKind, x: i8, y: i8) -> bool {
    get_offsets(kind).iter().all(|&(dx, dy)| {
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(cx), Some(cy)) => grid.is_empty_at(cx, cy),
            _ => false,
        }
    })
}

/// Check whether `kind` fits at any of the 64 origins
pub fn fits_anywhere(grid: &Grid, kind: ShapeKind) -> bool {
    let size = GRID_SIZE as i8;
    (0..size).any(|y| (0..size).any(|x| can_place(grid, kind, x, y)))
}

/// Check whether any available shape fits anywhere on the grid
///
/// Short-circuits on the first fit. An empty batch never fits.
pub fn any_shape_fits(grid: &Grid, shapes: &[Shape]) -> bool {
    shapes.iter().any(|shape| fits_anywhere(grid, shape.kind))
}

/// All origins where `kind` fits, row by row
pub fn valid_origins(grid: &Grid, kind: ShapeKind) -> ArrayVec<(i8, i8), GRID_CELLS> {
    let size = GRID_SIZE as i8;
    let mut out = ArrayVec::new();
    for y in 0..size {
        for x in 0..size {
            if can_place(grid, kind, x, y) {
                out.push((x, y));
            }
        }
    }
    out
}
