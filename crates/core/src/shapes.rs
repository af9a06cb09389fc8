//! Shapes module - the fixed catalog of piece geometries
//!
//! Each [`ShapeKind`] maps to a static table of cell offsets relative to the
//! shape's top-left origin (`dx` to the right, `dy` downward). Shapes never
//! rotate; what is dealt is what gets placed.

use std::fmt;

use crate::rng::RandomSource;
use crate::types::{BlockColor, ShapeKind};

/// Offset of a single cell relative to the shape origin
pub type CellOffset = (i8, i8);

const DOT: [CellOffset; 1] = [(0, 0)];
const LINE_2: [CellOffset; 2] = [(0, 0), (1, 0)];
const LINE_3: [CellOffset; 3] = [(0, 0), (1, 0), (2, 0)];
const LINE_4: [CellOffset; 4] = [(0, 0), (1, 0), (2, 0), (3, 0)];
const SQUARE_2: [CellOffset; 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
const SQUARE_3: [CellOffset; 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];
const L_SMALL: [CellOffset; 3] = [(0, 0), (0, 1), (1, 1)];
const L_LARGE: [CellOffset; 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];
const T_SHAPE: [CellOffset; 4] = [(0, 0), (1, 0), (2, 0), (1, 1)];
const Z_SHAPE: [CellOffset; 4] = [(0, 0), (1, 0), (1, 1), (2, 1)];
const S_SHAPE: [CellOffset; 4] = [(0, 1), (1, 1), (1, 0), (2, 0)];

/// Get the occupied cell offsets for a shape kind
pub fn get_offsets(kind: ShapeKind) -> &'static [CellOffset] {
    match kind {
        ShapeKind::Dot => &DOT,
        ShapeKind::Line2 => &LINE_2,
        ShapeKind::Line3 => &LINE_3,
        ShapeKind::Line4 => &LINE_4,
        ShapeKind::Square2 => &SQUARE_2,
        ShapeKind::Square3 => &SQUARE_3,
        ShapeKind::LSmall => &L_SMALL,
        ShapeKind::LLarge => &L_LARGE,
        ShapeKind::T => &T_SHAPE,
        ShapeKind::Z => &Z_SHAPE,
        ShapeKind::S => &S_SHAPE,
    }
}

/// Bounding width (max dx + 1)
pub fn width(kind: ShapeKind) -> u8 {
    get_offsets(kind).iter().map(|&(dx, _)| dx).max().unwrap_or(0) as u8 + 1
}

/// Bounding height (max dy + 1)
pub fn height(kind: ShapeKind) -> u8 {
    get_offsets(kind).iter().map(|&(_, dy)| dy).max().unwrap_or(0) as u8 + 1
}

/// Number of occupied cells
pub fn cell_count(kind: ShapeKind) -> usize {
    get_offsets(kind).len()
}

/// Pick a template uniformly at random
pub fn random_template<R: RandomSource>(rng: &mut R) -> ShapeKind {
    ShapeKind::ALL[rng.next_below(ShapeKind::ALL.len() as u32) as usize]
}

/// Pick a palette color uniformly at random
pub fn random_color<R: RandomSource>(rng: &mut R) -> BlockColor {
    BlockColor::ALL[rng.next_below(BlockColor::ALL.len() as u32) as usize]
}

/// Identity of a dealt shape, unique within one round controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A dealt shape: template plus assigned color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub color: BlockColor,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, color: BlockColor) -> Self {
        Self { id, kind, color }
    }

    /// Deal a random template with a random color
    pub fn random<R: RandomSource>(id: ShapeId, rng: &mut R) -> Self {
        let kind = random_template(rng);
        let color = random_color(rng);
        Self { id, kind, color }
    }

    pub fn offsets(&self) -> &'static [CellOffset] {
        get_offsets(self.kind)
    }

    pub fn width(&self) -> u8 {
        width(self.kind)
    }

    pub fn height(&self) -> u8 {
        height(self.kind)
    }
}
