//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, making them usable
//! in any context (engine logic, command parsing, the JSON driver).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 8x8 square:
//!
//! - **Columns**: x in 0..8 (left to right)
//! - **Rows**: y in 0..8 (top to bottom)
//!
//! # Round Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SHAPES_PER_BATCH` | 3 | Shapes dealt together |
//! | `LINE_POINTS` | 10 | Points per cleared line before combo |
//! | `LEVEL_BASE_TARGET` | 1000 | Target score base for levels |
//! | `LEVEL_TARGET_STEP` | 500 | Target score added per level |
//! | `GARBAGE_LEVEL_THRESHOLD` | 10 | Levels above this start with garbage |
//! | `MAX_LEVEL_GARBAGE` | 12 | Garbage cap for levels |
//! | `DAILY_TARGET_SCORE` | 3000 | Daily challenge target |
//! | `DAILY_GARBAGE_COUNT` | 15 | Daily challenge garbage |
//! | `MAX_LEVEL` | 500 | Highest selectable level |
//!
//! # Examples
//!
//! ```
//! use blockfit_types::{ShapeKind, RoundCommand, GRID_SIZE};
//!
//! let kind = ShapeKind::from_str("l_large").unwrap();
//! assert_eq!(kind, ShapeKind::LLarge);
//!
//! let cmd = RoundCommand::Place { shape_id: 3, x: 2, y: 5 };
//! assert_eq!(cmd.as_str(), "place");
//!
//! assert_eq!(GRID_SIZE, 8);
//! ```

/// Grid side length in cells (8x8)
pub const GRID_SIZE: u8 = 8;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of shapes dealt in one batch
pub const SHAPES_PER_BATCH: usize = 3;

/// Points per cleared line, multiplied by the combo value
pub const LINE_POINTS: u32 = 10;

/// Level target score: `LEVEL_BASE_TARGET + level * LEVEL_TARGET_STEP`
pub const LEVEL_BASE_TARGET: u32 = 1000;

/// Target score added per level
pub const LEVEL_TARGET_STEP: u32 = 500;

/// Levels strictly above this start with garbage on the grid
pub const GARBAGE_LEVEL_THRESHOLD: u32 = 10;

/// Upper bound on garbage cells seeded for a level
pub const MAX_LEVEL_GARBAGE: u32 = 12;

/// Daily challenge target score
pub const DAILY_TARGET_SCORE: u32 = 3000;

/// Garbage cells seeded for the daily challenge
pub const DAILY_GARBAGE_COUNT: u32 = 15;

/// Coins granted for finishing the daily challenge
pub const DAILY_COIN_REWARD: u32 = 50;

/// Base coins for finishing a level (plus 2 per level number)
pub const LEVEL_COIN_BASE: u32 = 10;

/// Highest level that can be unlocked
pub const MAX_LEVEL: u32 = 500;

/// Side of the square region cleared by a revive, centred on the grid
pub const REVIVE_REGION: u8 = 4;


/// The eleven shape templates
///
/// - **Dot**: single cell
/// - **Line2/Line3/Line4**: horizontal bars
/// - **Square2/Square3**: 2x2 and 3x3 blocks
/// - **LSmall/LLarge**: three- and four-cell L shapes
/// - **T**, **Z**, **S**: tetromino-style shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Dot,
    Line2,
    Line3,
    Line4,
    Square2,
    Square3,
    LSmall,
    LLarge,
    T,
    Z,
    S,
}

impl ShapeKind {
    /// Every template, in catalog order
    pub const ALL: [ShapeKind; 11] = [
        ShapeKind::Dot,
        ShapeKind::Line2,
        ShapeKind::Line3,
        ShapeKind::Line4,
        ShapeKind::Square2,
        ShapeKind::Square3,
        ShapeKind::LSmall,
        ShapeKind::LLarge,
        ShapeKind::T,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    /// Parse shape kind from string (case-insensitive, underscores optional)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("dot"), Some(ShapeKind::Dot));
    /// assert_eq!(ShapeKind::from_str("Line4"), Some(ShapeKind::Line4));
    /// assert_eq!(ShapeKind::from_str("l_small"), Some(ShapeKind::LSmall));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "dot" => Some(ShapeKind::Dot),
            "line2" => Some(ShapeKind::Line2),
            "line3" => Some(ShapeKind::Line3),
            "line4" => Some(ShapeKind::Line4),
            "square2" => Some(ShapeKind::Square2),
            "square3" => Some(ShapeKind::Square3),
            "lsmall" => Some(ShapeKind::LSmall),
            "llarge" => Some(ShapeKind::LLarge),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            "s" => Some(ShapeKind::S),
            _ => None,
        }
    }

    /// Convert to snake_case string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Dot => "dot",
            ShapeKind::Line2 => "line2",
            ShapeKind::Line3 => "line3",
            ShapeKind::Line4 => "line4",
            ShapeKind::Square2 => "square2",
            ShapeKind::Square3 => "square3",
            ShapeKind::LSmall => "l_small",
            ShapeKind::LLarge => "l_large",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
            ShapeKind::S => "s",
        }
    }
}

/// Shape color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
    Lime,
}

impl BlockColor {
    /// Every palette color, in palette order
    pub const ALL: [BlockColor; 9] = [
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Yellow,
        BlockColor::Purple,
        BlockColor::Orange,
        BlockColor::Cyan,
        BlockColor::Pink,
        BlockColor::Lime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Blue => "blue",
            BlockColor::Green => "green",
            BlockColor::Yellow => "yellow",
            BlockColor::Purple => "purple",
            BlockColor::Orange => "orange",
            BlockColor::Cyan => "cyan",
            BlockColor::Pink => "pink",
            BlockColor::Lime => "lime",
        }
    }

    fn index(&self) -> u8 {
        match self {
            BlockColor::Red => 0,
            BlockColor::Blue => 1,
            BlockColor::Green => 2,
            BlockColor::Yellow => 3,
            BlockColor::Purple => 4,
            BlockColor::Orange => 5,
            BlockColor::Cyan => 6,
            BlockColor::Pink => 7,
            BlockColor::Lime => 8,
        }
    }
}

/// A cell on the grid
///
/// - `Empty`: unoccupied
/// - `Garbage`: pre-filled obstacle, counts toward full lines
/// - `Block(color)`: filled by a placed shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Garbage,
    Block(BlockColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Wire encoding: 0 = empty, 1 = garbage, 2..=10 = palette color
    pub fn as_u8(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Garbage => 1,
            Cell::Block(color) => 2 + color.index(),
        }
    }

    /// Inverse of [`Cell::as_u8`]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Garbage),
            2..=10 => Some(Cell::Block(BlockColor::ALL[(v - 2) as usize])),
            _ => None,
        }
    }
}

/// Board theme, chosen from the round mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Classic,
    Wood,
    Neon,
    Jigsaw,
}

impl Theme {
    /// Theme for a level id (0 is classic mode)
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=20 => Theme::Classic,
            21..=40 => Theme::Wood,
            41..=60 => Theme::Neon,
            _ => Theme::Jigsaw,
        }
    }

    /// The daily challenge always uses the neon board
    pub fn daily() -> Self {
        Theme::Neon
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Wood => "wood",
            Theme::Neon => "neon",
            Theme::Jigsaw => "jigsaw",
        }
    }
}

/// Commands accepted by a round
///
/// These are used by both human front-ends and scripted drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundCommand {
    /// Start level `level` (0 is classic/endless)
    StartLevel { level: u32 },
    /// Start the daily challenge for a calendar day
    StartDaily { year: i32, day_of_year: u16 },
    /// Place an available shape with its top-left offset at (x, y)
    Place { shape_id: u32, x: i8, y: i8 },
    /// Revert the last placement
    Undo,
    /// Replace the current batch
    Skip,
    /// Clear the grid centre once per round
    Revive,
}

impl RoundCommand {
    /// Convert to snake_case op name
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundCommand::StartLevel { .. } => "start_level",
            RoundCommand::StartDaily { .. } => "start_daily",
            RoundCommand::Place { .. } => "place",
            RoundCommand::Undo => "undo",
            RoundCommand::Skip => "skip",
            RoundCommand::Revive => "revive",
        }
    }
}
