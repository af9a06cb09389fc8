//! Round module - the round controller
//!
//! This module ties together all core components: grid, shapes, RNG and
//! scoring. It deals shapes, applies placements, keeps the one-step undo
//! snapshot and decides when a round is won or lost.
//!
//! Every operation runs to completion and returns the events it produced.
//! Callers play sounds, persist progress or show ads after the call returns.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::error::EngineError;
use crate::grid::Grid;
use crate::placement::{any_shape_fits, can_place};
use crate::progress::Progress;
use crate::rng::{DailySeed, RandomSource, SimpleRng};
use crate::scoring::{
    daily_coin_reward, evaluate_and_clear, level_coin_reward, level_garbage_count, level_target,
    ClearResult, ClearedCell,
};
use crate::shapes::{random_color, Shape, ShapeId};
use crate::snapshot::{RoundSnapshot, UndoSnapshot};
use crate::types::{
    Cell, ShapeKind, Theme, DAILY_GARBAGE_COUNT, DAILY_TARGET_SCORE, GRID_CELLS, GRID_SIZE,
    REVIVE_REGION, SHAPES_PER_BATCH,
};

/// Which kind of round is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundMode {
    /// Endless play, no target score (level id 0).
    Classic,
    Level(u32),
    Daily(DailySeed),
}

impl RoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundMode::Classic => "classic",
            RoundMode::Level(_) => "level",
            RoundMode::Daily(_) => "daily",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            RoundMode::Classic => Theme::for_level(0),
            RoundMode::Level(level) => Theme::for_level(*level),
            RoundMode::Daily(_) => Theme::daily(),
        }
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// No round started yet.
    Idle,
    AwaitingPlacement,
    LevelComplete,
    DailyComplete,
    GameOver,
}

impl RoundPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RoundPhase::LevelComplete | RoundPhase::DailyComplete | RoundPhase::GameOver
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::AwaitingPlacement => "awaiting_placement",
            RoundPhase::LevelComplete => "level_complete",
            RoundPhase::DailyComplete => "daily_complete",
            RoundPhase::GameOver => "game_over",
        }
    }
}

/// Something the caller may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    RoundStarted {
        mode: RoundMode,
        target: Option<u32>,
        garbage: u32,
    },
    ShapesDealt {
        shapes: ArrayVec<Shape, SHAPES_PER_BATCH>,
    },
    Placed {
        shape: Shape,
        x: i8,
        y: i8,
    },
    LinesCleared(ClearResult),
    /// A non-clearing placement ended a running combo.
    ComboBroken {
        previous: u32,
    },
    LevelComplete {
        level: u32,
        coin_reward: u32,
    },
    DailyComplete {
        seed: DailySeed,
        coin_reward: u32,
    },
    UnlockAdvanced {
        max_unlocked_level: u32,
    },
    NewHighScore {
        score: u32,
    },
    GameOver {
        score: u32,
    },
    Undone {
        score: u32,
    },
    Skipped,
    Revived {
        cleared: ArrayVec<ClearedCell, { (REVIVE_REGION as usize) * (REVIVE_REGION as usize) }>,
    },
}

/// Events produced by one operation, in the order they happened
pub type RoundEvents = Vec<RoundEvent>;

/// One round of play
#[derive(Debug, Clone)]
pub struct Round<R: RandomSource = SimpleRng> {
    grid: Grid,
    shapes: ArrayVec<Shape, SHAPES_PER_BATCH>,
    score: u32,
    combo: u32,
    mode: RoundMode,
    /// None means unbounded (classic).
    target: Option<u32>,
    phase: RoundPhase,
    revive_used: bool,
    undo: Option<UndoSnapshot>,
    /// Next id handed to a dealt shape.
    next_shape_id: u32,
    progress: Progress,
    rng: R,
}

impl Round<SimpleRng> {
    /// Create an idle controller with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Round<R> {
    /// Create an idle controller drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            grid: Grid::new(),
            shapes: ArrayVec::new(),
            score: 0,
            combo: 0,
            mode: RoundMode::Classic,
            target: None,
            phase: RoundPhase::Idle,
            revive_used: false,
            undo: None,
            next_shape_id: 0,
            progress: Progress::default(),
            rng,
        }
    }

    /// Use progress restored by the caller
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<Shape> {
        self.shapes.iter().find(|s| s.id == id).copied()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn revive_used(&self) -> bool {
        self.revive_used
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn theme(&self) -> Theme {
        self.mode.theme()
    }

    /// Undo is available only while placements are accepted
    pub fn can_undo(&self) -> bool {
        self.undo.is_some() && self.phase == RoundPhase::AwaitingPlacement
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        self.grid.write_u8_grid(&mut out.cells);
        out.shapes = self.shapes.clone();
        out.score = self.score;
        out.combo = self.combo;
        out.mode = self.mode;
        out.target = self.target;
        out.phase = self.phase;
        out.can_undo = self.can_undo();
        out.revive_used = self.revive_used;
        out.progress = self.progress;
        out.theme = self.theme();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot {
            cells: [[0; GRID_SIZE as usize]; GRID_SIZE as usize],
            shapes: ArrayVec::new(),
            score: 0,
            combo: 0,
            mode: RoundMode::Classic,
            target: None,
            phase: RoundPhase::Idle,
            can_undo: false,
            revive_used: false,
            progress: Progress::default(),
            theme: Theme::Classic,
        };
        self.snapshot_into(&mut s);
        s
    }

    /// Start level `level`; 0 starts a classic (endless) round
    pub fn start_level(&mut self, level: u32) -> RoundEvents {
        let mode = if level == 0 {
            RoundMode::Classic
        } else {
            RoundMode::Level(level)
        };
        self.reset(mode, level_target(level));

        let garbage = level_garbage_count(level);
        seed_garbage(&mut self.grid, &mut self.rng, garbage);

        info!(level, target = ?self.target, garbage, "level started");
        self.finish_start(garbage)
    }

    /// Start the daily challenge for `seed`
    ///
    /// The garbage layout depends only on the seed, never on this
    /// controller's generator.
    pub fn start_daily(&mut self, seed: DailySeed) -> RoundEvents {
        self.reset(RoundMode::Daily(seed), Some(DAILY_TARGET_SCORE));

        let mut daily_rng = seed.rng();
        seed_garbage(&mut self.grid, &mut daily_rng, DAILY_GARBAGE_COUNT);

        info!(%seed, "daily challenge started");
        self.finish_start(DAILY_GARBAGE_COUNT)
    }

    /// Start a classic round from a prepared position
    ///
    /// Intended for puzzles and fixtures: the grid is taken as-is and the batch
    /// is dealt from `kinds` (at most three) with random colors.
    pub fn start_custom(&mut self, grid: Grid, kinds: &[ShapeKind]) -> RoundEvents {
        self.reset(RoundMode::Classic, None);
        self.grid = grid;
        for &kind in kinds.iter().take(SHAPES_PER_BATCH) {
            let id = self.take_shape_id();
            let color = random_color(&mut self.rng);
            self.shapes.push(Shape::new(id, kind, color));
        }
        self.phase = RoundPhase::AwaitingPlacement;

        let garbage = self.grid.garbage_count() as u32;
        vec![
            RoundEvent::RoundStarted {
                mode: self.mode,
                target: self.target,
                garbage,
            },
            RoundEvent::ShapesDealt {
                shapes: self.shapes.clone(),
            },
        ]
    }

    fn reset(&mut self, mode: RoundMode, target: Option<u32>) {
        self.grid.reset();
        self.shapes.clear();
        self.score = 0;
        self.combo = 0;
        self.mode = mode;
        self.target = target;
        self.revive_used = false;
        self.undo = None;
    }

    fn finish_start(&mut self, garbage: u32) -> RoundEvents {
        let mut events = vec![RoundEvent::RoundStarted {
            mode: self.mode,
            target: self.target,
            garbage,
        }];
        events.push(self.deal_batch());
        self.phase = RoundPhase::AwaitingPlacement;
        events
    }

    fn take_shape_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id = self.next_shape_id.wrapping_add(1);
        id
    }

    /// Replace the batch with three fresh shapes
    fn deal_batch(&mut self) -> RoundEvent {
        self.shapes.clear();
        for _ in 0..SHAPES_PER_BATCH {
            let id = self.take_shape_id();
            let shape = Shape::random(id, &mut self.rng);
            self.shapes.push(shape);
        }
        RoundEvent::ShapesDealt {
            shapes: self.shapes.clone(),
        }
    }

    /// Place shape `id` with its origin at (x, y)
    ///
    /// On error nothing changes.
    pub fn place(&mut self, id: ShapeId, x: i8, y: i8) -> Result<RoundEvents, EngineError> {
        if self.phase != RoundPhase::AwaitingPlacement {
            return Err(EngineError::RoundOver);
        }
        let idx = self
            .shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or(EngineError::UnknownShape(id))?;
        let shape = self.shapes[idx];
        if !can_place(&self.grid, shape.kind, x, y) {
            return Err(EngineError::InvalidPlacement { id, x, y });
        }

        self.undo = Some(UndoSnapshot::capture(&self.grid, &self.shapes, self.score));

        for &(dx, dy) in shape.offsets() {
            self.grid.set_cell(x + dx, y + dy, Cell::Block(shape.color))?;
        }
        self.shapes.remove(idx);
        debug!(shape = %id, kind = shape.kind.as_str(), x, y, "shape placed");

        let mut events = vec![RoundEvent::Placed { shape, x, y }];

        let previous_combo = self.combo;
        let clear = evaluate_and_clear(&mut self.grid, self.combo);
        self.combo = clear.combo;
        if clear.is_clear() {
            self.score = self.score.saturating_add(clear.points);
            debug!(
                rows = clear.rows.len(),
                cols = clear.cols.len(),
                combo = clear.combo,
                points = clear.points,
                "lines cleared"
            );
            events.push(RoundEvent::LinesCleared(clear));
        } else if previous_combo > 0 {
            events.push(RoundEvent::ComboBroken {
                previous: previous_combo,
            });
        }

        if self.shapes.is_empty() {
            events.push(self.deal_batch());
        }

        self.evaluate_outcome(&mut events);
        Ok(events)
    }

    /// Win check first, then the game-over oracle
    fn evaluate_outcome(&mut self, events: &mut RoundEvents) {
        let target_met = self.target.is_some_and(|target| self.score >= target);

        if target_met {
            match self.mode {
                RoundMode::Level(level) => {
                    self.phase = RoundPhase::LevelComplete;
                    let coin_reward = level_coin_reward(level);
                    info!(level, score = self.score, coin_reward, "level complete");
                    events.push(RoundEvent::LevelComplete { level, coin_reward });
                    if let Some(max_unlocked_level) = self.progress.record_level_complete(level) {
                        events.push(RoundEvent::UnlockAdvanced { max_unlocked_level });
                    }
                }
                RoundMode::Daily(seed) => {
                    self.phase = RoundPhase::DailyComplete;
                    let coin_reward = daily_coin_reward();
                    info!(%seed, score = self.score, "daily challenge complete");
                    self.progress.record_daily_win(seed);
                    events.push(RoundEvent::DailyComplete { seed, coin_reward });
                }
                RoundMode::Classic => {}
            }
        }

        if self.phase == RoundPhase::AwaitingPlacement && !any_shape_fits(&self.grid, &self.shapes)
        {
            self.phase = RoundPhase::GameOver;
            info!(score = self.score, "game over");
            events.push(RoundEvent::GameOver { score: self.score });
        }

        if self.phase.is_terminal() && self.progress.record_score(self.score) {
            events.push(RoundEvent::NewHighScore { score: self.score });
        }
    }

    /// Revert the last placement
    ///
    /// Returns None (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<RoundEvents> {
        if !self.can_undo() {
            return None;
        }
        let snapshot = self.undo.take()?;
        self.grid = snapshot.grid;
        self.shapes = snapshot.shapes;
        self.score = snapshot.score;
        self.combo = 0;
        debug!(score = self.score, "placement undone");

        Some(vec![
            RoundEvent::Undone { score: self.score },
            RoundEvent::ShapesDealt {
                shapes: self.shapes.clone(),
            },
        ])
    }

    /// Swap the current batch for three fresh shapes
    ///
    /// Returns None outside of play.
    pub fn skip(&mut self) -> Option<RoundEvents> {
        if self.phase != RoundPhase::AwaitingPlacement {
            return None;
        }
        self.undo = None;
        let dealt = self.deal_batch();
        debug!("batch skipped");
        Some(vec![RoundEvent::Skipped, dealt])
    }

    /// Clear the centre 4x4 and deal a fresh batch, once per round
    ///
    /// Only a round that ended in [`RoundPhase::GameOver`] can be revived.
    /// Returns None otherwise.
    pub fn revive_once(&mut self) -> Option<RoundEvents> {
        if self.revive_used || self.phase != RoundPhase::GameOver {
            return None;
        }
        self.revive_used = true;
        self.undo = None;

        let lo = ((GRID_SIZE - REVIVE_REGION) / 2) as i8;
        let hi = lo + REVIVE_REGION as i8;
        let mut cleared = ArrayVec::new();
        for y in lo..hi {
            for x in lo..hi {
                if let Some(prior) = self.grid.take(x, y).filter(|c| !c.is_empty()) {
                    cleared.push(ClearedCell {
                        x: x as u8,
                        y: y as u8,
                        prior,
                    });
                }
            }
        }

        self.phase = RoundPhase::AwaitingPlacement;
        info!(cleared = cleared.len(), "revived");

        let mut events = vec![RoundEvent::Revived { cleared }];
        events.push(self.deal_batch());
        Some(events)
    }
}

impl Default for Round<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Fill `count` distinct random cells with garbage
fn seed_garbage<R: RandomSource>(grid: &mut Grid, rng: &mut R, count: u32) {
    if count == 0 {
        return;
    }
    let mut positions: [u8; GRID_CELLS] = [0; GRID_CELLS];
    for (i, p) in positions.iter_mut().enumerate() {
        *p = i as u8;
    }
    rng.shuffle(&mut positions);

    for &pos in positions.iter().take(count as usize) {
        grid.set_index(pos as usize, Cell::Garbage);
    }
}
