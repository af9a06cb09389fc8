//! Round controller tests - full rounds through the public API

use blockfit::core::{
    any_shape_fits, evaluate_and_clear, DailySeed, EngineError, Grid, Progress, RandomSource,
    Round, RoundEvent, RoundMode, RoundPhase, Shape,
};
use blockfit::types::{BlockColor, Cell, ShapeKind, Theme};

/// Always draws index 0: every shape is a red dot.
#[derive(Debug, Clone)]
struct ZeroRng;

impl RandomSource for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
}

fn id_of(round: &Round, kind: ShapeKind) -> blockfit::core::ShapeId {
    round
        .shapes()
        .iter()
        .find(|s| s.kind == kind)
        .map(|s| s.id)
        .expect("shape kind in batch")
}

#[test]
fn test_classic_single_dot_end_to_end() {
    let mut round = Round::with_rng(ZeroRng);
    round.start_level(0);

    assert_eq!(round.mode(), RoundMode::Classic);
    assert!(round
        .shapes()
        .iter()
        .all(|s| s.kind == ShapeKind::Dot && s.color == BlockColor::Red));

    let id = round.shapes()[0].id;
    round.place(id, 0, 0).unwrap();

    assert_eq!(round.grid().get(0, 0), Some(Cell::Block(BlockColor::Red)));
    assert_eq!(round.grid().filled_count(), 1);
    assert_eq!(round.score(), 0);
    assert_eq!(round.combo(), 0);
    assert_eq!(round.shapes().len(), 2);
    assert!(round.can_undo());
}

#[test]
fn test_injected_rng_drives_garbage() {
    let mut a = Round::with_rng(ZeroRng);
    let mut b = Round::with_rng(ZeroRng);
    a.start_level(40);
    b.start_level(40);
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.grid().garbage_count(), 12);
}

#[test]
fn test_level_garbage_counts() {
    let mut round = Round::new(99);
    for (level, garbage) in [(1, 0), (10, 0), (11, 0), (12, 1), (20, 5), (34, 12), (100, 12)] {
        round.start_level(level);
        assert_eq!(round.grid().garbage_count(), garbage, "level {}", level);
        assert_eq!(round.grid().filled_count(), garbage, "level {}", level);
    }
}

#[test]
fn test_level_themes() {
    let mut round = Round::new(1);
    for (level, theme) in [
        (1, Theme::Classic),
        (20, Theme::Classic),
        (21, Theme::Wood),
        (40, Theme::Wood),
        (60, Theme::Neon),
        (61, Theme::Jigsaw),
    ] {
        round.start_level(level);
        assert_eq!(round.theme(), theme, "level {}", level);
    }
}

#[test]
fn test_daily_layout_is_reproducible() {
    let seed = DailySeed::new(2026, 292).unwrap();
    let mut a = Round::new(1);
    let mut b = Round::new(2);
    a.start_daily(seed);
    b.start_daily(seed);

    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.grid().garbage_count(), 15);
    assert_eq!(a.target(), Some(3000));
    assert_eq!(a.mode(), RoundMode::Daily(seed));

    let mut c = Round::new(1);
    c.start_daily(DailySeed::new(2026, 293).unwrap());
    assert_ne!(a.grid(), c.grid());
}

#[test]
fn test_daily_seed_validation() {
    assert_eq!(
        DailySeed::new(2026, 0),
        Err(EngineError::InvalidDailySeed { day_of_year: 0 })
    );
    assert!(DailySeed::new(2024, 366).is_ok());
    assert!(DailySeed::new(2026, 367).is_err());
}

#[test]
fn test_combo_scales_points() {
    let mut round = Round::new(5);
    round.start_custom(
        Grid::from_rows(&[
            "xxxxxx..", "xxxxxx..", "........", "........", "........", "........",
            "xxxxxx..", "xxxxxx..",
        ]),
        &[ShapeKind::Square2, ShapeKind::Square2, ShapeKind::Dot],
    );
    let first = round.shapes()[0].id;
    let second = round.shapes()[1].id;
    let dot = id_of(&round, ShapeKind::Dot);

    // Two rows at combo 1.
    round.place(first, 6, 0).unwrap();
    assert_eq!((round.score(), round.combo()), (20, 1));

    // Two rows at combo 2.
    round.place(second, 6, 6).unwrap();
    assert_eq!((round.score(), round.combo()), (60, 2));

    // Nothing cleared: combo resets, score stays.
    let events = round.place(dot, 3, 3).unwrap();
    assert_eq!((round.score(), round.combo()), (60, 0));
    assert!(events.contains(&RoundEvent::ComboBroken { previous: 2 }));
}

#[test]
fn test_row_and_column_clear_together() {
    let mut round = Round::new(5);
    round.start_custom(
        Grid::from_rows(&[
            "xxxx.xxx", "....x...", "....x...", "....x...", "....x...", "....x...",
            "....x...", "....x...",
        ]),
        &[ShapeKind::Dot],
    );
    let dot = round.shapes()[0].id;

    let events = round.place(dot, 4, 0).unwrap();
    let clear = events
        .iter()
        .find_map(|e| match e {
            RoundEvent::LinesCleared(c) => Some(c.clone()),
            _ => None,
        })
        .expect("lines cleared");

    assert_eq!(clear.rows.as_slice(), &[0]);
    assert_eq!(clear.cols.as_slice(), &[4]);
    assert_eq!(clear.cleared.len(), 15);
    assert_eq!(clear.points, 20);
    assert!(round.grid().is_clear());
}

#[test]
fn test_clear_is_idempotent() {
    let mut grid = Grid::from_rows(&["xxxxxxxx", "x", "x", "x", "x", "x", "x", "x"]);
    let first = evaluate_and_clear(&mut grid, 3);
    assert_eq!(first.combo, 4);
    assert_eq!(first.lines(), 2);

    let after = grid.clone();
    let second = evaluate_and_clear(&mut grid, first.combo);
    assert!(!second.is_clear());
    assert_eq!(second.combo, 0);
    assert_eq!(second.points, 0);
    assert_eq!(grid, after);
}

#[test]
fn test_undo_is_single_depth() {
    let mut round = Round::new(8);
    round.start_custom(
        Grid::from_rows(&["#......."]),
        &[ShapeKind::Line3, ShapeKind::T, ShapeKind::LSmall],
    );
    let before_grid = round.grid().clone();
    let before_shapes: Vec<Shape> = round.shapes().to_vec();

    let t = id_of(&round, ShapeKind::T);
    let line = id_of(&round, ShapeKind::Line3);
    round.place(t, 2, 2).unwrap();
    let mid_grid = round.grid().clone();
    round.place(line, 0, 6).unwrap();

    round.undo().unwrap();
    assert_eq!(round.grid(), &mid_grid);
    assert!(round.undo().is_none());
    assert_ne!(round.grid(), &before_grid);
    assert_ne!(round.shapes(), before_shapes.as_slice());
}

#[test]
fn test_oracle_full_and_empty() {
    let shapes = [
        Shape::new(blockfit::core::ShapeId(0), ShapeKind::Dot, BlockColor::Blue),
        Shape::new(blockfit::core::ShapeId(1), ShapeKind::Square3, BlockColor::Blue),
    ];
    let full = Grid::from_rows(&["xxxxxxxx"; 8]);
    assert!(!any_shape_fits(&full, &shapes));
    assert!(any_shape_fits(&Grid::new(), &shapes));
    assert!(!any_shape_fits(&Grid::new(), &[]));
}

#[test]
fn test_game_over_records_high_score() {
    let mut round = Round::new(3).with_progress(Progress {
        high_score: 5,
        ..Progress::default()
    });
    round.start_custom(
        Grid::from_rows(&[
            "xxxxxxx.", "x.x.x.x.", ".x.x.x.x", "x.x.x.x.", ".x.x.x.x", "x.x.x.x.",
            ".x.x.x.x", "x.x.x.x.",
        ]),
        &[ShapeKind::Dot, ShapeKind::Square3],
    );
    let dot = id_of(&round, ShapeKind::Dot);

    let events = round.place(dot, 7, 0).unwrap();
    assert_eq!(round.score(), 10);
    assert_eq!(round.phase(), RoundPhase::GameOver);
    assert!(events.contains(&RoundEvent::GameOver { score: 10 }));
    assert!(events.contains(&RoundEvent::NewHighScore { score: 10 }));
    assert_eq!(round.progress().high_score, 10);

    assert_eq!(round.place(dot, 0, 0), Err(EngineError::RoundOver));
}

#[test]
fn test_revive_clears_centre_once() {
    // Alternate open columns: dots fit, a 3x3 never does.
    let mut round = Round::new(3);
    round.start_custom(
        Grid::from_rows(&[".x.x.x.x"; 8]),
        &[ShapeKind::Dot, ShapeKind::Square3],
    );
    assert!(round.revive_once().is_none());

    let dot = id_of(&round, ShapeKind::Dot);
    let events = round.place(dot, 0, 0).unwrap();
    assert!(events.contains(&RoundEvent::GameOver { score: 0 }));
    assert_eq!(round.phase(), RoundPhase::GameOver);

    let events = round.revive_once().unwrap();
    assert!(matches!(events[0], RoundEvent::Revived { .. }));
    assert_eq!(round.phase(), RoundPhase::AwaitingPlacement);
    assert!(round.grid().is_empty_at(3, 2));
    assert!(round.grid().is_empty_at(5, 5));
    assert!(!round.grid().is_empty_at(1, 1));
    assert!(!round.grid().is_empty_at(3, 6));
    let square = Shape::new(blockfit::core::ShapeId(900), ShapeKind::Square3, BlockColor::Red);
    assert!(any_shape_fits(round.grid(), &[square]));
    assert!(round.revive_once().is_none());
}

#[test]
fn test_classic_has_no_target() {
    let mut round = Round::new(3);
    round.start_custom(
        Grid::from_rows(&["xxxxxxx."; 8]),
        &[ShapeKind::Dot, ShapeKind::Dot, ShapeKind::Dot],
    );
    assert_eq!(round.target(), None);

    let dot = round.shapes()[0].id;
    round.place(dot, 7, 0).unwrap();
    assert_eq!(round.phase(), RoundPhase::AwaitingPlacement);
}
