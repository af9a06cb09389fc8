use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfit::core::{any_shape_fits, can_place, evaluate_and_clear, Grid, Round, Shape, ShapeId};
use blockfit::types::{BlockColor, ShapeKind};

fn bench_can_place(c: &mut Criterion) {
    let grid = Grid::from_rows(&["x.x.x.x.", ".x.x.x.x", "........", "#......#"]);

    c.bench_function("can_place_square3", |b| {
        b.iter(|| can_place(black_box(&grid), ShapeKind::Square3, black_box(2), black_box(4)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_row_and_column", |b| {
        b.iter(|| {
            let mut grid = Grid::from_rows(&[
                "xxxxxxxx", "x.......", "x.......", "x.......", "x.......", "x.......",
                "x.......", "x.......",
            ]);
            evaluate_and_clear(&mut grid, black_box(1))
        })
    });
}

fn bench_oracle_worst_case(c: &mut Criterion) {
    // Checkerboard: nothing but a dot fits, so every origin is probed.
    let grid = Grid::from_rows(&[
        "x.x.x.x.", ".x.x.x.x", "x.x.x.x.", ".x.x.x.x", "x.x.x.x.", ".x.x.x.x", "x.x.x.x.",
        ".x.x.x.x",
    ]);
    let shapes = [
        Shape::new(ShapeId(0), ShapeKind::Square3, BlockColor::Red),
        Shape::new(ShapeId(1), ShapeKind::Line4, BlockColor::Blue),
        Shape::new(ShapeId(2), ShapeKind::T, BlockColor::Green),
    ];

    c.bench_function("any_shape_fits_none", |b| {
        b.iter(|| any_shape_fits(black_box(&grid), black_box(&shapes)))
    });
}

fn bench_start_level(c: &mut Criterion) {
    let mut round = Round::new(12345);

    c.bench_function("start_level_40", |b| {
        b.iter(|| round.start_level(black_box(40)))
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_line_clear,
    bench_oracle_worst_case,
    bench_start_level
);
criterion_main!(benches);
