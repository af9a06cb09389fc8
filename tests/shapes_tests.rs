//! Shape catalog tests

use blockfit::core::rng::SimpleRng;
use blockfit::core::shapes::{cell_count, height, width};
use blockfit::core::{Shape, ShapeId};
use blockfit::types::{BlockColor, ShapeKind};

#[test]
fn test_catalog_dimensions() {
    let expected = [
        (ShapeKind::Dot, 1, 1, 1),
        (ShapeKind::Line2, 2, 1, 2),
        (ShapeKind::Line3, 3, 1, 3),
        (ShapeKind::Line4, 4, 1, 4),
        (ShapeKind::Square2, 2, 2, 4),
        (ShapeKind::Square3, 3, 3, 9),
        (ShapeKind::LSmall, 2, 2, 3),
        (ShapeKind::LLarge, 2, 3, 4),
        (ShapeKind::T, 3, 2, 4),
        (ShapeKind::Z, 3, 2, 4),
        (ShapeKind::S, 3, 2, 4),
    ];

    for (kind, w, h, cells) in expected {
        assert_eq!(width(kind), w, "{:?} width", kind);
        assert_eq!(height(kind), h, "{:?} height", kind);
        assert_eq!(cell_count(kind), cells, "{:?} cells", kind);
    }
}

#[test]
fn test_shape_accessors_follow_kind() {
    let shape = Shape::new(ShapeId(3), ShapeKind::LLarge, BlockColor::Orange);
    assert_eq!((shape.width(), shape.height()), (2, 3));
    assert_eq!(shape.offsets().len(), cell_count(ShapeKind::LLarge));
}

#[test]
fn test_same_seed_same_shapes() {
    let mut a = SimpleRng::new(77);
    let mut b = SimpleRng::new(77);
    for i in 0..50 {
        assert_eq!(
            Shape::random(ShapeId(i), &mut a),
            Shape::random(ShapeId(i), &mut b)
        );
    }
}

#[test]
fn test_kind_names() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
    }
    assert_eq!(ShapeKind::from_str("L_SMALL"), Some(ShapeKind::LSmall));
    assert_eq!(ShapeKind::from_str("hexomino"), None);
}
