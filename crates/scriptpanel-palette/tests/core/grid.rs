use proptest::prelude::*;
use scriptpanel_core::{Point, Rect, Size};
use scriptpanel_palette::grid::{grid_lines, is_on_grid, snap_point, snap_size, Orientation};

proptest! {
    #[test]
    fn prop_snap_is_idempotent(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6, g in 1u32..200) {
        let once = snap_point(Point::new(x, y), g);
        let twice = snap_point(once, g);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_snap_is_non_negative(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6, g in 1u32..200) {
        let snapped = snap_point(Point::new(x, y), g);
        prop_assert!(snapped.x >= 0.0);
        prop_assert!(snapped.y >= 0.0);
    }

    #[test]
    fn prop_snap_lands_on_grid(x in 0.0f64..1.0e5, y in 0.0f64..1.0e5, g in 1u32..200) {
        let snapped = snap_point(Point::new(x, y), g);
        prop_assert!(is_on_grid(snapped.x, g));
        prop_assert!(is_on_grid(snapped.y, g));
        prop_assert!((snapped.x - x).abs() <= g as f64 / 2.0 + 1e-6);
        prop_assert!((snapped.y - y).abs() <= g as f64 / 2.0 + 1e-6);
    }

    #[test]
    fn prop_snap_size_is_non_negative(w in -1.0e4f64..1.0e4, h in -1.0e4f64..1.0e4, g in 1u32..100) {
        let snapped = snap_size(Size::new(w, h), g);
        prop_assert!(snapped.width >= 0.0);
        prop_assert!(snapped.height >= 0.0);
    }

    #[test]
    fn prop_grid_lines_stay_inside_view(
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        width in 0.0f64..800.0,
        height in 0.0f64..800.0,
        g in 5u32..100,
    ) {
        let view = Rect::new(left, top, width, height);
        for line in grid_lines(&view, g) {
            match line.orientation {
                Orientation::Vertical => {
                    prop_assert!(line.start.x >= view.left() - 1e-9 && line.start.x <= view.right());
                    prop_assert!((line.start.x / g as f64).fract().abs() < 1e-9);
                }
                Orientation::Horizontal => {
                    prop_assert!(line.start.y >= view.top() - 1e-9 && line.start.y <= view.bottom());
                    prop_assert!((line.start.y / g as f64).fract().abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_grid_lines_for_default_view() {
    let lines = grid_lines(&Rect::new(0.0, 0.0, 800.0, 600.0), 20);
    let vertical = lines
        .iter()
        .filter(|l| l.orientation == Orientation::Vertical)
        .count();
    assert_eq!(vertical, 41);
    assert_eq!(lines.len() - vertical, 31);
}

#[test]
fn test_grid_lines_with_negative_origin() {
    let lines = grid_lines(&Rect::new(-30.0, 0.0, 40.0, 0.0), 20);
    let xs: Vec<f64> = lines
        .iter()
        .filter(|l| l.orientation == Orientation::Vertical)
        .map(|l| l.start.x)
        .collect();
    assert_eq!(xs, vec![-20.0, 0.0]);
}
