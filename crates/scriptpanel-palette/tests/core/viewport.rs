use scriptpanel_core::{Point, Rect};
use scriptpanel_palette::Viewport;

#[test]
fn test_identity_by_default() {
    let viewport = Viewport::default();
    let p = Point::new(123.0, 45.0);
    assert_eq!(viewport.screen_to_scene(p), p);
    assert_eq!(viewport.visible_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn test_mapping_round_trips() {
    let mut viewport = Viewport::new(640.0, 480.0);
    viewport.set_zoom(2.0);
    viewport.set_pan(30.0, -10.0);

    let scene = Point::new(15.0, 20.0);
    let screen = viewport.scene_to_screen(scene);
    assert_eq!(screen, Point::new(60.0, 30.0));
    assert_eq!(viewport.screen_to_scene(screen), scene);
}

#[test]
fn test_visible_rect_follows_zoom_and_pan() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(2.0);
    viewport.set_pan(-200.0, -100.0);
    assert_eq!(viewport.visible_rect(), Rect::new(100.0, 50.0, 400.0, 300.0));
}

#[test]
fn test_zoom_is_clamped() {
    let mut viewport = Viewport::default();
    viewport.set_zoom(100.0);
    assert_eq!(viewport.zoom(), 10.0);
    viewport.set_zoom(0.0);
    assert_eq!(viewport.zoom(), 0.1);
    viewport.set_zoom(f64::NAN);
    assert_eq!(viewport.zoom(), 0.1);
}

#[test]
fn test_zoom_in_and_out_are_inverse() {
    let mut viewport = Viewport::default();
    viewport.zoom_in();
    assert_eq!(viewport.zoom(), 1.25);
    viewport.zoom_out();
    assert_eq!(viewport.zoom(), 1.0);
}

#[test]
fn test_zoom_to_point_keeps_anchor() {
    let mut viewport = Viewport::default();
    viewport.set_pan(13.0, 7.0);
    let anchor = Point::new(250.0, 150.0);
    let scene = viewport.screen_to_scene(anchor);

    viewport.zoom_to_point(anchor, 4.0);
    let back = viewport.scene_to_screen(scene);
    assert!((back.x - anchor.x).abs() < 1e-9);
    assert!((back.y - anchor.y).abs() < 1e-9);
}

#[test]
fn test_transform_round_trip() {
    let mut viewport = Viewport::default();
    viewport.set_zoom(0.5);
    viewport.set_pan(12.0, 34.0);
    let matrix = viewport.transform();
    assert_eq!(matrix, [0.5, 0.0, 0.0, 0.0, 0.5, 0.0, 12.0, 34.0, 1.0]);

    let mut other = Viewport::default();
    other.set_transform(&matrix);
    assert_eq!(other, viewport);

    other.reset();
    assert_eq!(other, Viewport::default());
}
