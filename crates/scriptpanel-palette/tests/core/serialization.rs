use std::fs;
use std::rc::Rc;

use proptest::prelude::*;
use scriptpanel_core::{
    CanvasSettings, DisplayInfo, ItemId, LayoutDocument, PlacementInfo, Point, Rgb, Size,
};
use scriptpanel_palette::display::{MEL_ICON, PYTHON_ICON};
use scriptpanel_palette::{
    apply_canvas_settings, apply_layout, capture_canvas_settings, capture_layout, ApplySummary,
    IconRegistry, Modifiers, PaletteCanvas, PaletteContent, ScriptWidget,
};

use crate::common::{place, widget};

fn sample_canvas() -> (PaletteCanvas, ItemId, ItemId) {
    let mut canvas = PaletteCanvas::new();
    let a = place(
        &mut canvas,
        "/s/a.py",
        Point::new(40.0, 80.0),
        Size::new(160.0, 80.0),
    );
    let b = place(
        &mut canvas,
        "/s/b.mel",
        Point::new(0.0, 0.0),
        Size::new(320.0, 160.0),
    );
    canvas.set_item_display(
        &a,
        &DisplayInfo {
            label: Some("Alpha".to_string()),
            color: Some(Rgb(200, 10, 10)),
            icon_path: Some(MEL_ICON.to_string()),
        },
    );
    (canvas, a, b)
}

fn reload(doc: &LayoutDocument) -> (PaletteCanvas, ApplySummary) {
    let mut canvas = PaletteCanvas::new();
    apply_canvas_settings(&mut canvas, &doc.palette_display);
    let summary = apply_layout(&mut canvas, doc, widget);
    (canvas, summary)
}

#[test]
fn test_layout_round_trips_through_json() {
    let (mut canvas, a, b) = sample_canvas();
    canvas.display_headers(false);

    let doc = capture_layout(&canvas);
    let json = serde_json::to_string_pretty(&doc).unwrap();
    let parsed: LayoutDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, doc);

    let (restored, summary) = reload(&parsed);
    assert_eq!(
        summary,
        ApplySummary {
            created: 2,
            updated: 0,
            placed: 2,
            stale: 0,
        }
    );

    let item_a = restored.item(&a).unwrap();
    assert_eq!(item_a.position(), Point::new(40.0, 80.0));
    assert_eq!(item_a.size(), Size::new(160.0, 80.0));
    assert_eq!(item_a.header().text(), "a.py");
    let info = item_a.display_info().unwrap();
    assert_eq!(info.label.as_deref(), Some("Alpha"));
    assert_eq!(info.color, Some(Rgb(200, 10, 10)));
    assert_eq!(info.icon_path.as_deref(), Some(MEL_ICON));

    let item_b = restored.item(&b).unwrap();
    assert_eq!(item_b.position(), Point::new(0.0, 0.0));
    assert_eq!(item_b.size(), Size::new(320.0, 160.0));
    assert!(!item_b.shows_header());
    assert!(!restored.shows_headers());
}

#[test]
fn test_capture_keys_by_path_and_id() {
    let (canvas, _, _) = sample_canvas();
    let doc = capture_layout(&canvas);

    let paths: Vec<&str> = doc.scripts_display.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/s/a.py", "/s/b.mel"]);
    let ids: Vec<&str> = doc.palette_layout.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["a.py", "b.mel"]);
    assert_eq!(
        doc.placement(&ItemId::new("b.mel")),
        Some(&PlacementInfo::new(
            Point::new(0.0, 0.0),
            Size::new(320.0, 160.0)
        ))
    );
}

#[test]
fn test_stale_placements_are_dropped() {
    let (canvas, _, _) = sample_canvas();
    let mut doc = capture_layout(&canvas);
    doc.palette_layout.insert(
        "ghost.py".to_string(),
        PlacementInfo::new(Point::new(500.0, 500.0), Size::new(20.0, 20.0)),
    );

    let (restored, summary) = reload(&doc);
    assert_eq!(summary.stale, 1);
    assert_eq!(summary.placed, 2);
    assert_eq!(restored.item_count(), 2);
    assert!(!restored.contains(&ItemId::new("ghost.py")));
}

#[test]
fn test_reapplying_updates_existing_items() {
    let (canvas, a, _) = sample_canvas();
    let doc = capture_layout(&canvas);
    let (mut restored, _) = reload(&doc);

    let mut edited = doc.clone();
    edited
        .scripts_display
        .insert("/s/a.py".to_string(), DisplayInfo::with_label("Renamed"));
    let summary = apply_layout(&mut restored, &edited, widget);

    assert_eq!(summary.created, 0);
    assert_eq!(summary.updated, 2);
    assert_eq!(restored.item_count(), 2);
    let info = restored.item(&a).unwrap().display_info().unwrap();
    assert_eq!(info.label.as_deref(), Some("Renamed"));
    assert_eq!(info.color, None);
    assert_eq!(restored.item(&a).unwrap().header().text(), "a.py");
}

#[test]
fn test_shared_basename_keeps_last_path() {
    let mut doc = LayoutDocument::default();
    doc.scripts_display
        .insert("/a/foo.py".to_string(), DisplayInfo::with_label("FromA"));
    doc.scripts_display
        .insert("/b/foo.py".to_string(), DisplayInfo::with_label("FromB"));

    let mut canvas = PaletteCanvas::new();
    let summary = apply_layout(&mut canvas, &doc, widget);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(canvas.item_count(), 1);

    let item = canvas.item(&ItemId::new("foo.py")).unwrap();
    assert_eq!(item.natural_key(), "/b/foo.py");
    assert_eq!(item.header().text(), "foo.py");

    let captured = capture_layout(&canvas);
    let paths: Vec<&str> = captured.scripts_display.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/b/foo.py"]);
    assert_eq!(
        captured.scripts_display["/b/foo.py"].label.as_deref(),
        Some("FromB")
    );
}

#[test]
fn test_saved_geometry_survives_grid_change() {
    let (canvas, a, _) = sample_canvas();
    let mut doc = capture_layout(&canvas);
    doc.palette_display.grid_size = 50;

    let (restored, _) = reload(&doc);
    assert_eq!(restored.grid_size(), 50);
    let item = restored.item(&a).unwrap();
    assert_eq!(item.position(), Point::new(40.0, 80.0));
    assert_eq!(item.size(), Size::new(160.0, 80.0));
    assert_eq!(item.handle().size(), 50.0);
}

#[test]
fn test_loading_marks_items_without_placement_at_cursor() {
    let mut doc = LayoutDocument::default();
    doc.scripts_display
        .insert("/s/new.py".to_string(), DisplayInfo::default());

    let mut canvas = PaletteCanvas::new();
    canvas.set_cursor_screen(Point::new(99.0, 21.0));
    let summary = apply_layout(&mut canvas, &doc, widget);

    assert_eq!(summary.created, 1);
    assert_eq!(summary.placed, 0);
    let item = canvas.item(&ItemId::new("new.py")).unwrap();
    assert_eq!(item.position(), Point::new(100.0, 20.0));
}

#[test]
fn test_canvas_settings_restore_view() {
    let mut canvas = PaletteCanvas::new();
    canvas.set_grid_size(25);
    canvas.set_grid_color(Some(Rgb(10, 20, 30)));
    canvas.wheel(Point::new(400.0, 300.0), 1.0, Modifiers::ctrl());

    let settings = capture_canvas_settings(&canvas);
    assert_eq!(
        settings.viewport_transform,
        Some([1.25, 0.0, 0.0, 0.0, 1.25, 0.0, -100.0, -75.0, 1.0])
    );

    let mut restored = PaletteCanvas::new();
    apply_canvas_settings(&mut restored, &settings);
    assert_eq!(restored.grid_size(), 25);
    assert_eq!(restored.grid_color(), Rgb(10, 20, 30));
    assert_eq!(restored.viewport().zoom(), 1.25);
    assert_eq!(restored.viewport().pan_x(), -100.0);
    assert_eq!(restored.viewport().pan_y(), -75.0);
}

#[test]
fn test_settings_without_transform_keep_view() {
    let mut canvas = PaletteCanvas::new();
    canvas.viewport_mut().set_pan(30.0, 40.0);
    apply_canvas_settings(&mut canvas, &CanvasSettings::default());

    assert_eq!(canvas.viewport().pan_x(), 30.0);
    assert_eq!(canvas.viewport().zoom(), 1.0);
    assert_eq!(canvas.grid_size(), 20);
}

#[test]
fn test_icon_file_override_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let icon = dir.path().join("custom.png");
    fs::write(&icon, b"png").unwrap();
    let icon_path = icon.to_string_lossy().to_string();

    let mut canvas = PaletteCanvas::new();
    let id = canvas.add_content(widget("/s/a.py")).unwrap();
    canvas.set_item_display(
        &id,
        &DisplayInfo {
            icon_path: Some(icon_path.clone()),
            ..DisplayInfo::default()
        },
    );

    let doc = capture_layout(&canvas);
    assert_eq!(
        doc.scripts_display["/s/a.py"].icon_path.as_deref(),
        Some(icon_path.as_str())
    );
}

#[test]
fn test_missing_icon_keeps_default() {
    let mut canvas = PaletteCanvas::new();
    let id = canvas.add_content(widget("/s/a.py")).unwrap();
    canvas.set_item_display(
        &id,
        &DisplayInfo {
            icon_path: Some("/nowhere/missing.png".to_string()),
            ..DisplayInfo::default()
        },
    );

    let info = canvas.item(&id).unwrap().display_info().unwrap();
    assert_eq!(info.icon_path, None);
}

#[derive(Debug)]
struct Note(String);

impl PaletteContent for Note {
    fn natural_key(&self) -> &str {
        &self.0
    }
}

#[test]
fn test_content_without_display_still_saves_geometry() {
    let mut canvas = PaletteCanvas::new();
    let id = canvas
        .add_content(Box::new(Note("/notes/todo.txt".to_string())))
        .unwrap();

    let doc = capture_layout(&canvas);
    assert!(doc.scripts_display.is_empty());
    assert!(doc.palette_layout.contains_key(id.as_str()));
    assert!(!canvas.set_item_display(&id, &DisplayInfo::with_label("x")));
}

fn display_info_strategy() -> impl Strategy<Value = DisplayInfo> {
    (
        "[A-Za-z][A-Za-z0-9 _]{0,11}",
        proptest::option::of(any::<(u8, u8, u8)>()),
        proptest::option::of(prop_oneof![Just(PYTHON_ICON), Just(MEL_ICON)]),
    )
        .prop_map(|(label, color, icon)| DisplayInfo {
            label: Some(label),
            color: color.map(|(r, g, b)| Rgb(r, g, b)),
            icon_path: icon.map(str::to_string),
        })
}

proptest! {
    #[test]
    fn prop_display_info_survives_save_and_load(info in display_info_strategy()) {
        let icons = Rc::new(IconRegistry::new("/icons"));
        let mut canvas = PaletteCanvas::new();
        let id = canvas
            .add_content(Box::new(ScriptWidget::with_display("/s/p.py", &info, Rc::clone(&icons))))
            .unwrap();

        let doc = capture_layout(&canvas);
        let (restored, _) = reload(&doc);
        prop_assert_eq!(restored.item(&id).unwrap().display_info(), Some(info));
    }
}
