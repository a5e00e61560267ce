use std::cell::RefCell;
use std::rc::Rc;

use scriptpanel_core::{ItemId, Point, Size};
use scriptpanel_palette::{
    InteractionState, Modifiers, PaletteCanvas, PaletteEvent, PointerButton, PointerOutcome,
    ScriptBrowser,
};

use crate::common::{place, widget};

struct FakeBrowser(Vec<String>);

impl ScriptBrowser for FakeBrowser {
    fn selected_script_paths(&self) -> Vec<String> {
        self.0.clone()
    }
}

fn two_items(canvas: &mut PaletteCanvas) -> (ItemId, ItemId) {
    let a = place(
        canvas,
        "/s/a.py",
        Point::new(0.0, 0.0),
        Size::new(160.0, 80.0),
    );
    let b = place(
        canvas,
        "/s/b.py",
        Point::new(200.0, 0.0),
        Size::new(160.0, 80.0),
    );
    (a, b)
}

#[test]
fn test_add_content_snaps_to_cursor() {
    let mut canvas = PaletteCanvas::new();
    canvas.set_cursor_screen(Point::new(33.0, 47.0));
    let id = canvas.add_content(widget("/s/a.py")).unwrap();

    assert_eq!(id.as_str(), "a.py");
    let item = canvas.item(&id).unwrap();
    assert_eq!(item.position(), Point::new(40.0, 40.0));
    assert_eq!(item.size(), Size::new(160.0, 80.0));
}

#[test]
fn test_duplicate_id_rejected() {
    let mut canvas = PaletteCanvas::new();
    canvas.add_content(widget("/s/a.py")).unwrap();
    assert!(canvas.add_content(widget("/other/a.py")).is_err());
    assert_eq!(canvas.item_count(), 1);
}

#[test]
fn test_drop_uses_first_browser_selection() {
    let mut canvas = PaletteCanvas::new();

    let empty = FakeBrowser(Vec::new());
    assert_eq!(canvas.handle_drop(&empty, widget).unwrap(), None);
    assert_eq!(canvas.item_count(), 0);

    canvas.set_cursor_screen(Point::new(61.0, 19.0));
    let browser = FakeBrowser(vec!["/s/a.py".to_string(), "/s/b.py".to_string()]);
    let id = canvas.handle_drop(&browser, widget).unwrap().unwrap();
    assert_eq!(id.as_str(), "a.py");
    assert_eq!(canvas.item_count(), 1);
    assert_eq!(canvas.item(&id).unwrap().position(), Point::new(60.0, 20.0));
}

#[test]
fn test_drop_of_existing_script_selects_it() {
    let mut canvas = PaletteCanvas::new();
    let browser = FakeBrowser(vec!["/s/a.py".to_string()]);
    let first = canvas.handle_drop(&browser, widget).unwrap().unwrap();
    let again = canvas.handle_drop(&browser, widget).unwrap().unwrap();

    assert_eq!(first, again);
    assert_eq!(canvas.item_count(), 1);
    assert_eq!(canvas.selected_ids(), vec![first]);
}

#[test]
fn test_drag_moves_every_selected_item() {
    let mut canvas = PaletteCanvas::new();
    let (a, b) = two_items(&mut canvas);
    canvas.select_all();

    canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::NONE);
    assert!(matches!(
        canvas.interaction(),
        InteractionState::DraggingItems { .. }
    ));
    canvas.pointer_move(Point::new(53.0, 30.0));
    canvas.pointer_release(Point::new(53.0, 30.0));

    assert!(canvas.interaction().is_idle());
    assert_eq!(canvas.item(&a).unwrap().position(), Point::new(40.0, 0.0));
    assert_eq!(canvas.item(&b).unwrap().position(), Point::new(240.0, 0.0));
}

#[test]
fn test_press_on_unselected_item_replaces_selection() {
    let mut canvas = PaletteCanvas::new();
    let (a, b) = two_items(&mut canvas);
    canvas.select_only(&b);

    canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::NONE);
    canvas.pointer_release(Point::new(10.0, 30.0));

    assert_eq!(canvas.selected_ids(), vec![a]);
}

#[test]
fn test_handle_resizes_item() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);

    canvas.pointer_press(Point::new(158.0, 78.0), PointerButton::Left, Modifiers::NONE);
    assert!(matches!(
        canvas.interaction(),
        InteractionState::ResizingItem { .. }
    ));
    canvas.pointer_move(Point::new(198.0, 118.0));
    canvas.pointer_release(Point::new(198.0, 118.0));

    let item = canvas.item(&a).unwrap();
    assert_eq!(item.size(), Size::new(200.0, 120.0));
    assert_eq!(item.position(), Point::new(0.0, 0.0));
}

#[test]
fn test_resize_never_collapses_below_one_cell() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);

    canvas.pointer_press(Point::new(158.0, 78.0), PointerButton::Left, Modifiers::NONE);
    canvas.pointer_release(Point::new(-300.0, -300.0));

    assert_eq!(canvas.item(&a).unwrap().size(), Size::new(20.0, 20.0));
}

#[test]
fn test_ctrl_on_handle_moves_instead_of_resizing() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);

    canvas.pointer_press(Point::new(158.0, 78.0), PointerButton::Left, Modifiers::ctrl());
    canvas.pointer_move(Point::new(198.0, 118.0));
    canvas.pointer_release(Point::new(198.0, 118.0));

    let item = canvas.item(&a).unwrap();
    assert_eq!(item.position(), Point::new(40.0, 40.0));
    assert_eq!(item.size(), Size::new(160.0, 80.0));
}

#[test]
fn test_rubber_band_selects_intersecting_items() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);

    canvas.pointer_press(Point::new(190.0, 100.0), PointerButton::Left, Modifiers::NONE);
    canvas.pointer_move(Point::new(150.0, 60.0));
    assert_eq!(
        canvas.interaction().selection_rect().map(|r| (r.width, r.height)),
        Some((40.0, 40.0))
    );
    canvas.pointer_release(Point::new(150.0, 60.0));

    assert_eq!(canvas.selected_ids(), vec![a]);
    assert!(canvas.interaction().is_idle());
}

#[test]
fn test_additive_rubber_band_keeps_selection() {
    let mut canvas = PaletteCanvas::new();
    let (_, b) = two_items(&mut canvas);
    canvas.select_only(&b);

    canvas.pointer_press(
        Point::new(190.0, 100.0),
        PointerButton::Left,
        Modifiers::shift(),
    );
    canvas.pointer_release(Point::new(150.0, 60.0));

    assert_eq!(canvas.selected_count(), 2);
}

#[test]
fn test_ctrl_click_toggles_without_dragging_deselected() {
    let mut canvas = PaletteCanvas::new();
    let (a, b) = two_items(&mut canvas);
    canvas.select_all();

    canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::ctrl());
    assert!(canvas.interaction().is_idle());
    canvas.pointer_release(Point::new(50.0, 30.0));

    assert_eq!(canvas.selected_ids(), vec![b]);
    assert_eq!(canvas.item(&a).unwrap().position(), Point::new(0.0, 0.0));
}

#[test]
fn test_middle_button_pans() {
    let mut canvas = PaletteCanvas::new();
    canvas.pointer_press(Point::new(100.0, 100.0), PointerButton::Middle, Modifiers::NONE);
    canvas.pointer_move(Point::new(150.0, 120.0));
    canvas.pointer_release(Point::new(150.0, 120.0));

    assert_eq!(canvas.viewport().pan_x(), 50.0);
    assert_eq!(canvas.viewport().pan_y(), 20.0);
}

#[test]
fn test_space_turns_left_button_into_pan() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);
    canvas.set_space_held(true);

    canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::NONE);
    canvas.pointer_release(Point::new(20.0, 20.0));

    assert_eq!(canvas.viewport().pan_x(), 10.0);
    assert_eq!(canvas.viewport().pan_y(), -10.0);
    assert_eq!(canvas.item(&a).unwrap().position(), Point::new(0.0, 0.0));
}

#[test]
fn test_right_press_opens_context_menu() {
    let mut canvas = PaletteCanvas::new();
    let (a, b) = two_items(&mut canvas);
    canvas.select_only(&b);

    let outcome =
        canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Right, Modifiers::NONE);
    assert_eq!(
        outcome,
        PointerOutcome::ContextMenu {
            item: Some(a.clone())
        }
    );
    assert_eq!(canvas.selected_ids(), vec![a.clone()]);

    let outcome =
        canvas.pointer_press(Point::new(500.0, 500.0), PointerButton::Right, Modifiers::NONE);
    assert_eq!(outcome, PointerOutcome::ContextMenu { item: None });
    assert_eq!(canvas.selected_ids(), vec![a]);
}

#[test]
fn test_press_ignored_during_interaction() {
    let mut canvas = PaletteCanvas::new();
    two_items(&mut canvas);

    canvas.pointer_press(Point::new(400.0, 400.0), PointerButton::Middle, Modifiers::NONE);
    let outcome =
        canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::NONE);

    assert_eq!(outcome, PointerOutcome::None);
    assert!(matches!(
        canvas.interaction(),
        InteractionState::Panning { .. }
    ));
    assert_eq!(canvas.selected_count(), 0);
}

#[test]
fn test_ctrl_wheel_zooms_about_pointer() {
    let mut canvas = PaletteCanvas::new();
    let anchor = Point::new(400.0, 300.0);
    canvas.wheel(anchor, 1.0, Modifiers::ctrl());

    assert_eq!(canvas.viewport().zoom(), 1.25);
    assert_eq!(canvas.viewport().scene_to_screen(anchor), anchor);

    canvas.wheel(anchor, 30.0, Modifiers::ctrl());
    assert_eq!(canvas.viewport().zoom(), 10.0);
    canvas.wheel(anchor, -60.0, Modifiers::ctrl());
    assert_eq!(canvas.viewport().zoom(), 0.1);
}

#[test]
fn test_plain_wheel_scrolls() {
    let mut canvas = PaletteCanvas::new();
    canvas.wheel(Point::new(0.0, 0.0), 1.0, Modifiers::NONE);
    assert_eq!(canvas.viewport().pan_y(), 40.0);

    canvas.wheel(Point::new(0.0, 0.0), -2.0, Modifiers::shift());
    assert_eq!(canvas.viewport().pan_x(), -80.0);
    assert_eq!(canvas.viewport().zoom(), 1.0);
}

#[test]
fn test_cancel_keeps_applied_moves() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);
    canvas.set_space_held(true);
    canvas.set_space_held(false);

    canvas.pointer_press(Point::new(10.0, 30.0), PointerButton::Left, Modifiers::NONE);
    canvas.pointer_move(Point::new(50.0, 70.0));
    canvas.cancel_interaction();

    assert!(canvas.interaction().is_idle());
    assert_eq!(canvas.item(&a).unwrap().position(), Point::new(40.0, 40.0));
}

#[test]
fn test_grid_change_does_not_move_items() {
    let mut canvas = PaletteCanvas::new();
    let id = place(
        &mut canvas,
        "/s/a.py",
        Point::new(40.0, 80.0),
        Size::new(160.0, 80.0),
    );
    canvas.set_grid_size(50);

    let item = canvas.item(&id).unwrap();
    assert_eq!(item.position(), Point::new(40.0, 80.0));
    assert_eq!(item.size(), Size::new(160.0, 80.0));
    assert_eq!(item.handle().size(), 50.0);

    canvas.set_grid_size(0);
    assert_eq!(canvas.grid_size(), 1);
    canvas.reset_grid_display();
    assert_eq!(canvas.grid_size(), 20);
}

#[test]
fn test_remove_selected_and_clear() {
    let mut canvas = PaletteCanvas::new();
    let (a, b) = two_items(&mut canvas);
    canvas.select_only(&a);

    assert_eq!(canvas.remove_selected_items(), vec![a.clone()]);
    assert!(!canvas.contains(&a));
    assert!(canvas.primary_selection().is_none());
    assert!(canvas.remove_selected_items().is_empty());

    canvas.clear();
    assert_eq!(canvas.item_count(), 0);
    assert!(!canvas.contains(&b));
}

#[test]
fn test_header_visibility_propagates() {
    let mut canvas = PaletteCanvas::new();
    let (a, _) = two_items(&mut canvas);
    canvas.display_headers(false);
    assert!(!canvas.item(&a).unwrap().shows_header());

    canvas.set_cursor_screen(Point::new(0.0, 200.0));
    let c = canvas.add_content(widget("/s/c.py")).unwrap();
    assert!(!canvas.item(&c).unwrap().shows_header());
}

#[test]
fn test_visible_grid_lines_cover_view() {
    let canvas = PaletteCanvas::new();
    assert_eq!(canvas.visible_grid_lines().len(), 41 + 31);
}

#[test]
fn test_modified_flag_ignores_selection_and_view() {
    let mut canvas = PaletteCanvas::new();
    assert!(!canvas.is_modified());

    let (a, _) = two_items(&mut canvas);
    assert!(canvas.is_modified());
    canvas.mark_saved();

    canvas.select_all();
    canvas.wheel(Point::new(0.0, 0.0), 1.0, Modifiers::ctrl());
    assert!(!canvas.is_modified());

    canvas.move_item(&a, Point::new(0.0, 100.0));
    assert!(canvas.is_modified());
}

#[test]
fn test_listeners_receive_events() {
    let mut canvas = PaletteCanvas::new();
    let seen: Rc<RefCell<Vec<PaletteEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    canvas.on_event(move |event| sink.borrow_mut().push(event.clone()));

    let id = canvas.add_content(widget("/s/a.py")).unwrap();
    canvas.select_only(&id);
    canvas.clear();

    let events = seen.borrow();
    assert_eq!(
        *events,
        vec![
            PaletteEvent::ItemAdded(id.clone()),
            PaletteEvent::SelectionChanged(vec![id]),
            PaletteEvent::Cleared,
        ]
    );
}
