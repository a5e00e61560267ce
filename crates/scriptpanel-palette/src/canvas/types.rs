use scriptpanel_core::{ItemId, Point, Rect, Size};

/// Pointer buttons the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    /// Ctrl or Shift extend the selection instead of replacing it.
    pub fn is_additive(&self) -> bool {
        self.ctrl || self.shift
    }
}

/// Pointer interaction in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging the view; `last_screen` is the previous pointer position.
    Panning { last_screen: Point },
    /// Rubber-band selection from `origin` to `current`, in scene coordinates.
    Selecting {
        origin: Point,
        current: Point,
        base: Vec<ItemId>,
    },
    /// Moving every selected item; positions are relative to where the drag began.
    DraggingItems {
        anchor: Point,
        start_positions: Vec<(ItemId, Point)>,
    },
    /// Resizing a single item from its handle.
    ResizingItem {
        id: ItemId,
        anchor: Point,
        start_size: Size,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Rubber band rectangle while selecting.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            InteractionState::Selecting {
                origin, current, ..
            } => Some(Rect::from_corners(*origin, *current)),
            _ => None,
        }
    }
}

/// Result of a pointer press the embedding view may need to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    None,
    /// A context menu should open; `item` is the item under the pointer, if any.
    ContextMenu { item: Option<ItemId> },
}

/// Observable changes on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    ItemAdded(ItemId),
    ItemsRemoved(Vec<ItemId>),
    ItemMoved(ItemId),
    ItemResized(ItemId),
    SelectionChanged(Vec<ItemId>),
    /// Grid size, grid color, header visibility, or item display changed.
    DisplayChanged,
    Cleared,
}

impl PaletteEvent {
    /// Whether the event changes what a layout save would write.
    pub fn modifies_layout(&self) -> bool {
        !matches!(self, PaletteEvent::SelectionChanged(_))
    }
}

/// Source of dropped scripts.
pub trait ScriptBrowser {
    /// Currently selected script paths, possibly empty.
    fn selected_script_paths(&self) -> Vec<String>;
}
