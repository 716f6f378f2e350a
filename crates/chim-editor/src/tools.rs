//! Tool system for canvas interactions.
//!
//! Each tool translates input events into `BoardMutation`s that the
//! `EditingSurface` applies. Tools may also change the selection directly
//! through the `ToolContext`.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Select Tool |
//! |----------|-------------|
//! | **Shift** | Toggle on click, add on band, axis-lock drag, keep corner ratio, 15° rotation |

use crate::input::InputEvent;
use crate::rubber_band::{RubberBand, SelectionBox};
use crate::selection::SelectionController;
use crate::surface::BoardMutation;
use crate::transform::{DragSession, ResizeSession, RotateSession, TransformBridge};
use chim_core::{Board, BoardConfig, Bounds, CanvasNode, NodeId};
use chim_render::hit::Hit;

/// Average glyph advance relative to font size, for sizing new text boxes.
const TEXT_ADVANCE: f32 = 0.6;
const TEXT_LINE_HEIGHT: f32 = 1.25;

/// Initial box for a new text node with its top-left corner at `(x, y)`.
pub fn text_bounds(text: &str, font_size: f32, x: f32, y: f32) -> Bounds {
    let chars = text.chars().count().max(1) as f32;
    Bounds::new(x, y, chars * font_size * TEXT_ADVANCE, font_size * TEXT_LINE_HEIGHT)
}

/// The active tool determines how input events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Select,
    Text,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "select" => Some(ToolKind::Select),
            "text" => Some(ToolKind::Text),
            _ => None,
        }
    }
}

/// What a tool can see and touch while handling one event.
pub struct ToolContext<'a> {
    pub board: &'a Board,
    pub selection: &'a mut SelectionController,
    pub config: &'a BoardConfig,
    /// What the pointer is over (handles first, then nodes).
    pub hit: Option<Hit>,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> Vec<BoardMutation>;
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    RubberBand(RubberBand),
    Drag(DragSession),
    Resize(ResizeSession),
    Rotate(RotateSession),
}

/// Click-select, rubber-band select, drag, group resize and rotate.
#[derive(Debug, Default)]
pub struct SelectTool {
    gesture: Gesture,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress (button held).
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Live copies of nodes being dragged or resized.
    pub fn live_nodes(&self) -> &[CanvasNode] {
        match &self.gesture {
            Gesture::Drag(d) => d.live_nodes(),
            Gesture::Resize(r) => r.live_nodes(),
            Gesture::Rotate(r) => r.live_nodes(),
            Gesture::Idle | Gesture::RubberBand(_) => &[],
        }
    }

    /// Transformer frame while resizing.
    pub fn resize_frame(&self) -> Option<Bounds> {
        match &self.gesture {
            Gesture::Resize(r) => Some(r.frame()),
            _ => None,
        }
    }

    /// The rubber band, hidden unless a band drag is in progress.
    pub fn selection_box(&self) -> SelectionBox {
        match &self.gesture {
            Gesture::RubberBand(band) => band.selection_box(),
            _ => SelectionBox::default(),
        }
    }

    /// Abandon the current gesture without writing anything back.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.gesture = Gesture::Idle;
        was_active
    }

    fn pointer_down(&mut self, x: f32, y: f32, shift: bool, ctx: &mut ToolContext<'_>) {
        self.gesture = Gesture::Idle;
        match ctx.hit {
            Some(Hit::Rotate) if !ctx.selection.is_empty() => {
                if let Some(session) = RotateSession::begin(ctx.board, ctx.selection.ids(), x, y) {
                    log::debug!("select: rotate {:?}", ctx.selection.ids());
                    self.gesture = Gesture::Rotate(session);
                }
            }
            Some(Hit::Handle(anchor)) if !ctx.selection.is_empty() => {
                if let Some(session) = ResizeSession::begin(
                    ctx.board,
                    ctx.selection.ids(),
                    anchor,
                    ctx.config.min_node_size,
                ) {
                    log::debug!("select: resize via {anchor:?} on {:?}", ctx.selection.ids());
                    self.gesture = Gesture::Resize(session);
                }
            }
            Some(Hit::Node(id)) => {
                if shift {
                    ctx.selection.toggle(id);
                } else if !ctx.selection.contains(id) {
                    ctx.selection.select_single(id);
                }
                // Clicking an already-selected node keeps the group for dragging.
                if ctx.selection.contains(id) {
                    self.gesture =
                        Gesture::Drag(DragSession::begin(ctx.board, ctx.selection.ids(), x, y));
                }
            }
            _ => {
                if !shift {
                    ctx.selection.clear();
                }
                self.gesture = Gesture::RubberBand(RubberBand::begin(x, y, shift));
            }
        }
    }

    fn track(&mut self, x: f32, y: f32, shift: bool) {
        match &mut self.gesture {
            Gesture::RubberBand(band) => band.update(x, y),
            Gesture::Drag(drag) => drag.update(x, y, shift),
            Gesture::Resize(resize) => {
                if !resize.update(x, y, shift) {
                    log::trace!("select: rejected undersized frame at ({x}, {y})");
                }
            }
            Gesture::Rotate(rotate) => rotate.update(x, y, shift),
            Gesture::Idle => {}
        }
    }

    fn pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> Vec<BoardMutation> {
        let bridge = TransformBridge::new(ctx.config.min_node_size);
        match std::mem::take(&mut self.gesture) {
            Gesture::RubberBand(band) => {
                let hits = band.finish(ctx.board, ctx.config.rubber_band_threshold);
                log::debug!("select: rubber band {:?} hit {}", band.rect(), hits.len());
                if band.additive {
                    ctx.selection.extend(hits);
                } else {
                    ctx.selection.set(hits);
                }
                vec![]
            }
            Gesture::Drag(drag) if drag.has_moved() => bridge.drag_end(drag.live_nodes()),
            Gesture::Resize(resize) if resize.has_changed() => {
                bridge.resize_end(resize.live_nodes())
            }
            Gesture::Rotate(rotate) if rotate.has_changed() => {
                bridge.rotate_end(rotate.live_nodes())
            }
            _ => vec![],
        }
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> Vec<BoardMutation> {
        match event {
            InputEvent::PointerDown { x, y, modifiers } => {
                self.pointer_down(*x, *y, modifiers.shift, ctx);
                vec![]
            }
            InputEvent::PointerMove { x, y, modifiers } => {
                self.track(*x, *y, modifiers.shift);
                vec![]
            }
            InputEvent::PointerUp { x, y, modifiers } => {
                self.track(*x, *y, modifiers.shift);
                self.pointer_up(ctx)
            }
            InputEvent::Key { .. } => vec![],
        }
    }
}

// ─── Text Tool ───────────────────────────────────────────────────────────

/// Places a new text node where the pointer goes down.
#[derive(Debug, Default)]
pub struct TextTool {
    placed: bool,
}

impl TextTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a node was placed by the press that is still held.
    pub fn has_placed(&self) -> bool {
        self.placed
    }

    pub fn cancel(&mut self) {
        self.placed = false;
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> Vec<BoardMutation> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                if self.placed {
                    return vec![];
                }
                self.placed = true;

                let text = ctx.config.default_text.clone();
                let size = ctx.config.default_font_size;
                let bounds = text_bounds(&text, size, *x, *y);
                let id = NodeId::with_prefix("text");
                ctx.selection.select_single(id);
                vec![BoardMutation::AddNode(Box::new(CanvasNode::text(
                    id, text, size, bounds,
                )))]
            }
            InputEvent::PointerUp { .. } => {
                self.placed = false;
                vec![]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use chim_core::NodeKind;

    #[test]
    fn text_tool_places_once_per_press() {
        let board = Board::new();
        let config = BoardConfig::default();
        let mut selection = SelectionController::new();
        let mut tool = TextTool::new();

        let mut ctx = ToolContext {
            board: &board,
            selection: &mut selection,
            config: &config,
            hit: None,
        };
        let out = tool.handle(&InputEvent::pointer_down(10.0, 20.0, Modifiers::NONE), &mut ctx);
        assert_eq!(out.len(), 1);
        let BoardMutation::AddNode(node) = &out[0] else {
            panic!("expected AddNode");
        };
        assert_eq!((node.x, node.y), (10.0, 20.0));
        assert!(matches!(&node.kind, NodeKind::Text { text, .. } if text == "Text"));
        assert_eq!(ctx.selection.ids(), &[node.id]);

        let again = tool.handle(&InputEvent::pointer_down(50.0, 50.0, Modifiers::NONE), &mut ctx);
        assert!(again.is_empty());

        tool.handle(&InputEvent::pointer_up(50.0, 50.0, Modifiers::NONE), &mut ctx);
        assert!(!tool.has_placed());
        let after_release =
            tool.handle(&InputEvent::pointer_down(80.0, 80.0, Modifiers::NONE), &mut ctx);
        assert_eq!(after_release.len(), 1);
    }

    #[test]
    fn tool_names_roundtrip() {
        for kind in [ToolKind::Select, ToolKind::Text] {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("lasso"), None);
    }
}
