//! The editing surface: owns the board, the selection and the tools.
//!
//! Every pointer and key event from the host goes through
//! [`EditingSurface::handle_event`]. The active tool turns the event into
//! `BoardMutation`s, the surface applies them and then prunes the selection
//! so it never names a node that is gone.
//!
//! While a drag, resize or rotation is in progress the board is not touched.
//! Use [`EditingSurface::live_board`] to draw what the user currently sees.

use std::borrow::Cow;

use crate::input::{InputEvent, Modifiers};
use crate::rubber_band::SelectionBox;
use crate::selection::{Selection, SelectionController};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{SelectTool, TextTool, Tool, ToolContext, ToolKind};
use chim_core::{Board, BoardConfig, Bounds, CanvasNode, NodeId, Result};
use chim_render::hit::{Hit, pick};

/// A change to the board produced by a tool or a host command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    AddNode(Box<CanvasNode>),
    RemoveNode {
        id: NodeId,
    },
    /// Drag-end write-back.
    SetPosition {
        id: NodeId,
        x: f32,
        y: f32,
    },
    /// Resize-end write-back. Resets scale to 1.
    SetGeometry {
        id: NodeId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Rotate-end write-back.
    SetRotation {
        id: NodeId,
        x: f32,
        y: f32,
        rotation: f32,
    },
    BringToFront {
        id: NodeId,
    },
    SendToBack {
        id: NodeId,
    },
}

impl BoardMutation {
    pub fn target(&self) -> NodeId {
        match self {
            BoardMutation::AddNode(node) => node.id,
            BoardMutation::RemoveNode { id }
            | BoardMutation::SetPosition { id, .. }
            | BoardMutation::SetGeometry { id, .. }
            | BoardMutation::SetRotation { id, .. }
            | BoardMutation::BringToFront { id }
            | BoardMutation::SendToBack { id } => *id,
        }
    }
}

pub struct EditingSurface {
    board: Board,
    config: BoardConfig,
    selection: SelectionController,
    tool: ToolKind,
    select_tool: SelectTool,
    text_tool: TextTool,
}

impl EditingSurface {
    pub fn new(config: BoardConfig) -> Self {
        Self::with_board(Board::new(), config)
    }

    pub fn with_board(board: Board, config: BoardConfig) -> Self {
        Self {
            board,
            config,
            selection: SelectionController::new(),
            tool: ToolKind::Select,
            select_tool: SelectTool::new(),
            text_tool: TextTool::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn selected_ids(&self) -> &[NodeId] {
        self.selection.ids()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("surface: tool {} -> {}", self.tool.name(), tool.name());
        }
        self.select_tool.cancel();
        self.text_tool.cancel();
        self.tool = tool;
    }

    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    /// Replace the whole board. Selection and gesture state are reset.
    pub fn load_board(&mut self, board: Board) {
        log::info!("surface: loaded board with {} nodes", board.len());
        self.board = board;
        self.selection.clear();
        self.select_tool.cancel();
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_interacting(&self) -> bool {
        self.select_tool.is_active()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event. Returns false if the event was dropped or unbound.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Key { key, modifiers } = event {
            return self.handle_key(key, modifiers);
        }
        if let Some((x, y)) = event.position()
            && !(x.is_finite() && y.is_finite())
        {
            log::warn!("surface: dropped pointer event at non-finite ({x}, {y})");
            return false;
        }

        let hit = match event {
            InputEvent::PointerDown { x, y, .. } => self.pick(*x, *y),
            _ => None,
        };
        // A one-shot tool hands control back to Select once its press is done.
        // A tool switched to mid-press has not been used yet and stays.
        let one_shot_done = matches!(event, InputEvent::PointerUp { .. })
            && self.tool == ToolKind::Text
            && self.text_tool.has_placed();

        let mut ctx = ToolContext {
            board: &self.board,
            selection: &mut self.selection,
            config: &self.config,
            hit,
        };
        let mutations = match self.tool {
            ToolKind::Select => self.select_tool.handle(event, &mut ctx),
            ToolKind::Text => self.text_tool.handle(event, &mut ctx),
        };
        self.apply_mutations(mutations);

        if one_shot_done {
            self.set_tool(ToolKind::Select);
        }
        true
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers) -> bool {
        self.handle_event(&InputEvent::pointer_down(x, y, modifiers))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, modifiers: Modifiers) -> bool {
        self.handle_event(&InputEvent::pointer_move(x, y, modifiers))
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, modifiers: Modifiers) -> bool {
        self.handle_event(&InputEvent::pointer_up(x, y, modifiers))
    }

    /// What lies under `(x, y)`: a transformer anchor of the current
    /// selection, else the topmost node.
    pub fn pick(&self, x: f32, y: f32) -> Option<Hit> {
        let frame = self.selection.frame(&self.board);
        pick(&self.board, frame.as_ref(), self.config.handle_size, x, y)
    }

    /// Run a keyboard shortcut. Returns true if the key was bound.
    pub fn handle_key(&mut self, key: &str, modifiers: &Modifiers) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        log::debug!("surface: shortcut {key:?} -> {action:?}");
        match action {
            ShortcutAction::ToolSelect => self.set_tool(ToolKind::Select),
            ShortcutAction::ToolText => self.set_tool(ToolKind::Text),
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::SelectAll => self.select_all(),
            ShortcutAction::Deselect => {
                self.select_tool.cancel();
                self.clear_selection();
            }
            ShortcutAction::BringToFront => self.bring_selected_to_front(),
            ShortcutAction::SendToBack => self.send_selected_to_back(),
        }
        true
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation. Returns false, with a warning, if it was skipped.
    pub fn apply_mutation(&mut self, mutation: BoardMutation) -> bool {
        let target = mutation.target();
        let applied = match mutation {
            BoardMutation::AddNode(node) => match self.board.add_node(*node) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("surface: skipped add: {e}");
                    false
                }
            },
            BoardMutation::RemoveNode { id } => self.board.remove_node(id).is_ok(),
            BoardMutation::SetPosition { id, x, y } => {
                if !(x.is_finite() && y.is_finite()) {
                    log::warn!("surface: skipped non-finite position for {id}");
                    return false;
                }
                match self.board.get_mut(id) {
                    Some(node) => {
                        node.x = x;
                        node.y = y;
                        true
                    }
                    None => false,
                }
            }
            BoardMutation::SetGeometry {
                id,
                x,
                y,
                width,
                height,
            } => {
                let geometry = Bounds::new(x, y, width, height);
                if !geometry.is_finite() || width < 0.0 || height < 0.0 {
                    log::warn!("surface: skipped invalid geometry {geometry:?} for {id}");
                    return false;
                }
                match self.board.get_mut(id) {
                    Some(node) => {
                        node.x = x;
                        node.y = y;
                        node.width = width;
                        node.height = height;
                        node.scale_x = 1.0;
                        node.scale_y = 1.0;
                        true
                    }
                    None => false,
                }
            }
            BoardMutation::SetRotation { id, x, y, rotation } => {
                if !(x.is_finite() && y.is_finite() && rotation.is_finite()) {
                    log::warn!("surface: skipped non-finite rotation for {id}");
                    return false;
                }
                match self.board.get_mut(id) {
                    Some(node) => {
                        node.x = x;
                        node.y = y;
                        node.rotation = rotation.rem_euclid(360.0);
                        true
                    }
                    None => false,
                }
            }
            BoardMutation::BringToFront { id } => {
                self.board.bring_to_front(id);
                self.board.contains(id)
            }
            BoardMutation::SendToBack { id } => {
                self.board.send_to_back(id);
                self.board.contains(id)
            }
        };
        if !applied && !self.board.contains(target) {
            log::warn!("surface: skipped mutation for unknown node {target}");
        }
        applied
    }

    /// Apply a batch of mutations, then drop selected ids that no longer exist.
    /// Returns how many were applied.
    pub fn apply_mutations(
        &mut self,
        mutations: impl IntoIterator<Item = BoardMutation>,
    ) -> usize {
        let mut applied = 0;
        for mutation in mutations {
            if self.apply_mutation(mutation) {
                applied += 1;
            }
        }
        self.selection.prune(&self.board);
        applied
    }

    /// Add a node on top of the board.
    ///
    /// # Errors
    /// See [`Board::add_node`].
    pub fn add_node(&mut self, node: CanvasNode) -> Result<()> {
        self.board.add_node(node)
    }

    /// Remove a node and drop it from the selection.
    ///
    /// # Errors
    /// See [`Board::remove_node`].
    pub fn remove_node(&mut self, id: NodeId) -> Result<CanvasNode> {
        let removed = self.board.remove_node(id)?;
        self.selection.prune(&self.board);
        Ok(removed)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select exactly one existing node.
    ///
    /// # Errors
    /// [`chim_core::BoardError::UnknownNode`] if no such node exists.
    pub fn select_by_id(&mut self, id: NodeId) -> Result<()> {
        self.selection.select_existing(&self.board, id)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.board);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected node. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let doomed: Vec<BoardMutation> = self
            .selection
            .ids()
            .iter()
            .map(|id| BoardMutation::RemoveNode { id: *id })
            .collect();
        self.apply_mutations(doomed)
    }

    /// Raise the selection to the top, keeping its relative order.
    pub fn bring_selected_to_front(&mut self) {
        let mut ids: Vec<NodeId> = self.selection.ids().to_vec();
        self.sort_by_paint_order(&mut ids);
        let mutations: Vec<_> = ids
            .into_iter()
            .map(|id| BoardMutation::BringToFront { id })
            .collect();
        self.apply_mutations(mutations);
    }

    /// Lower the selection to the bottom, keeping its relative order.
    pub fn send_selected_to_back(&mut self) {
        let mut ids: Vec<NodeId> = self.selection.ids().to_vec();
        self.sort_by_paint_order(&mut ids);
        let mutations: Vec<_> = ids
            .into_iter()
            .rev()
            .map(|id| BoardMutation::SendToBack { id })
            .collect();
        self.apply_mutations(mutations);
    }

    fn sort_by_paint_order(&self, ids: &mut [NodeId]) {
        let order: Vec<NodeId> = self.board.ids().collect();
        ids.sort_by_key(|id| order.iter().position(|o| o == id));
    }

    // ─── View state ──────────────────────────────────────────────────────

    /// The board as the user currently sees it, with any live drag, resize
    /// or rotation applied. Borrows the board when nothing is in flight.
    pub fn live_board(&self) -> Cow<'_, Board> {
        let live = self.select_tool.live_nodes();
        if live.is_empty() {
            return Cow::Borrowed(&self.board);
        }
        let mut board = self.board.clone();
        for node in live {
            if let Some(slot) = board.get_mut(node.id) {
                *slot = node.clone();
            }
        }
        Cow::Owned(board)
    }

    /// Frame of the shared transformer, following any live gesture.
    /// `None` when nothing is selected.
    pub fn transformer_frame(&self) -> Option<Bounds> {
        if let Some(frame) = self.select_tool.resize_frame() {
            return Some(frame);
        }
        let live = self.select_tool.live_nodes();
        self.selection
            .ids()
            .iter()
            .filter_map(|id| match live.iter().find(|n| n.id == *id) {
                Some(node) => Some(node.bounds()),
                None => self.board.bounds_of(*id),
            })
            .reduce(|acc, b| acc.union(&b))
    }

    /// The rubber band, hidden unless a band drag is in progress.
    pub fn selection_box(&self) -> SelectionBox {
        self.select_tool.selection_box()
    }
}

impl Default for EditingSurface {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
