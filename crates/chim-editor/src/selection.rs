//! Selection controller.
//!
//! Tracks which node(s) are selected. The selection is normalized on every
//! change: no ids → `None`, one id → `Single`, more → `Group`. Ids are unique
//! and kept in the order they were selected.

use chim_core::{Board, BoardError, Bounds, NodeId, Result};
use smallvec::SmallVec;

/// The current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Single(NodeId),
    /// Two or more nodes sharing one transformer.
    Group(SmallVec<[NodeId; 4]>),
}

impl Selection {
    fn from_ids(ids: SmallVec<[NodeId; 4]>) -> Self {
        match ids.len() {
            0 => Selection::None,
            1 => Selection::Single(ids[0]),
            _ => Selection::Group(ids),
        }
    }

    pub fn ids(&self) -> &[NodeId] {
        match self {
            Selection::None => &[],
            Selection::Single(id) => std::slice::from_ref(id),
            Selection::Group(ids) => ids.as_slice(),
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Selection::Group(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn ids(&self) -> &[NodeId] {
        self.selection.ids()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selection.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }

    pub fn select_single(&mut self, id: NodeId) {
        self.selection = Selection::Single(id);
    }

    /// Replace the selection. Duplicates are dropped.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let mut unique: SmallVec<[NodeId; 4]> = SmallVec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.selection = Selection::from_ids(unique);
    }

    /// Add ids not already selected, after the existing ones.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let current: SmallVec<[NodeId; 4]> = self.ids().iter().copied().collect();
        self.set(current.into_iter().chain(ids));
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: NodeId) {
        let mut ids: SmallVec<[NodeId; 4]> = self.ids().iter().copied().collect();
        if let Some(pos) = ids.iter().position(|s| *s == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        self.selection = Selection::from_ids(ids);
    }

    /// Drop ids that no longer exist on the board.
    /// Returns true if anything was removed.
    pub fn prune(&mut self, board: &Board) -> bool {
        if self.ids().iter().all(|id| board.contains(*id)) {
            return false;
        }
        let kept: SmallVec<[NodeId; 4]> = self
            .ids()
            .iter()
            .copied()
            .filter(|id| board.contains(*id))
            .collect();
        log::debug!(
            "selection: pruned {} stale id(s)",
            self.selection.len() - kept.len()
        );
        self.selection = Selection::from_ids(kept);
        true
    }

    /// Select one existing node by id.
    ///
    /// # Errors
    /// [`BoardError::UnknownNode`] if the board has no such node; the
    /// selection is left unchanged.
    pub fn select_existing(&mut self, board: &Board, id: NodeId) -> Result<()> {
        if !board.contains(id) {
            return Err(BoardError::UnknownNode(id));
        }
        self.select_single(id);
        Ok(())
    }

    /// Select every node on the board, in paint order.
    pub fn select_all(&mut self, board: &Board) {
        self.set(board.ids());
    }

    /// Frame for the shared transformer: union bounds of the selection.
    pub fn frame(&self, board: &Board) -> Option<Bounds> {
        board.union_bounds(self.ids())
    }
}
