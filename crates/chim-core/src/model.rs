//! Board data model.
//!
//! The board is a flat, ordered map from `NodeId` to `CanvasNode`. Insertion
//! order is paint order: the last node is drawn on top and wins hit tests.
//! There is no hierarchy. Grouping only exists as a multi-node selection.

use crate::error::{BoardError, Result};
use crate::geometry::Bounds;
use crate::id::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Kind-specific node attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// A bitmap loaded from `url`, stretched to the node box.
    Image { url: String },

    /// A text label.
    Text {
        text: String,
        #[serde(rename = "fontSize")]
        font_size: f32,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Image { .. } => "image",
            NodeKind::Text { .. } => "text",
        }
    }
}

fn unit_scale() -> f32 {
    1.0
}

/// A single placed object on the board.
///
/// `scale_x` / `scale_y` are only different from 1.0 while a transform is in
/// progress. Committing the transform folds them into `width` / `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    pub id: NodeId,

    #[serde(flatten)]
    pub kind: NodeKind,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Clockwise rotation in degrees around `(x, y)`.
    #[serde(default)]
    pub rotation: f32,

    #[serde(default = "unit_scale")]
    pub scale_x: f32,
    #[serde(default = "unit_scale")]
    pub scale_y: f32,
}

impl CanvasNode {
    pub fn new(id: NodeId, kind: NodeKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn text(id: NodeId, text: impl Into<String>, font_size: f32, bounds: Bounds) -> Self {
        Self::new(
            id,
            NodeKind::Text {
                text: text.into(),
                font_size,
            },
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
        )
    }

    pub fn image(id: NodeId, url: impl Into<String>, bounds: Bounds) -> Self {
        Self::new(
            id,
            NodeKind::Image { url: url.into() },
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
        )
    }

    /// Rendered size, with any in-progress scale applied.
    pub fn scaled_size(&self) -> (f32, f32) {
        (self.width * self.scale_x, self.height * self.scale_y)
    }

    /// Canvas position of the drawn box's local min corner. Differs from
    /// `(x, y)` only when a negative scale flips the box back across its
    /// origin, in which case the offset follows the node's rotation.
    pub fn min_corner(&self) -> (f32, f32) {
        let (w, h) = self.scaled_size();
        let (ox, oy) = (w.min(0.0), h.min(0.0));
        if ox == 0.0 && oy == 0.0 {
            return (self.x, self.y);
        }
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        (self.x + ox * cos - oy * sin, self.y + ox * sin + oy * cos)
    }

    /// Axis-aligned bounding box as drawn (scale and rotation applied).
    pub fn bounds(&self) -> Bounds {
        let (w, h) = self.scaled_size();
        let (x, y) = self.min_corner();
        Bounds::of_rotated(x, y, w.abs(), h.abs(), self.rotation)
    }

    pub fn has_pending_scale(&self) -> bool {
        self.scale_x != 1.0 || self.scale_y != 1.0
    }

    fn validate(&self) -> Result<()> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.rotation.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite();
        if !finite {
            return Err(BoardError::InvalidGeometry {
                id: self.id,
                reason: "non-finite coordinate",
            });
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(BoardError::InvalidGeometry {
                id: self.id,
                reason: "negative size",
            });
        }
        Ok(())
    }
}

// ─── Board ───────────────────────────────────────────────────────────────

/// Ordered node store. Iteration order is paint order (bottom to top).
#[derive(Debug, Clone, Default)]
pub struct Board {
    nodes: IndexMap<NodeId, CanvasNode>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from nodes in paint order.
    ///
    /// # Errors
    /// Fails on the first duplicate id or invalid geometry.
    pub fn from_nodes(nodes: impl IntoIterator<Item = CanvasNode>) -> Result<Self> {
        let mut board = Self::new();
        for node in nodes {
            board.add_node(node)?;
        }
        Ok(board)
    }

    /// Place a node on top of every existing node.
    ///
    /// # Errors
    /// [`BoardError::DuplicateNode`] if the id is taken,
    /// [`BoardError::InvalidGeometry`] for NaN/infinite or negative sizes.
    pub fn add_node(&mut self, node: CanvasNode) -> Result<()> {
        node.validate()?;
        if self.nodes.contains_key(&node.id) {
            return Err(BoardError::DuplicateNode(node.id));
        }
        log::debug!("board: add {} {}", node.kind.name(), node.id);
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Remove a node, keeping the paint order of the rest.
    ///
    /// # Errors
    /// [`BoardError::UnknownNode`] if no such node exists.
    pub fn remove_node(&mut self, id: NodeId) -> Result<CanvasNode> {
        let removed = self
            .nodes
            .shift_remove(&id)
            .ok_or(BoardError::UnknownNode(id))?;
        log::debug!("board: remove {id}");
        Ok(removed)
    }

    pub fn get(&self, id: NodeId) -> Option<&CanvasNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CanvasNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CanvasNode> {
        self.nodes.values()
    }

    /// Ids bottom to top.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn bounds_of(&self, id: NodeId) -> Option<Bounds> {
        self.get(id).map(CanvasNode::bounds)
    }

    /// Union of the bounds of every listed node that exists.
    /// `None` if none of them exist.
    pub fn union_bounds(&self, ids: &[NodeId]) -> Option<Bounds> {
        ids.iter()
            .filter_map(|id| self.bounds_of(*id))
            .reduce(|acc, b| acc.union(&b))
    }

    /// Move a node to the top of the paint order.
    /// Returns true if the order changed.
    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        let Some(pos) = self.nodes.get_index_of(&id) else {
            return false;
        };
        let last = self.nodes.len() - 1;
        if pos == last {
            return false;
        }
        self.nodes.move_index(pos, last);
        true
    }

    /// Move a node to the bottom of the paint order.
    /// Returns true if the order changed.
    pub fn send_to_back(&mut self, id: NodeId) -> bool {
        match self.nodes.get_index_of(&id) {
            Some(0) | None => false,
            Some(pos) => {
                self.nodes.move_index(pos, 0);
                true
            }
        }
    }

    /// All nodes in paint order, for handing to a UI.
    pub fn snapshot(&self) -> Vec<CanvasNode> {
        self.nodes.values().cloned().collect()
    }
}
