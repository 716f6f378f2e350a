//! Rubber-band (marquee) selection.
//!
//! A `RubberBand` lives from pointer-down on empty canvas until pointer-up.
//! While it is alive the `SelectionBox` is visible and spans the down-point
//! to the current pointer, normalized to its min corner.

use chim_core::{Board, Bounds, NodeId};
use chim_render::hit::hit_test_rect;

/// Transient drag rectangle. Never stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

impl SelectionBox {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct RubberBand {
    start_x: f32,
    start_y: f32,
    rect: Bounds,
    /// Shift held at pointer-down: add hits to the selection instead of replacing it.
    pub additive: bool,
}

impl RubberBand {
    pub fn begin(x: f32, y: f32, additive: bool) -> Self {
        Self {
            start_x: x,
            start_y: y,
            rect: Bounds::new(x, y, 0.0, 0.0),
            additive,
        }
    }

    /// Span the band from the down-point to `(x, y)`.
    pub fn update(&mut self, x: f32, y: f32) {
        self.rect = Bounds::from_corners(self.start_x, self.start_y, x, y);
    }

    pub fn rect(&self) -> Bounds {
        self.rect
    }

    pub fn selection_box(&self) -> SelectionBox {
        SelectionBox {
            x: self.rect.x,
            y: self.rect.y,
            width: self.rect.width,
            height: self.rect.height,
            visible: true,
        }
    }

    /// Whether the band grew past `threshold` on either axis.
    /// Anything smaller is a click, not a drag.
    pub fn is_drag(&self, threshold: f32) -> bool {
        self.rect.width > threshold || self.rect.height > threshold
    }

    /// Nodes the band selects on release: every node whose bounding box
    /// intersects it, in paint order. Empty for a click-sized band.
    pub fn finish(&self, board: &Board, threshold: f32) -> Vec<NodeId> {
        if !self.is_drag(threshold) {
            return Vec::new();
        }
        hit_test_rect(board, &self.rect)
    }
}
