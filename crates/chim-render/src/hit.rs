//! Hit testing: point → node, rectangle → nodes, point → transformer handle.
//!
//! Walks the board top-most first (reverse paint order) so that the node the
//! user sees on top is the one that gets picked.

use chim_core::{Board, Bounds, CanvasNode, NodeId};

/// One of the eight resize handles around a transformer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleRight,
    BottomRight,
    BottomCenter,
    BottomLeft,
    MiddleLeft,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleRight,
        Anchor::BottomRight,
        Anchor::BottomCenter,
        Anchor::BottomLeft,
        Anchor::MiddleLeft,
    ];

    /// Fractional position on the frame: (0,0) top-left, (1,1) bottom-right.
    pub fn fraction(self) -> (f32, f32) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopCenter => (0.5, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::MiddleRight => (1.0, 0.5),
            Anchor::BottomRight => (1.0, 1.0),
            Anchor::BottomCenter => (0.5, 1.0),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::MiddleLeft => (0.0, 0.5),
        }
    }

    /// Handle center on the given frame.
    pub fn position(self, frame: &Bounds) -> (f32, f32) {
        let (ux, uy) = self.fraction();
        (frame.x + frame.width * ux, frame.y + frame.height * uy)
    }

    /// The anchor that stays fixed while this one is dragged.
    pub fn opposite(self) -> Anchor {
        match self {
            Anchor::TopLeft => Anchor::BottomRight,
            Anchor::TopCenter => Anchor::BottomCenter,
            Anchor::TopRight => Anchor::BottomLeft,
            Anchor::MiddleRight => Anchor::MiddleLeft,
            Anchor::BottomRight => Anchor::TopLeft,
            Anchor::BottomCenter => Anchor::TopCenter,
            Anchor::BottomLeft => Anchor::TopRight,
            Anchor::MiddleLeft => Anchor::MiddleRight,
        }
    }

    /// Whether dragging this anchor changes the frame width.
    pub fn resizes_x(self) -> bool {
        !matches!(self, Anchor::TopCenter | Anchor::BottomCenter)
    }

    /// Whether dragging this anchor changes the frame height.
    pub fn resizes_y(self) -> bool {
        !matches!(self, Anchor::MiddleLeft | Anchor::MiddleRight)
    }

    /// Square hit/draw area for this handle.
    pub fn handle_rect(self, frame: &Bounds, handle_size: f32) -> Bounds {
        let (cx, cy) = self.position(frame);
        let half = handle_size / 2.0;
        Bounds::new(cx - half, cy - half, handle_size, handle_size)
    }
}

/// Gap between the top edge of the transformer frame and the rotate handle.
pub const ROTATE_HANDLE_GAP: f32 = 24.0;

/// Center of the rotate handle, above the middle of the frame's top edge.
pub fn rotate_handle_center(frame: &Bounds) -> (f32, f32) {
    (frame.x + frame.width / 2.0, frame.y - ROTATE_HANDLE_GAP)
}

pub fn rotate_handle_rect(frame: &Bounds, handle_size: f32) -> Bounds {
    let (cx, cy) = rotate_handle_center(frame);
    let half = handle_size / 2.0;
    Bounds::new(cx - half, cy - half, handle_size, handle_size)
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The rotate handle above the transformer frame.
    Rotate,
    Handle(Anchor),
    Node(NodeId),
}

/// Exact containment test, honoring rotation and in-progress scale.
pub fn node_contains(node: &CanvasNode, px: f32, py: f32) -> bool {
    if node.rotation == 0.0 {
        return node.bounds().contains(px, py);
    }
    // Bring the point into the node's unrotated local frame.
    let (sin, cos) = (-node.rotation).to_radians().sin_cos();
    let dx = px - node.x;
    let dy = py - node.y;
    let lx = dx * cos - dy * sin;
    let ly = dx * sin + dy * cos;
    let (w, h) = node.scaled_size();
    Bounds::from_corners(0.0, 0.0, w, h).contains(lx, ly)
}

/// Find the topmost node at `(px, py)`. `None` means empty canvas.
pub fn hit_test(board: &Board, px: f32, py: f32) -> Option<NodeId> {
    board
        .iter()
        .rev()
        .find(|node| node_contains(node, px, py))
        .map(|node| node.id)
}

/// All nodes whose bounding box intersects `rect`, in paint order.
/// Used for rubber-band selection.
pub fn hit_test_rect(board: &Board, rect: &Bounds) -> Vec<NodeId> {
    board
        .iter()
        .filter(|node| node.bounds().intersects(rect))
        .map(|node| node.id)
        .collect()
}

/// Find the transformer anchor under `(px, py)`, if any.
pub fn hit_test_handle(frame: &Bounds, handle_size: f32, px: f32, py: f32) -> Option<Anchor> {
    Anchor::ALL
        .into_iter()
        .find(|a| a.handle_rect(frame, handle_size).contains(px, py))
}

/// Full pointer pick: the rotate handle, then the resize anchors, then nodes.
pub fn pick(
    board: &Board,
    transformer: Option<&Bounds>,
    handle_size: f32,
    px: f32,
    py: f32,
) -> Option<Hit> {
    if let Some(frame) = transformer {
        if rotate_handle_rect(frame, handle_size).contains(px, py) {
            return Some(Hit::Rotate);
        }
        if let Some(anchor) = hit_test_handle(frame, handle_size, px, py) {
            return Some(Hit::Handle(anchor));
        }
    }
    hit_test(board, px, py).map(Hit::Node)
}
