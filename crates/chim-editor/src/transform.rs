//! Live drag, resize and rotate sessions and the transform bridge.
//!
//! A session copies the affected nodes at gesture start and keeps a *live*
//! copy that follows the pointer. The board itself is untouched until the
//! gesture ends. Then the `TransformBridge` turns the live copies into
//! normalized attribute write-backs:
//!
//! - drag-end writes back `x, y`;
//! - resize-end folds the live scale into `width, height`, clamps both to
//!   the minimum node size and resets scale to 1;
//! - rotate-end writes back `x, y, rotation`.

use crate::surface::BoardMutation;
use chim_core::{Board, Bounds, CanvasNode, NodeId};
use chim_render::hit::Anchor;

/// Rotate steps used while the snap modifier is held, in degrees.
const ROTATE_SNAP: f32 = 15.0;

fn snapshot(board: &Board, ids: &[NodeId]) -> Vec<CanvasNode> {
    ids.iter().filter_map(|id| board.get(*id).cloned()).collect()
}

/// A canvas-axis scale `(sx, sy)` measured along a node's own axes.
///
/// Exact for axis-aligned nodes, for nodes turned by a right angle (the
/// factors swap) and for uniform scales. Other angles get the stretch of
/// each local axis, which keeps the node a rectangle.
fn local_scale(rotation: f32, sx: f32, sy: f32) -> (f32, f32) {
    if rotation.rem_euclid(360.0) == 0.0 {
        return (sx, sy);
    }
    let (sin, cos) = rotation.to_radians().sin_cos();
    ((sx * cos).hypot(sy * sin), (sx * sin).hypot(sy * cos))
}

// ─── Drag ────────────────────────────────────────────────────────────────

/// Moves every selected node by the total pointer delta.
#[derive(Debug, Clone)]
pub struct DragSession {
    origin_x: f32,
    origin_y: f32,
    start: Vec<CanvasNode>,
    live: Vec<CanvasNode>,
}

impl DragSession {
    pub fn begin(board: &Board, ids: &[NodeId], x: f32, y: f32) -> Self {
        let start = snapshot(board, ids);
        Self {
            origin_x: x,
            origin_y: y,
            live: start.clone(),
            start,
        }
    }

    /// Follow the pointer. With `constrain_axis`, only the dominant axis moves.
    pub fn update(&mut self, x: f32, y: f32, constrain_axis: bool) {
        let mut dx = x - self.origin_x;
        let mut dy = y - self.origin_y;
        if constrain_axis {
            if dx.abs() > dy.abs() {
                dy = 0.0;
            } else {
                dx = 0.0;
            }
        }
        for (live, start) in self.live.iter_mut().zip(&self.start) {
            live.x = start.x + dx;
            live.y = start.y + dy;
        }
    }

    pub fn has_moved(&self) -> bool {
        self.live
            .iter()
            .zip(&self.start)
            .any(|(l, s)| l.x != s.x || l.y != s.y)
    }

    pub fn live_nodes(&self) -> &[CanvasNode] {
        &self.live
    }
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// Scales the selection through one transformer anchor.
///
/// The anchor opposite the dragged one stays fixed. Proposed frames smaller
/// than the minimum node size on either axis are rejected and the previous
/// frame is kept, so the frame never flips.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    anchor: Anchor,
    start_frame: Bounds,
    frame: Bounds,
    min_size: f32,
    start: Vec<CanvasNode>,
    live: Vec<CanvasNode>,
}

impl ResizeSession {
    /// Start resizing the given nodes. `None` if none of them exist.
    pub fn begin(board: &Board, ids: &[NodeId], anchor: Anchor, min_size: f32) -> Option<Self> {
        let start_frame = board.union_bounds(ids)?;
        let start = snapshot(board, ids);
        Some(Self {
            anchor,
            start_frame,
            frame: start_frame,
            min_size,
            live: start.clone(),
            start,
        })
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Current transformer frame.
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    /// Frame implied by dragging the anchor to `(px, py)`.
    fn propose(&self, px: f32, py: f32, keep_ratio: bool) -> Bounds {
        let f = self.start_frame;
        let (ux, uy) = self.anchor.fraction();

        let mut w = if ux == 1.0 {
            px - f.x
        } else if ux == 0.0 {
            f.right() - px
        } else {
            f.width
        };
        let mut h = if uy == 1.0 {
            py - f.y
        } else if uy == 0.0 {
            f.bottom() - py
        } else {
            f.height
        };

        let corner = self.anchor.resizes_x() && self.anchor.resizes_y();
        if keep_ratio && corner && f.width > 0.0 && f.height > 0.0 {
            let s = (w / f.width).max(h / f.height);
            w = f.width * s;
            h = f.height * s;
        }

        // The opposite edge stays put.
        let x = if ux == 0.0 { f.right() - w } else { f.x };
        let y = if uy == 0.0 { f.bottom() - h } else { f.y };
        Bounds::new(x, y, w, h)
    }

    /// Follow the pointer. Returns false if the proposed frame was rejected.
    pub fn update(&mut self, px: f32, py: f32, keep_ratio: bool) -> bool {
        let proposed = self.propose(px, py, keep_ratio);
        if !proposed.is_finite()
            || proposed.width < self.min_size
            || proposed.height < self.min_size
        {
            return false;
        }
        self.frame = proposed;

        let f = self.start_frame;
        let sx = if f.width > 0.0 { proposed.width / f.width } else { 1.0 };
        let sy = if f.height > 0.0 { proposed.height / f.height } else { 1.0 };

        // The node origin is a canvas point, so it maps through the frame
        // directly. The scale has to be expressed in the node's own axes.
        for (live, start) in self.live.iter_mut().zip(&self.start) {
            live.x = proposed.x + (start.x - f.x) * sx;
            live.y = proposed.y + (start.y - f.y) * sy;
            let (lx, ly) = local_scale(start.rotation, sx, sy);
            live.scale_x = start.scale_x * lx;
            live.scale_y = start.scale_y * ly;
        }
        true
    }

    pub fn has_changed(&self) -> bool {
        self.frame != self.start_frame
    }

    pub fn live_nodes(&self) -> &[CanvasNode] {
        &self.live
    }
}

// ─── Rotate ──────────────────────────────────────────────────────────────

fn pointer_angle(pivot: (f32, f32), px: f32, py: f32) -> f32 {
    (py - pivot.1).atan2(px - pivot.0).to_degrees()
}

/// Turns the selection around the center of its transformer frame.
///
/// Each node's origin orbits the pivot and its own rotation grows by the
/// same angle, so a group turns as one piece.
#[derive(Debug, Clone)]
pub struct RotateSession {
    pivot: (f32, f32),
    start_angle: f32,
    angle: f32,
    start: Vec<CanvasNode>,
    live: Vec<CanvasNode>,
}

impl RotateSession {
    /// Start rotating from a press at `(px, py)`. `None` if none of the
    /// nodes exist.
    pub fn begin(board: &Board, ids: &[NodeId], px: f32, py: f32) -> Option<Self> {
        let pivot = board.union_bounds(ids)?.center();
        let start = snapshot(board, ids);
        Some(Self {
            pivot,
            start_angle: pointer_angle(pivot, px, py),
            angle: 0.0,
            live: start.clone(),
            start,
        })
    }

    pub fn pivot(&self) -> (f32, f32) {
        self.pivot
    }

    /// Clockwise degrees turned since the press.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Follow the pointer. With `snap`, the angle moves in 15° steps.
    pub fn update(&mut self, px: f32, py: f32, snap: bool) {
        let mut angle = pointer_angle(self.pivot, px, py) - self.start_angle;
        if snap {
            angle = (angle / ROTATE_SNAP).round() * ROTATE_SNAP;
        }
        self.angle = angle;

        let (sin, cos) = angle.to_radians().sin_cos();
        let (cx, cy) = self.pivot;
        for (live, start) in self.live.iter_mut().zip(&self.start) {
            let dx = start.x - cx;
            let dy = start.y - cy;
            live.x = cx + dx * cos - dy * sin;
            live.y = cy + dx * sin + dy * cos;
            live.rotation = (start.rotation + angle).rem_euclid(360.0);
        }
    }

    pub fn has_changed(&self) -> bool {
        self.angle.rem_euclid(360.0) != 0.0
    }

    pub fn live_nodes(&self) -> &[CanvasNode] {
        &self.live
    }
}

// ─── Bridge ──────────────────────────────────────────────────────────────

/// Converts live node copies into normalized board write-backs.
#[derive(Debug, Clone, Copy)]
pub struct TransformBridge {
    pub min_size: f32,
}

impl TransformBridge {
    pub fn new(min_size: f32) -> Self {
        Self { min_size }
    }

    /// Write back the final position of every dragged node.
    pub fn drag_end(&self, live: &[CanvasNode]) -> Vec<BoardMutation> {
        live.iter()
            .map(|n| BoardMutation::SetPosition {
                id: n.id,
                x: n.x,
                y: n.y,
            })
            .collect()
    }

    /// Fold live scale into size, clamp to the minimum, reset scale to 1.
    pub fn resize_end(&self, live: &[CanvasNode]) -> Vec<BoardMutation> {
        live.iter().map(|n| self.normalize(n)).collect()
    }

    /// Write back the final placement and rotation of every turned node.
    pub fn rotate_end(&self, live: &[CanvasNode]) -> Vec<BoardMutation> {
        live.iter()
            .map(|n| BoardMutation::SetRotation {
                id: n.id,
                x: n.x,
                y: n.y,
                rotation: n.rotation,
            })
            .collect()
    }

    fn normalize(&self, node: &CanvasNode) -> BoardMutation {
        let (w, h) = node.scaled_size();
        let (x, y) = node.min_corner();
        BoardMutation::SetGeometry {
            id: node.id,
            x,
            y,
            width: w.abs().max(self.min_size),
            height: h.abs().max(self.min_size),
        }
    }
}
