//! Board → Vello drawing commands.
//!
//! Paints nodes bottom to top, then the editing overlay on top: selection
//! outlines, the transformer with its anchors and rotate handle, and the
//! rubber band.

use crate::hit::{Anchor, rotate_handle_center};
use chim_core::{Board, Bounds, CanvasNode, NodeId, NodeKind};
use kurbo::{Affine, BezPath, Circle, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

const SELECTION_COLOR: Color = Color::from_rgb8(0x4F, 0xC3, 0xF7);
const HANDLE_FILL: Color = Color::from_rgb8(0xFF, 0xFF, 0xFF);
const IMAGE_BG: Color = Color::from_rgb8(0xE5, 0xE5, 0xEA);
const IMAGE_BORDER: Color = Color::from_rgb8(0x86, 0x86, 0x8B);
const TEXT_COLOR: Color = Color::from_rgb8(0x1C, 0x1C, 0x1E);
const BAND_FILL: Color = Color::from_rgba8(0x4F, 0xC3, 0xF7, 0x14);

/// Editing state drawn above the nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub selected: &'a [NodeId],
    pub transformer: Option<Bounds>,
    pub rubber_band: Option<Bounds>,
    pub handle_size: f32,
}

/// Paint the whole board to a Vello scene.
///
/// Call once per frame with a freshly-reset `Scene`.
pub fn paint_board(scene: &mut Scene, board: &Board, overlay: &Overlay<'_>) {
    for node in board.iter() {
        paint_node(scene, node);
    }

    for id in overlay.selected {
        if let Some(node) = board.get(*id) {
            stroke_node_outline(scene, node);
        }
    }

    if let Some(frame) = overlay.transformer {
        paint_transformer(scene, &frame, overlay.handle_size);
    }

    if let Some(band) = overlay.rubber_band {
        paint_rubber_band(scene, &band);
    }
}

/// Transform placing a node's local `(0,0)-(w,h)` box on the canvas.
fn node_transform(node: &CanvasNode) -> Affine {
    Affine::translate((node.x as f64, node.y as f64))
        * Affine::rotate((node.rotation as f64).to_radians())
}

/// Local box with any in-progress scale. `abs` keeps the extents, so a
/// negative scale lands on the far side of the origin.
fn local_rect(node: &CanvasNode) -> Rect {
    let (w, h) = node.scaled_size();
    Rect::new(0.0, 0.0, w as f64, h as f64).abs()
}

fn paint_node(scene: &mut Scene, node: &CanvasNode) {
    let xf = node_transform(node);
    let rect = local_rect(node);

    match &node.kind {
        NodeKind::Image { url } => {
            log::trace!("IMAGE {} {url} at ({}, {})", node.id, node.x, node.y);
            // Decoding is the host's job; draw a framed placeholder.
            scene.fill(Fill::NonZero, xf, IMAGE_BG, None, &rect);
            let mut cross = BezPath::new();
            cross.move_to((rect.x0, rect.y0));
            cross.line_to((rect.x1, rect.y1));
            cross.move_to((rect.x1, rect.y0));
            cross.line_to((rect.x0, rect.y1));
            scene.stroke(&Stroke::new(1.0), xf, IMAGE_BORDER, None, &cross);
            scene.stroke(&Stroke::new(1.0), xf, IMAGE_BORDER, None, &rect);
        }
        NodeKind::Text { text, font_size } => {
            log::trace!(
                "TEXT {} {text:?} {font_size}px at ({}, {})",
                node.id,
                node.x,
                node.y
            );
            // Glyph shaping needs a font context; mark the baseline only.
            let baseline = (*font_size as f64 * node.scale_y.abs() as f64).min(rect.height());
            let mut line = BezPath::new();
            line.move_to((rect.x0, baseline));
            line.line_to((rect.x1, baseline));
            scene.stroke(&Stroke::new(1.0), xf, TEXT_COLOR, None, &line);
        }
    }
}

fn stroke_node_outline(scene: &mut Scene, node: &CanvasNode) {
    let rect = local_rect(node).inflate(1.0, 1.0);
    scene.stroke(&Stroke::new(2.0), node_transform(node), SELECTION_COLOR, None, &rect);
}

fn to_rect(b: &Bounds) -> Rect {
    Rect::new(b.x as f64, b.y as f64, b.right() as f64, b.bottom() as f64)
}

fn paint_transformer(scene: &mut Scene, frame: &Bounds, handle_size: f32) {
    let outline = Stroke::new(1.0);
    scene.stroke(&outline, Affine::IDENTITY, SELECTION_COLOR, None, &to_rect(frame));

    let (rx, ry) = rotate_handle_center(frame);
    let mut stem = BezPath::new();
    stem.move_to((rx as f64, frame.y as f64));
    stem.line_to((rx as f64, ry as f64));
    scene.stroke(&outline, Affine::IDENTITY, SELECTION_COLOR, None, &stem);
    let knob = Circle::new((rx as f64, ry as f64), handle_size as f64 / 2.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, HANDLE_FILL, None, &knob);
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, SELECTION_COLOR, None, &knob);

    for anchor in Anchor::ALL {
        let handle = to_rect(&anchor.handle_rect(frame, handle_size));
        scene.fill(Fill::NonZero, Affine::IDENTITY, HANDLE_FILL, None, &handle);
        scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, SELECTION_COLOR, None, &handle);
    }
}

fn paint_rubber_band(scene: &mut Scene, band: &Bounds) {
    if band.width < 1.0 && band.height < 1.0 {
        return;
    }
    let rect = to_rect(band);
    scene.fill(Fill::NonZero, Affine::IDENTITY, BAND_FILL, None, &rect);
    let dashed = Stroke::new(1.0).with_dashes(0.0, [4.0, 4.0]);
    scene.stroke(&dashed, Affine::IDENTITY, SELECTION_COLOR, None, &rect);
}
