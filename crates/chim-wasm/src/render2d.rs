//! Canvas2D renderer.
//!
//! Draws the board to an HTML `<canvas>` via `CanvasRenderingContext2d`:
//! nodes bottom to top, then selection outlines, the shared transformer
//! with its rotate handle, and the rubber band.

use chim_core::{Board, Bounds, CanvasNode, NodeKind};
use chim_render::hit::{Anchor, rotate_handle_center};
use chim_render::paint::Overlay;
use std::collections::HashMap;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

const BACKGROUND: &str = "#F5F5F7";
const GRID: &str = "rgba(0, 0, 0, 0.05)";
const SELECTION: &str = "#4FC3F7";
const TEXT: &str = "#1C1C1E";
const PLACEHOLDER_BORDER: &str = "#86868B";
const PLACEHOLDER_BG: &str = "rgba(142, 142, 147, 0.06)";
const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// `HtmlImageElement`s keyed by URL. An element is created on first use and
/// drawn once the browser reports it loaded.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn ready(&mut self, url: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(url) {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::warn!("render2d: cannot create image for {url}: {e:?}");
                    return None;
                }
            };
            img.set_src(url);
            log::debug!("render2d: loading {url}");
            self.images.insert(url.to_string(), img);
        }
        self.images
            .get(url)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// Render the board and its editing overlay.
pub fn render_board(
    ctx: &CanvasRenderingContext2d,
    board: &Board,
    overlay: &Overlay<'_>,
    images: &mut ImageCache,
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);
    draw_grid(ctx, canvas_width, canvas_height);

    for node in board.iter() {
        ctx.save();
        place_node(ctx, node);
        match &node.kind {
            NodeKind::Image { url } => draw_image(ctx, node, url, images),
            NodeKind::Text { text, font_size } => draw_text(ctx, node, text, *font_size),
        }
        ctx.restore();
    }

    for id in overlay.selected {
        if let Some(node) = board.get(*id) {
            draw_selection_outline(ctx, node);
        }
    }

    if let Some(frame) = overlay.transformer {
        draw_transformer(ctx, &frame, overlay.handle_size as f64);
    }

    if let Some(band) = overlay.rubber_band {
        draw_rubber_band(ctx, &band);
    }
}

/// Move the origin to the node and apply its rotation.
fn place_node(ctx: &CanvasRenderingContext2d, node: &CanvasNode) {
    let _ = ctx.translate(node.x as f64, node.y as f64);
    if node.rotation != 0.0 {
        let _ = ctx.rotate((node.rotation as f64).to_radians());
    }
}

/// Local box after live scale, normalized to positive size.
fn local_box(node: &CanvasNode) -> (f64, f64, f64, f64) {
    let (w, h) = node.scaled_size();
    let (w, h) = (w as f64, h as f64);
    (w.min(0.0), h.min(0.0), w.abs(), h.abs())
}

fn draw_image(
    ctx: &CanvasRenderingContext2d,
    node: &CanvasNode,
    url: &str,
    images: &mut ImageCache,
) {
    let (x, y, w, h) = local_box(node);
    if let Some(img) = images.ready(url) {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
        return;
    }

    // Not loaded yet: dashed placeholder
    ctx.set_fill_style_str(PLACEHOLDER_BG);
    ctx.fill_rect(x, y, w, h);
    ctx.set_stroke_style_str(PLACEHOLDER_BORDER);
    ctx.set_line_width(1.0);
    set_dashed(ctx);
    ctx.stroke_rect(x, y, w, h);
}

fn draw_text(ctx: &CanvasRenderingContext2d, node: &CanvasNode, text: &str, font_size: f32) {
    // Live resize stretches the glyphs; the stored font size never changes.
    let _ = ctx.scale(node.scale_x.abs() as f64, node.scale_y.abs() as f64);
    ctx.set_font(&format!("{font_size}px {FONT_FAMILY}"));
    ctx.set_fill_style_str(TEXT);
    ctx.set_text_baseline("top");
    let _ = ctx.fill_text(text, 0.0, 2.0);
}

fn draw_selection_outline(ctx: &CanvasRenderingContext2d, node: &CanvasNode) {
    let (x, y, w, h) = local_box(node);
    ctx.save();
    place_node(ctx, node);
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(x - 1.0, y - 1.0, w + 2.0, h + 2.0);
    ctx.restore();
}

fn draw_transformer(ctx: &CanvasRenderingContext2d, frame: &Bounds, handle_size: f64) {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(
        frame.x as f64,
        frame.y as f64,
        frame.width as f64,
        frame.height as f64,
    );

    let (rx, ry) = rotate_handle_center(frame);
    let (rx, ry) = (rx as f64, ry as f64);
    ctx.begin_path();
    ctx.move_to(rx, frame.y as f64);
    ctx.line_to(rx, ry);
    ctx.stroke();

    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_line_width(1.5);
    ctx.begin_path();
    let _ = ctx.arc(rx, ry, handle_size / 2.0, 0.0, std::f64::consts::TAU);
    ctx.fill();
    ctx.stroke();

    for anchor in Anchor::ALL {
        let h = anchor.handle_rect(frame, handle_size as f32);
        ctx.fill_rect(h.x as f64, h.y as f64, handle_size, handle_size);
        ctx.stroke_rect(h.x as f64, h.y as f64, handle_size, handle_size);
    }
    ctx.restore();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style_str(GRID);
    let spacing = 20.0;
    let mut x = 0.0;
    while x < width {
        let mut y = 0.0;
        while y < height {
            ctx.fill_rect(x, y, 1.0, 1.0);
            y += spacing;
        }
        x += spacing;
    }
}

/// Draw the rubber-band selection rectangle.
fn draw_rubber_band(ctx: &CanvasRenderingContext2d, band: &Bounds) {
    let (x, y, w, h) = (
        band.x as f64,
        band.y as f64,
        band.width as f64,
        band.height as f64,
    );
    if w < 1.0 && h < 1.0 {
        return;
    }

    ctx.save();
    ctx.set_fill_style_str("rgba(79, 195, 247, 0.08)");
    ctx.fill_rect(x, y, w, h);
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(1.0);
    set_dashed(ctx);
    ctx.stroke_rect(x, y, w, h);
    ctx.restore();
}

fn set_dashed(ctx: &CanvasRenderingContext2d) {
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &wasm_bindgen::JsValue::from_f64(4.0),
        &wasm_bindgen::JsValue::from_f64(4.0),
    ));
}
