//! WASM bridge for ChimBoard: exposes the editing surface to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer
//! and keyboard events here and calls `render` on every animation frame.

mod render2d;

use chim_core::{Board, BoardConfig, Bounds, CanvasNode, NodeId};
use chim_editor::tools::text_bounds;
use chim_editor::{EditingSurface, Modifiers, ToolKind};
use chim_render::paint::Overlay;
use render2d::ImageCache;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing board controller.
///
/// Holds the editing surface and the image cache. All interaction from the
/// page goes through this struct.
#[wasm_bindgen]
pub struct ChimBoard {
    surface: EditingSurface,
    images: ImageCache,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl ChimBoard {
    /// Create a board controller showing the demo board.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_setup();
        Self {
            surface: EditingSurface::with_board(Board::demo(), BoardConfig::default()),
            images: ImageCache::new(),
            width,
            height,
        }
    }

    /// Replace the tunables from a JSON object. Missing fields take defaults.
    /// Returns `false` (and keeps the old config) on malformed JSON.
    pub fn configure(&mut self, json: &str) -> bool {
        match BoardConfig::from_json(json) {
            Ok(config) => {
                self.surface.set_config(config);
                true
            }
            Err(e) => {
                log::error!("chim: {e}");
                false
            }
        }
    }

    /// Replace the board with nodes from a JSON array.
    /// Returns `false` (and keeps the old board) on error.
    pub fn load_seed(&mut self, json: &str) -> bool {
        match Board::from_seed_json(json) {
            Ok(board) => {
                self.surface.load_board(board);
                true
            }
            Err(e) => {
                log::error!("chim: {e}");
                false
            }
        }
    }

    /// All nodes as a JSON array in paint order, live gesture applied.
    pub fn nodes_json(&self) -> String {
        serde_json::to_string(&self.surface.live_board().snapshot()).unwrap_or_else(|e| {
            log::error!("chim: {e}");
            "[]".to_string()
        })
    }

    /// Render the board to a Canvas2D context.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let board = self.surface.live_board();
        let band = self.surface.selection_box();
        let overlay = Overlay {
            selected: self.surface.selected_ids(),
            transformer: self.surface.transformer_frame(),
            rubber_band: band.visible.then(|| band.bounds()),
            handle_size: self.surface.config().handle_size,
        };
        render2d::render_board(ctx, &board, &overlay, &mut self.images, self.width, self.height);
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Handle pointer down event. Returns false if the event was dropped.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.surface
            .pointer_down(x, y, modifiers(shift, ctrl, alt, meta))
    }

    /// Handle pointer move event. Returns false if the event was dropped.
    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.surface
            .pointer_move(x, y, modifiers(shift, ctrl, alt, meta))
    }

    /// Handle pointer up event. Returns false if the event was dropped.
    pub fn handle_pointer_up(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.surface
            .pointer_up(x, y, modifiers(shift, ctrl, alt, meta))
    }

    /// Handle a keydown. `key` is `KeyboardEvent.key`.
    /// Returns true if the key was bound (the page should `preventDefault`).
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.surface
            .handle_key(key, &modifiers(shift, ctrl, alt, meta))
    }

    /// Selected node ids as a JSON array.
    pub fn selected_ids(&self) -> String {
        let ids: Vec<&str> = self
            .surface
            .selected_ids()
            .iter()
            .map(|id| id.as_str())
            .collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Select exactly one node. Returns `false` if it does not exist.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.surface.select_by_id(NodeId::intern(id)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("chim: {e}");
                false
            }
        }
    }

    /// Delete all selected nodes. Returns how many were removed.
    pub fn delete_selected(&mut self) -> u32 {
        self.surface.delete_selected() as u32
    }

    /// Add a text node at `(x, y)` and select it.
    /// Returns the new id, or an empty string on error.
    pub fn add_text(&mut self, x: f32, y: f32, text: &str) -> String {
        let font_size = self.surface.config().default_font_size;
        let bounds = text_bounds(text, font_size, x, y);
        let node = CanvasNode::text(NodeId::with_prefix("text"), text, font_size, bounds);
        self.add_and_select(node)
    }

    /// Add an image node and select it.
    /// Returns the new id, or an empty string on error.
    pub fn add_image(&mut self, url: &str, x: f32, y: f32, width: f32, height: f32) -> String {
        let node = CanvasNode::image(
            NodeId::with_prefix("image"),
            url,
            Bounds::new(x, y, width, height),
        );
        self.add_and_select(node)
    }

    /// Switch the active tool (`"select"` or `"text"`).
    /// Returns `false` for an unknown name.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => {
                self.surface.set_tool(tool);
                true
            }
            None => {
                log::warn!("chim: unknown tool {name:?}");
                false
            }
        }
    }

    /// Name of the active tool.
    pub fn tool(&self) -> String {
        self.surface.tool().name().to_string()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl ChimBoard {
    fn add_and_select(&mut self, node: CanvasNode) -> String {
        let id = node.id;
        if let Err(e) = self.surface.add_node(node) {
            log::warn!("chim: {e}");
            return String::new();
        }
        if let Err(e) = self.surface.select_by_id(id) {
            log::warn!("chim: {e}");
        }
        id.as_str().to_string()
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

// ─── Console logging and panic hook ──────────────────────────────────────

fn console_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            if let Err(e) = console_log::init_with_level(log::Level::Debug) {
                web_sys::console::error_1(&format!("chim: logger: {e}").into());
            }
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("ChimBoard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
