//! Static seed data for a fresh board.

use crate::error::{BoardError, Result};
use crate::geometry::Bounds;
use crate::id::NodeId;
use crate::model::{Board, CanvasNode};

/// Items shown on a fresh board, laid out four to a row.
const SEED_ITEMS: [&str; 6] = ["one of", "one of", "one of", "one of", "one of", "one of"];

const SEED_COLUMNS: usize = 4;
const SEED_CELL: (f32, f32) = (160.0, 60.0);
const SEED_ORIGIN: (f32, f32) = (40.0, 40.0);
const SEED_FONT_SIZE: f32 = 20.0;

impl Board {
    /// Load a board from a JSON array of nodes (paint order).
    ///
    /// # Errors
    /// [`BoardError::Seed`] on malformed JSON, or any [`Board::add_node`] error.
    pub fn from_seed_json(json: &str) -> Result<Self> {
        let nodes: Vec<CanvasNode> = serde_json::from_str(json).map_err(BoardError::Seed)?;
        log::info!("seed: loading {} nodes", nodes.len());
        Self::from_nodes(nodes)
    }

    /// The default board: a grid of text items plus one image.
    pub fn demo() -> Self {
        let mut board = Self::new();
        for (i, text) in SEED_ITEMS.iter().enumerate() {
            let col = (i % SEED_COLUMNS) as f32;
            let row = (i / SEED_COLUMNS) as f32;
            let bounds = Bounds::new(
                SEED_ORIGIN.0 + col * SEED_CELL.0,
                SEED_ORIGIN.1 + row * SEED_CELL.1,
                SEED_CELL.0 - 20.0,
                SEED_CELL.1 - 20.0,
            );
            let id = NodeId::intern(&(i + 1).to_string());
            let node = CanvasNode::text(id, *text, SEED_FONT_SIZE, bounds);
            // Seed ids are distinct and geometry is finite.
            if let Err(e) = board.add_node(node) {
                log::error!("seed: {e}");
            }
        }
        let image = CanvasNode::image(
            NodeId::intern("image"),
            "/assets/chimboard.png",
            Bounds::new(SEED_ORIGIN.0, SEED_ORIGIN.1 + 2.0 * SEED_CELL.1 + 20.0, 200.0, 150.0),
        );
        if let Err(e) = board.add_node(image) {
            log::error!("seed: {e}");
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    #[test]
    fn demo_board_has_grid_and_image() {
        let board = Board::demo();
        assert_eq!(board.len(), 7);

        let fifth = board.get(NodeId::intern("5")).unwrap();
        assert_eq!((fifth.x, fifth.y), (40.0, 100.0));

        let image = board.get(NodeId::intern("image")).unwrap();
        assert!(matches!(image.kind, NodeKind::Image { .. }));
    }

    #[test]
    fn demo_nodes_do_not_overlap() {
        let board = Board::demo();
        let nodes: Vec<&CanvasNode> = board.iter().collect();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert!(!a.bounds().intersects(&b.bounds()), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn seed_json_loads_in_order() {
        let json = r#"[
            {"id": "s_a", "kind": "image", "url": "a.png",
             "x": 0, "y": 0, "width": 10, "height": 10},
            {"id": "s_b", "kind": "text", "text": "b", "fontSize": 12,
             "x": 5, "y": 5, "width": 10, "height": 10}
        ]"#;
        let board = Board::from_seed_json(json).unwrap();
        let order: Vec<String> = board.ids().map(|id| id.as_str().to_owned()).collect();
        assert_eq!(order, vec!["s_a", "s_b"]);
    }

    #[test]
    fn seed_json_rejects_unknown_kind() {
        let json = r#"[{"id": "s_bad", "kind": "video", "x": 0, "y": 0, "width": 1, "height": 1}]"#;
        assert!(matches!(Board::from_seed_json(json), Err(BoardError::Seed(_))));
    }
}
