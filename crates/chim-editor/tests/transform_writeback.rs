//! Integration tests: drag, resize and rotate gestures through the
//! transformer, and the normalized attributes written back when they end.

use chim_core::{Board, BoardConfig, Bounds, CanvasNode, NodeId, NodeKind};
use chim_editor::{EditingSurface, Modifiers};
use pretty_assertions::assert_eq;
use std::borrow::Cow;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_surface() -> EditingSurface {
    init();
    let board = Board::from_seed_json(include_str!("fixtures/seed_board.json")).unwrap();
    EditingSurface::with_board(board, BoardConfig::default())
}

fn id(name: &str) -> NodeId {
    NodeId::intern(name)
}

fn position(surface: &EditingSurface, name: &str) -> (f32, f32) {
    let node = surface.board().get(id(name)).unwrap();
    (node.x, node.y)
}

fn assert_close(actual: Bounds, expected: Bounds) {
    let pairs = [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.width, expected.width),
        (actual.height, expected.height),
    ];
    assert!(
        pairs.iter().all(|(a, e)| (a - e).abs() < 1e-3),
        "{actual:?} != {expected:?}"
    );
}

fn assert_normalized(surface: &EditingSurface) {
    for node in surface.board().iter() {
        assert_eq!((node.scale_x, node.scale_y), (1.0, 1.0), "{} scale", node.id);
        assert!(node.width >= 5.0 && node.height >= 5.0, "{} too small", node.id);
    }
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_writes_back_start_plus_delta() {
    let mut surface = make_surface();
    surface.pointer_down(50.0, 50.0, Modifiers::NONE);
    surface.pointer_move(65.0, 55.0, Modifiers::NONE);
    surface.pointer_move(80.0, 70.0, Modifiers::NONE);

    // Board untouched mid-gesture; the live view follows the pointer
    assert_eq!(position(&surface, "1"), (40.0, 40.0));
    {
        let live = surface.live_board();
        assert!(matches!(live, Cow::Owned(_)));
        let live_node = live.get(id("1")).unwrap();
        assert_eq!((live_node.x, live_node.y), (70.0, 60.0));
    }
    assert_eq!(
        surface.transformer_frame(),
        Some(Bounds::new(70.0, 60.0, 140.0, 40.0))
    );

    surface.pointer_up(80.0, 70.0, Modifiers::NONE);
    assert_eq!(position(&surface, "1"), (70.0, 60.0));
    assert!(!surface.is_interacting());
}

#[test]
fn dragging_a_selected_node_moves_the_group() {
    let mut surface = make_surface();
    // Select "1" and "2" with a band
    surface.pointer_down(30.0, 30.0, Modifiers::NONE);
    surface.pointer_up(250.0, 70.0, Modifiers::NONE);
    assert_eq!(surface.selected_ids(), &[id("1"), id("2")]);

    surface.pointer_down(250.0, 60.0, Modifiers::NONE);
    surface.pointer_move(260.0, 160.0, Modifiers::NONE);
    surface.pointer_up(260.0, 160.0, Modifiers::NONE);

    assert_eq!(surface.selected_ids(), &[id("1"), id("2")]);
    assert_eq!(position(&surface, "1"), (50.0, 140.0));
    assert_eq!(position(&surface, "2"), (210.0, 140.0));
    assert_eq!(position(&surface, "3"), (360.0, 40.0));
}

#[test]
fn shift_drag_locks_to_dominant_axis() {
    let mut surface = make_surface();
    surface.pointer_down(50.0, 50.0, Modifiers::NONE);
    surface.pointer_move(90.0, 60.0, Modifiers::SHIFT);
    surface.pointer_up(90.0, 60.0, Modifiers::SHIFT);
    assert_eq!(position(&surface, "1"), (80.0, 40.0));
}

#[test]
fn click_without_motion_writes_nothing() {
    let mut surface = make_surface();
    let before = surface.board().snapshot();
    surface.pointer_down(50.0, 50.0, Modifiers::NONE);
    surface.pointer_up(50.0, 50.0, Modifiers::NONE);
    assert_eq!(surface.board().snapshot(), before);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn corner_resize_folds_scale_into_size() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();

    // Bottom-right anchor of (40, 160, 200, 150)
    surface.pointer_down(240.0, 310.0, Modifiers::NONE);
    surface.pointer_move(440.0, 460.0, Modifiers::NONE);

    {
        let live = surface.live_board();
        let photo = live.get(id("photo")).unwrap();
        assert_eq!((photo.scale_x, photo.scale_y), (2.0, 2.0));
        assert_eq!(photo.width, 200.0);
    }
    assert_eq!(
        surface.transformer_frame(),
        Some(Bounds::new(40.0, 160.0, 400.0, 300.0))
    );

    surface.pointer_up(440.0, 460.0, Modifiers::NONE);
    let photo = surface.board().get(id("photo")).unwrap();
    assert_eq!(
        (photo.x, photo.y, photo.width, photo.height),
        (40.0, 160.0, 400.0, 300.0)
    );
    assert_normalized(&surface);
}

#[test]
fn shift_corner_resize_keeps_aspect_ratio() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();
    surface.pointer_down(240.0, 310.0, Modifiers::NONE);
    surface.pointer_move(440.0, 200.0, Modifiers::SHIFT);
    surface.pointer_up(440.0, 200.0, Modifiers::SHIFT);

    let photo = surface.board().get(id("photo")).unwrap();
    assert_eq!((photo.width, photo.height), (400.0, 300.0));
}

#[test]
fn edge_resize_keeps_text_font_size() {
    let mut surface = make_surface();
    surface.select_by_id(id("1")).unwrap();

    // Middle-right anchor of (40, 40, 140, 40)
    surface.pointer_down(180.0, 60.0, Modifiers::NONE);
    surface.pointer_up(320.0, 75.0, Modifiers::NONE);

    let node = surface.board().get(id("1")).unwrap();
    assert_eq!((node.x, node.y, node.width, node.height), (40.0, 40.0, 280.0, 40.0));
    assert_eq!(
        node.kind,
        NodeKind::Text {
            text: "one of".into(),
            font_size: 20.0
        }
    );
}

#[test]
fn flipping_resize_is_rejected() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();
    let before = surface.board().snapshot();

    surface.pointer_down(240.0, 310.0, Modifiers::NONE);
    surface.pointer_move(20.0, 20.0, Modifiers::NONE);
    assert_eq!(
        surface.transformer_frame(),
        Some(Bounds::new(40.0, 160.0, 200.0, 150.0))
    );
    surface.pointer_up(20.0, 20.0, Modifiers::NONE);

    assert_eq!(surface.board().snapshot(), before);
}

#[test]
fn group_shrink_clamps_every_node_to_minimum() {
    let mut surface = make_surface();
    surface.select_by_id(id("1")).unwrap();
    surface.pointer_down(100.0, 200.0, Modifiers::SHIFT);
    surface.pointer_up(100.0, 200.0, Modifiers::SHIFT);
    assert_eq!(surface.selected_ids(), &[id("1"), id("photo")]);
    assert_eq!(
        surface.transformer_frame(),
        Some(Bounds::new(40.0, 40.0, 200.0, 270.0))
    );

    surface.pointer_down(240.0, 310.0, Modifiers::NONE);
    surface.pointer_move(46.0, 50.0, Modifiers::NONE);
    surface.pointer_up(46.0, 50.0, Modifiers::NONE);

    let text = surface.board().get(id("1")).unwrap();
    assert_eq!((text.width, text.height), (5.0, 5.0));
    assert_normalized(&surface);
    assert_eq!(surface.selected_ids(), &[id("1"), id("photo")]);
}

#[test]
fn switching_tools_abandons_a_live_resize() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();
    let before = surface.board().snapshot();

    surface.pointer_down(240.0, 310.0, Modifiers::NONE);
    surface.pointer_move(300.0, 400.0, Modifiers::NONE);
    surface.handle_key("v", &Modifiers::NONE);
    surface.pointer_up(300.0, 400.0, Modifiers::NONE);

    assert_eq!(surface.board().snapshot(), before);
    assert!(matches!(surface.live_board(), Cow::Borrowed(_)));
}

#[test]
fn resizing_a_quarter_turned_node_stays_in_the_frame() {
    init();
    // A 100×10 bar turned 90° hangs down and to the left of its origin
    let mut bar = CanvasNode::image(id("bar"), "bar.png", Bounds::new(100.0, 100.0, 100.0, 10.0));
    bar.rotation = 90.0;
    let board = Board::from_nodes([bar]).unwrap();
    let mut surface = EditingSurface::with_board(board, BoardConfig::default());
    surface.select_by_id(id("bar")).unwrap();
    assert_close(
        surface.transformer_frame().unwrap(),
        Bounds::new(90.0, 100.0, 10.0, 100.0),
    );

    // Middle-right anchor: double the frame width
    surface.pointer_down(100.0, 150.0, Modifiers::NONE);
    surface.pointer_move(110.0, 150.0, Modifiers::NONE);
    let frame = surface.transformer_frame().unwrap();
    assert_close(frame, Bounds::new(90.0, 100.0, 20.0, 100.0));
    surface.pointer_up(110.0, 150.0, Modifiers::NONE);

    let node = surface.board().get(id("bar")).unwrap();
    assert_close(node.bounds(), frame);
    assert_close(
        Bounds::new(node.x, node.y, node.width, node.height),
        Bounds::new(110.0, 100.0, 100.0, 20.0),
    );
    assert_eq!(node.rotation, 90.0);
    assert_normalized(&surface);
}

// ─── Rotate ─────────────────────────────────────────────────────────────

#[test]
fn rotate_handle_turns_node_around_frame_center() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();

    // Frame (40, 160, 200, 150): center (140, 235), rotate handle at (140, 136)
    surface.pointer_down(140.0, 136.0, Modifiers::NONE);
    surface.pointer_move(240.0, 235.0, Modifiers::SHIFT);
    {
        let live = surface.live_board();
        assert_eq!(live.get(id("photo")).unwrap().rotation, 90.0);
    }
    assert_eq!(surface.board().get(id("photo")).unwrap().rotation, 0.0);

    surface.pointer_up(240.0, 235.0, Modifiers::SHIFT);
    let photo = surface.board().get(id("photo")).unwrap();
    assert_eq!(photo.rotation, 90.0);
    assert_eq!((photo.width, photo.height), (200.0, 150.0));
    assert_close(photo.bounds(), Bounds::new(65.0, 135.0, 150.0, 200.0));
    assert_eq!(surface.selected_ids(), &[id("photo")]);
}

#[test]
fn escape_abandons_a_live_rotation() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();
    let before = surface.board().snapshot();

    surface.pointer_down(140.0, 136.0, Modifiers::NONE);
    surface.pointer_move(240.0, 235.0, Modifiers::NONE);
    surface.handle_key("Escape", &Modifiers::NONE);
    surface.pointer_up(240.0, 235.0, Modifiers::NONE);

    assert_eq!(surface.board().snapshot(), before);
}
