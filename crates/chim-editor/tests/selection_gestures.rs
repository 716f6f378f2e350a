//! Integration tests: click, shift-click and rubber-band selection
//! (chim-editor ↔ chim-core ↔ chim-render hit testing).

use chim_core::{Board, BoardConfig, Bounds, NodeId};
use chim_editor::{EditingSurface, Modifiers, Selection};
use pretty_assertions::assert_eq;

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

fn click(surface: &mut EditingSurface, x: f32, y: f32, modifiers: Modifiers) {
    surface.pointer_down(x, y, modifiers);
    surface.pointer_up(x, y, modifiers);
}

// ─── Click ──────────────────────────────────────────────────────────────

#[test]
fn click_on_node_selects_only_it() {
    let mut surface = make_surface();
    click(&mut surface, 50.0, 50.0, Modifiers::NONE);
    assert_eq!(*surface.selection(), Selection::Single(id("1")));

    click(&mut surface, 250.0, 50.0, Modifiers::NONE);
    assert_eq!(*surface.selection(), Selection::Single(id("2")));
}

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut surface = make_surface();
    surface.select_by_id(id("1")).unwrap();
    click(&mut surface, 600.0, 600.0, Modifiers::NONE);
    assert!(surface.selection().is_empty());
    assert!(!surface.selection_box().visible);
}

#[test]
fn shift_click_toggles_membership() {
    let mut surface = make_surface();
    click(&mut surface, 50.0, 50.0, Modifiers::NONE);
    click(&mut surface, 250.0, 50.0, Modifiers::SHIFT);
    assert_eq!(surface.selected_ids(), &[id("1"), id("2")]);
    assert!(surface.selection().is_group());

    click(&mut surface, 60.0, 50.0, Modifiers::SHIFT);
    assert_eq!(*surface.selection(), Selection::Single(id("2")));
}

// ─── Rubber band ────────────────────────────────────────────────────────

#[test]
fn rubber_band_selects_intersecting_nodes() {
    let mut surface = make_surface();
    surface.pointer_down(30.0, 30.0, Modifiers::NONE);
    surface.pointer_move(250.0, 70.0, Modifiers::NONE);

    let band = surface.selection_box();
    assert!(band.visible);
    assert_eq!(band.bounds(), Bounds::new(30.0, 30.0, 220.0, 40.0));
    // Nothing is selected until release
    assert!(surface.selection().is_empty());

    surface.pointer_up(250.0, 70.0, Modifiers::NONE);
    assert_eq!(surface.selected_ids(), &[id("1"), id("2")]);
    assert!(!surface.selection_box().visible);
    assert_eq!(
        surface.transformer_frame(),
        Some(Bounds::new(40.0, 40.0, 300.0, 40.0))
    );
}

#[test]
fn rubber_band_drawn_backwards_is_normalized() {
    let mut surface = make_surface();
    surface.pointer_down(520.0, 90.0, Modifiers::NONE);
    surface.pointer_move(350.0, 30.0, Modifiers::NONE);
    assert_eq!(
        surface.selection_box().bounds(),
        Bounds::new(350.0, 30.0, 170.0, 60.0)
    );
    surface.pointer_up(350.0, 30.0, Modifiers::NONE);
    assert_eq!(*surface.selection(), Selection::Single(id("3")));
}

#[test]
fn shift_rubber_band_adds_to_selection() {
    let mut surface = make_surface();
    surface.select_by_id(id("photo")).unwrap();

    surface.pointer_down(30.0, 30.0, Modifiers::SHIFT);
    surface.pointer_move(250.0, 70.0, Modifiers::SHIFT);
    surface.pointer_up(250.0, 70.0, Modifiers::SHIFT);

    assert_eq!(surface.selected_ids(), &[id("photo"), id("1"), id("2")]);
}

#[test]
fn band_touching_a_node_edge_selects_it() {
    let mut surface = make_surface();
    // Left edge of the band lies on the right edge of "1"
    surface.pointer_down(180.0, 30.0, Modifiers::NONE);
    surface.pointer_move(190.0, 70.0, Modifiers::NONE);
    surface.pointer_up(190.0, 70.0, Modifiers::NONE);
    assert_eq!(*surface.selection(), Selection::Single(id("1")));
}

#[test]
fn click_sized_band_selects_nothing() {
    let mut surface = make_surface();
    // Starts just left of node "1" and would graze it
    surface.pointer_down(39.0, 50.0, Modifiers::NONE);
    surface.pointer_move(41.0, 51.0, Modifiers::NONE);
    surface.pointer_up(41.0, 51.0, Modifiers::NONE);
    assert!(surface.selection().is_empty());
}

#[test]
fn rubber_band_over_everything_selects_all() {
    let mut surface = make_surface();
    surface.pointer_down(0.0, 0.0, Modifiers::NONE);
    surface.pointer_up(1000.0, 1000.0, Modifiers::NONE);
    assert_eq!(surface.selected_ids().len(), surface.board().len());
}

// ─── Keyboard ───────────────────────────────────────────────────────────

#[test]
fn escape_abandons_band_and_clears() {
    let mut surface = make_surface();
    surface.select_by_id(id("3")).unwrap();
    surface.pointer_down(30.0, 30.0, Modifiers::SHIFT);
    surface.pointer_move(250.0, 70.0, Modifiers::SHIFT);
    assert!(surface.is_interacting());

    surface.handle_key("Escape", &Modifiers::NONE);
    assert!(!surface.is_interacting());
    assert!(surface.selection().is_empty());

    // Release after cancel does nothing
    surface.pointer_up(250.0, 70.0, Modifiers::SHIFT);
    assert!(surface.selection().is_empty());
}

#[test]
fn deleting_selection_never_leaves_stale_ids() {
    let mut surface = make_surface();
    click(&mut surface, 50.0, 50.0, Modifiers::NONE);
    assert!(surface.handle_key("Delete", &Modifiers::NONE));

    assert!(!surface.board().contains(id("1")));
    assert!(surface.selection().is_empty());
    assert_eq!(surface.board().len(), 3);
}
