//! Integration tests: editing operations and the history timeline.
//!
//! Every content edit made through `CanvasEngine` must be exactly one undo
//! step, and UI-only state (viewport, selection) must never be one.

use pretty_assertions::assert_eq;
use wd_core::{
    Background, Document, Element, ElementId, ElementPatch, LayerColor, LayerId, LayerPatch,
    LayerRemoval,
};
use wd_editor::*;

fn load() -> CanvasEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let doc = Document::from_json(include_str!("fixtures/channel_strip.json"))
        .expect("fixture should load");
    CanvasEngine::with_document(doc, EditorConfig::default())
}

fn id(s: &str) -> ElementId {
    ElementId::intern(s)
}

// ─── Basic undo/redo ─────────────────────────────────────────────────────

#[test]
fn add_update_remove_round_trip() {
    let mut engine = load();
    let original = engine.document().clone();

    let meter = Element::with_id(id("ur_meter"), "meter", 500.0, 20.0, 20.0, 100.0).named("Level");
    assert!(engine.add_element(meter));
    assert!(engine.update_element(
        id("ur_meter"),
        ElementPatch {
            name: Some("Output Level".to_string()),
            ..Default::default()
        }
    ));
    assert!(engine.remove_element(id("ur_meter")));
    assert!(engine.element(id("ur_meter")).is_none());

    assert_eq!(engine.undo_n(2), 2);
    assert_eq!(
        engine.element(id("ur_meter")).map(|el| el.name.as_str()),
        Some("Level")
    );
    assert!(engine.undo());
    assert_eq!(engine.document(), &original);
    assert!(!engine.undo());

    assert_eq!(engine.redo_n(10), 3);
    assert!(engine.element(id("ur_meter")).is_none());
}

#[test]
fn new_edit_clears_redo() {
    let mut engine = load();
    engine.update_element(id("fader"), ElementPatch::position(210.0, 20.0));
    assert!(engine.undo());
    assert!(engine.can_redo());
    engine.update_element(id("fader"), ElementPatch::position(220.0, 20.0));
    assert!(!engine.can_redo());
}

#[test]
fn no_op_edits_are_not_recorded() {
    let mut engine = load();
    assert!(!engine.update_element(id("fader"), ElementPatch::position(200.0, 20.0)));
    assert!(!engine.remove_element(id("ur_missing")));
    assert!(!engine.set_grid_size(10.0));
    assert!(!engine.can_undo());
}

#[test]
fn viewport_and_selection_are_not_history() {
    let mut engine = load();
    engine.set_viewport(2.0, 40.0, 40.0);
    engine.zoom_at_point(kurbo::Point::new(10.0, 10.0), 1.5);
    engine.select(id("knob_a"));
    engine.select_layer(Some(LayerId::intern("controls")));
    assert!(!engine.can_undo());
    assert_eq!(engine.selected_layer_id(), Some(LayerId::intern("controls")));
}

#[test]
fn history_limit_evicts_oldest() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EditorConfig {
        history_limit: 3,
        ..EditorConfig::default()
    };
    let mut engine = CanvasEngine::new(config);
    for i in 0..5 {
        engine.add_element(Element::new("knob", f64::from(i) * 50.0, 0.0, 40.0, 40.0));
    }
    assert_eq!(engine.undo_n(10), 3);
    assert_eq!(engine.document().elements.len(), 2);
}

#[test]
fn undo_prunes_selection_of_removed_elements() {
    let mut engine = load();
    let tone = Element::new("knob", 500.0, 200.0, 40.0, 40.0);
    let tone_id = tone.id;
    engine.add_element(tone);
    engine.select_multiple([id("knob_a"), tone_id]);
    assert!(engine.undo());
    assert_eq!(engine.selection().ids(), &[id("knob_a")]);
}

// ─── Timeline ────────────────────────────────────────────────────────────

#[test]
fn history_entries_describe_each_step() {
    let mut engine = load();
    engine.set_background(Background::Color {
        color: "#000000".to_string(),
    });
    let led = Element::with_id(id("ur_led"), "led", 0.0, 200.0, 10.0, 10.0).named("Power");
    engine.add_element(led);
    engine.select(id("ur_led"));
    engine.handle(&InputEvent::key("ArrowRight", Modifiers::NONE));
    engine.handle(&InputEvent::key("Delete", Modifiers::NONE));

    let entries = engine.history_entries();
    let actions: Vec<HistoryAction> = entries.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Initial,
            HistoryAction::Canvas,
            HistoryAction::Add,
            HistoryAction::Move,
            HistoryAction::Delete,
        ]
    );
    assert_eq!(entries[2].affected, vec!["Power".to_string()]);
    assert!(entries[4].is_current);

    let expected = ["", "Background", "Add Power", "Nudge", "Delete"];
    let descriptions: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, expected);
    assert_eq!(entries[4].description, "Delete");

    assert_eq!(engine.jump_to(2), 2);
    let entries = engine.history_entries();
    assert!(entries[2].is_current);
    assert_eq!(entries[2].description, "Add Power");
    assert!(entries[3].is_future && entries[4].is_future);
    let descriptions: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, expected);
    assert_eq!(engine.element(id("ur_led")).map(|el| el.x), Some(0.0));

    assert_eq!(engine.jump_to(4), 2);
    assert!(engine.element(id("ur_led")).is_none());
}

// ─── Layers ──────────────────────────────────────────────────────────────

#[test]
fn hiding_a_layer_removes_it_from_hit_testing() {
    let mut engine = load();
    let controls = LayerId::intern("controls");
    assert_eq!(engine.element_at(kurbo::Point::new(30.0, 30.0)), Some(id("knob_a")));
    assert!(engine.toggle_layer_visibility(controls));
    assert_eq!(engine.element_at(kurbo::Point::new(30.0, 30.0)), None);
    assert!(engine.undo());
    assert_eq!(engine.element_at(kurbo::Point::new(30.0, 30.0)), Some(id("knob_a")));
}

#[test]
fn locked_layer_blocks_drag_but_not_selection() {
    let mut engine = load();
    engine.update_layer(
        LayerId::intern("controls"),
        LayerPatch {
            locked: Some(true),
            ..Default::default()
        },
    );
    engine.handle(&InputEvent::pointer_down(30.0, 30.0));
    assert_eq!(engine.active_gesture(), None);
    assert_eq!(engine.selection().ids(), &[id("knob_a")]);
    engine.handle(&InputEvent::pointer_up(30.0, 30.0));
}

#[test]
fn removing_a_layer_honours_policy() {
    let mut engine = load();
    let controls = LayerId::intern("controls");
    engine.select(id("knob_b"));

    assert!(engine.remove_layer(controls, LayerRemoval::ReassignToDefault));
    assert!(engine.element(id("knob_b")).is_some());
    assert!(engine.document().layers.get(controls).is_none());
    assert!(engine.undo());

    assert!(engine.remove_layer(controls, LayerRemoval::DeleteElements));
    assert!(engine.element(id("knob_a")).is_none());
    assert!(engine.element(id("caption")).is_none());
    assert!(engine.selection().is_empty());
    assert!(engine.undo());
    assert!(engine.element(id("caption")).is_some());

    // The default layer can never go.
    assert!(!engine.remove_layer(LayerId::default_layer(), LayerRemoval::DeleteElements));
}

#[test]
fn new_layer_lands_on_top_and_accepts_elements() {
    let mut engine = load();
    let overlay = engine.add_layer("Overlay", LayerColor::Red);
    assert_eq!(
        engine.layers_in_order().last().map(|l| l.id),
        Some(overlay)
    );
    assert!(engine.move_to_layer(id("fader"), overlay));
    assert_eq!(engine.document().paint_order().last(), Some(&id("fader")));
    assert_eq!(engine.undo_n(2), 2);
    assert!(engine.document().layers.get(overlay).is_none());
}

// ─── Clipboard ───────────────────────────────────────────────────────────

#[test]
fn copy_paste_offsets_and_selects_copies() {
    let mut engine = load();
    engine.select_multiple([id("knob_a"), id("knob_b")]);
    assert!(engine.handle(&InputEvent::key("c", Modifiers::CTRL)));
    assert!(engine.handle(&InputEvent::key("v", Modifiers::CTRL)));

    let pasted: Vec<ElementId> = engine.selection().ids().to_vec();
    assert_eq!(pasted.len(), 2);
    assert!(!pasted.contains(&id("knob_a")));
    let first = engine.element(pasted[0]).expect("pasted element");
    assert_eq!((first.x, first.y), (40.0, 40.0));

    // One paste, one step.
    assert!(engine.undo());
    assert!(pasted.iter().all(|p| engine.element(*p).is_none()));
}

#[test]
fn cut_then_paste_restores_content() {
    let mut engine = load();
    engine.select(id("fader"));
    assert!(engine.handle(&InputEvent::key("x", Modifiers::CTRL)));
    assert!(engine.element(id("fader")).is_none());
    assert!(engine.handle(&InputEvent::key("v", Modifiers::CTRL)));
    let pasted = engine.selection().primary().expect("pasted fader");
    let el = engine.element(pasted).expect("pasted fader");
    assert_eq!((el.kind.as_str(), el.x), ("slider", 220.0));
}

// ─── Save state ──────────────────────────────────────────────────────────

#[test]
fn dirty_tracking_follows_content() {
    let mut engine = load();
    engine.mark_saved(42).expect("serializable");
    assert!(!engine.is_dirty());

    engine.update_element(id("fader"), ElementPatch::position(0.0, 0.0));
    assert!(engine.is_dirty());
    engine.undo();
    assert!(!engine.is_dirty());
    assert_eq!(engine.last_saved(), Some(42));
}

#[test]
fn loading_replaces_document_without_history() {
    let mut engine = load();
    engine.select(id("knob_a"));
    engine.load(Document::new());
    assert!(engine.document().elements.is_empty());
    assert!(engine.selection().is_empty());
    assert!(!engine.can_undo());
}
