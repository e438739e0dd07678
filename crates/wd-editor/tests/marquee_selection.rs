//! Integration tests: rubber-band selection and background clicks.

use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use wd_core::{Document, ElementId};
use wd_editor::*;

fn load() -> CanvasEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let doc = Document::from_json(include_str!("fixtures/channel_strip.json"))
        .expect("fixture should load");
    CanvasEngine::with_document(doc, EditorConfig::default())
}

fn selected(engine: &CanvasEngine) -> BTreeSet<&str> {
    engine.selection().ids().iter().map(|id| id.as_str()).collect()
}

fn names(list: &[&'static str]) -> BTreeSet<&'static str> {
    list.iter().copied().collect()
}

fn sweep(engine: &mut CanvasEngine, from: (f64, f64), to: (f64, f64)) {
    engine.handle(&InputEvent::pointer_down(from.0, from.1));
    engine.handle(&InputEvent::pointer_move(to.0, to.1));
    engine.handle(&InputEvent::pointer_up(to.0, to.1));
}

#[test]
fn marquee_selects_top_level_intersecting_elements() {
    let mut engine = load();
    sweep(&mut engine, (5.0, 5.0), (150.0, 80.0));
    // The caption intersects too, but it is a child of knob_a.
    assert_eq!(selected(&engine), names(&["knob_a", "knob_b"]));
}

#[test]
fn marquee_direction_does_not_matter() {
    let mut forward = load();
    sweep(&mut forward, (5.0, 5.0), (150.0, 80.0));
    let mut backward = load();
    sweep(&mut backward, (150.0, 80.0), (5.0, 5.0));
    assert_eq!(selected(&forward), selected(&backward));
}

#[test]
fn hidden_elements_and_layers_are_skipped() {
    let mut engine = load();
    sweep(&mut engine, (500.0, 300.0), (5.0, 5.0));
    assert_eq!(selected(&engine), names(&["fader", "knob_a", "knob_b"]));
}

#[test]
fn marquee_updates_selection_live() {
    let mut engine = load();
    engine.handle(&InputEvent::pointer_down(5.0, 5.0));
    engine.handle(&InputEvent::pointer_move(70.0, 70.0));
    assert_eq!(selected(&engine), names(&["knob_a"]));
    assert!(engine.marquee_rect().is_some());
    assert!(engine.display_list().marquee.is_some());

    engine.handle(&InputEvent::pointer_move(150.0, 70.0));
    assert_eq!(selected(&engine), names(&["knob_a", "knob_b"]));

    // Shrinking the band drops elements it no longer touches.
    engine.handle(&InputEvent::pointer_move(10.0, 10.0));
    assert!(engine.selection().is_empty());
    engine.handle(&InputEvent::pointer_up(10.0, 10.0));
    assert_eq!(engine.marquee_rect(), None);
}

#[test]
fn background_click_after_marquee_keeps_selection() {
    let mut engine = load();
    sweep(&mut engine, (5.0, 5.0), (150.0, 80.0));
    assert!(engine.just_finished_marquee());

    engine.handle(&InputEvent::BackgroundClick);
    assert_eq!(selected(&engine), names(&["knob_a", "knob_b"]));
    assert!(!engine.just_finished_marquee());

    engine.handle(&InputEvent::BackgroundClick);
    assert!(engine.selection().is_empty());
}

#[test]
fn just_finished_flag_expires_on_tick() {
    let mut engine = load();
    sweep(&mut engine, (5.0, 5.0), (150.0, 80.0));
    engine.tick();
    engine.handle(&InputEvent::BackgroundClick);
    assert!(engine.selection().is_empty());
}

#[test]
fn plain_background_click_clears_selection() {
    let mut engine = load();
    engine.select(ElementId::intern("knob_a"));
    // A press-release with a small wiggle is a click, not a drag.
    sweep(&mut engine, (500.0, 300.0), (502.0, 301.0));
    assert!(!engine.just_finished_marquee());
    engine.handle(&InputEvent::BackgroundClick);
    assert!(engine.selection().is_empty());
}

#[test]
fn marquee_at_zoom_uses_canvas_space() {
    let mut engine = load();
    engine.set_viewport(0.5, 100.0, 0.0);
    // Screen (100..175, 0..40) is canvas (0..150, 0..80).
    sweep(&mut engine, (102.5, 2.5), (175.0, 40.0));
    assert_eq!(selected(&engine), names(&["knob_a", "knob_b"]));
}

#[test]
fn select_all_skips_hidden_and_children() {
    let mut engine = load();
    assert!(engine.handle(&InputEvent::key("a", Modifiers::CTRL)));
    assert_eq!(selected(&engine), names(&["fader", "knob_a", "knob_b"]));
    engine.handle(&InputEvent::key("Escape", Modifiers::NONE));
    assert!(engine.selection().is_empty());
}
