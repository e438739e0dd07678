//! Integration tests: project JSON → Document → snapshot round-trip.
//!
//! Exercises the full `wd-core` load path: normalization of the layer
//! stack, derived z-indices, and history snapshot fidelity.

use pretty_assertions::assert_eq;
use wd_core::*;

fn load_fixture() -> Document {
    Document::from_json(include_str!("fixtures/mixer_panel.json")).expect("fixture should load")
}

// ─── Layer normalization ─────────────────────────────────────────────────

#[test]
fn missing_default_layer_is_restored_at_bottom() {
    let doc = load_fixture();
    let names: Vec<&str> = doc
        .layers
        .layers_in_order()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Default", "Controls", "Meters"]);
    assert!(doc.layers.is_dense());
}

// ─── Paint order ─────────────────────────────────────────────────────────

#[test]
fn z_index_is_rewritten_from_paint_order() {
    let doc = load_fixture();
    let paint_order = doc.paint_order();
    let order: Vec<&str> = paint_order.iter().map(|id| id.as_str()).collect();
    assert_eq!(order, vec!["panel_bg", "gain_knob", "gain_label", "out_meter"]);

    // The stored 99 is ignored on load.
    let meter = doc.element(ElementId::intern("out_meter")).unwrap();
    assert_eq!(meter.z_index, 3);
}

#[test]
fn moving_a_layer_to_the_bottom_changes_paint_order() {
    let mut doc = load_fixture();
    // Meters (index 2) drops to just above default.
    assert!(doc.apply(DocMutation::ReorderLayers { from: 2, to: 1 }));
    let paint_order = doc.paint_order();
    let order: Vec<&str> = paint_order.iter().map(|id| id.as_str()).collect();
    assert_eq!(order, vec!["panel_bg", "out_meter", "gain_knob", "gain_label"]);
    assert_eq!(doc.element(ElementId::intern("out_meter")).unwrap().z_index, 1);
}

// ─── Flags ───────────────────────────────────────────────────────────────

#[test]
fn effective_flags_combine_element_and_layer() {
    let mut doc = load_fixture();
    assert!(doc.is_locked(ElementId::intern("panel_bg")));
    assert!(!doc.is_locked(ElementId::intern("gain_knob")));

    doc.apply(DocMutation::ToggleLayerVisibility {
        id: LayerId::intern("controls"),
    });
    assert!(!doc.is_visible(ElementId::intern("gain_knob")));
    assert!(doc.is_visible(ElementId::intern("out_meter")));
}

// ─── Snapshots ───────────────────────────────────────────────────────────

#[test]
fn snapshot_preserves_props_and_background() {
    let doc = load_fixture();
    let restored = doc.snapshot().unwrap().decode().unwrap();

    let knob = restored.element(ElementId::intern("gain_knob")).unwrap();
    assert_eq!(knob.props["default"], serde_json::json!(0.5));
    assert_eq!(
        restored.canvas.background,
        Background::Gradient {
            kind: GradientKind::Linear,
            colors: vec!["#111111".into(), "#333333".into()],
            angle: Some(90.0),
        }
    );
    assert_eq!(restored, doc);
}

#[test]
fn deleting_a_container_takes_its_children() {
    let mut doc = load_fixture();
    doc.apply(DocMutation::RemoveElement {
        id: ElementId::intern("gain_knob"),
    });
    assert!(doc.element(ElementId::intern("gain_label")).is_none());
    assert_eq!(doc.elements.len(), 2);
}
