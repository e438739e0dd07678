//! Hit testing: point → element lookup.
//!
//! Walks the effective paint order back to front, so the topmost element
//! at a canvas position wins. Elements that are hidden, or sit on a hidden
//! layer, are never hit.

use crate::handles::ResizeHandle;
use kurbo::{Point, Rect};
use wd_core::geometry::intersects;
use wd_core::{Document, ElementId, ViewTransform};

/// Find the topmost element at canvas position `p`.
/// Returns `None` if only the background is hit.
pub fn hit_test(doc: &Document, p: Point) -> Option<ElementId> {
    let hit = doc
        .paint_order()
        .into_iter()
        .rev()
        .filter(|id| doc.is_visible(*id))
        .find(|id| doc.element(*id).is_some_and(|el| el.contains(p.x, p.y)));
    log::trace!("hit_test ({:.1}, {:.1}) -> {hit:?}", p.x, p.y);
    hit
}

/// All top-level visible elements whose bounds intersect `rect` (canvas
/// space), bottom-most first. Used for marquee selection.
pub fn hit_test_rect(doc: &Document, rect: Rect) -> Vec<ElementId> {
    doc.paint_order()
        .into_iter()
        .filter(|id| {
            doc.element(*id).is_some_and(|el| {
                el.is_top_level() && doc.is_visible(*id) && intersects(rect, el.bounds())
            })
        })
        .collect()
}

/// Find a resize handle under screen position `screen`.
///
/// Only `candidates` (normally the selection) are considered, topmost
/// first; locked elements show no handles. `handle_size` is in screen
/// pixels so handles stay the same size at every zoom.
pub fn hit_test_handle(
    doc: &Document,
    candidates: &[ElementId],
    view: &ViewTransform,
    screen: Point,
    handle_size: f64,
) -> Option<(ElementId, ResizeHandle)> {
    let mut ordered: Vec<ElementId> = doc
        .paint_order()
        .into_iter()
        .filter(|id| candidates.contains(id))
        .collect();
    ordered.reverse();

    for id in ordered {
        if doc.is_locked(id) || !doc.is_visible(id) {
            continue;
        }
        let Some(el) = doc.element(id) else {
            continue;
        };
        let bounds = view.rect_to_screen(el.bounds());
        if let Some(handle) = ResizeHandle::ALL
            .into_iter()
            .find(|h| h.rect(bounds, handle_size).contains(screen))
        {
            return Some((id, handle));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use wd_core::{DocMutation, Element, LayerColor, LayerId};

    fn add(doc: &mut Document, el: Element) {
        doc.apply(DocMutation::AddElement(Box::new(el)));
    }

    fn el(name: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::with_id(ElementId::intern(name), "knob", x, y, w, h)
    }

    #[test]
    fn hit_test_picks_topmost() {
        let mut doc = Document::new();
        add(&mut doc, el("h_under", 0.0, 0.0, 100.0, 100.0));
        add(&mut doc, el("h_over", 50.0, 50.0, 100.0, 100.0));

        assert_eq!(hit_test(&doc, Point::new(75.0, 75.0)), Some(ElementId::intern("h_over")));
        assert_eq!(hit_test(&doc, Point::new(10.0, 10.0)), Some(ElementId::intern("h_under")));
        assert_eq!(hit_test(&doc, Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn higher_layer_wins_over_array_position() {
        let mut doc = Document::new();
        let top = LayerId::intern("h_top_layer");
        doc.apply(DocMutation::AddLayer {
            id: top,
            name: "Top".into(),
            color: LayerColor::Blue,
        });
        add(&mut doc, el("hl_a", 0.0, 0.0, 100.0, 100.0).on_layer(top));
        add(&mut doc, el("hl_b", 0.0, 0.0, 100.0, 100.0));
        assert_eq!(hit_test(&doc, Point::new(5.0, 5.0)), Some(ElementId::intern("hl_a")));
    }

    #[test]
    fn hidden_layer_is_not_hit() {
        let mut doc = Document::new();
        let hidden = LayerId::intern("h_hidden");
        doc.apply(DocMutation::AddLayer {
            id: hidden,
            name: "Hidden".into(),
            color: LayerColor::Gray,
        });
        add(&mut doc, el("hh_a", 0.0, 0.0, 100.0, 100.0));
        add(&mut doc, el("hh_b", 0.0, 0.0, 100.0, 100.0).on_layer(hidden));
        doc.apply(DocMutation::ToggleLayerVisibility { id: hidden });

        assert_eq!(hit_test(&doc, Point::new(5.0, 5.0)), Some(ElementId::intern("hh_a")));
        assert_eq!(
            hit_test_rect(&doc, Rect::new(0.0, 0.0, 10.0, 10.0)),
            vec![ElementId::intern("hh_a")]
        );
    }

    #[test]
    fn rect_hit_skips_children() {
        let mut doc = Document::new();
        add(&mut doc, el("hr_panel", 0.0, 0.0, 200.0, 200.0));
        add(
            &mut doc,
            el("hr_child", 10.0, 10.0, 20.0, 20.0).child_of(ElementId::intern("hr_panel")),
        );
        add(&mut doc, el("hr_far", 500.0, 500.0, 20.0, 20.0));

        let hits = hit_test_rect(&doc, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(hits, vec![ElementId::intern("hr_panel")]);
    }

    #[test]
    fn handle_hit_uses_screen_space() {
        let mut doc = Document::new();
        add(&mut doc, el("hs_a", 10.0, 10.0, 50.0, 50.0));
        let id = ElementId::intern("hs_a");
        let view = ViewTransform::new(2.0, Vec2::new(100.0, 0.0));

        // se corner of (10,10)-(60,60) at scale 2, offset (100,0) → (220,120).
        let hit = hit_test_handle(&doc, &[id], &view, Point::new(222.0, 118.0), 8.0);
        assert_eq!(hit, Some((id, ResizeHandle::SouthEast)));

        // Not among candidates: no handles.
        assert_eq!(hit_test_handle(&doc, &[], &view, Point::new(220.0, 120.0), 8.0), None);
    }

    #[test]
    fn locked_element_has_no_handles() {
        let mut doc = Document::new();
        add(&mut doc, el("hk_a", 0.0, 0.0, 50.0, 50.0).locked(true));
        let id = ElementId::intern("hk_a");
        let pointer = Point::new(50.0, 50.0);
        let hit = hit_test_handle(&doc, &[id], &ViewTransform::IDENTITY, pointer, 8.0);
        assert_eq!(hit, None);
    }
}
