//! Document → flat, paint-ordered display list in screen space.
//!
//! The rendering layer draws `items` in order, then selection handles,
//! then the marquee overlay. Widget content is the renderer's business;
//! this only says where each element goes and how it is decorated.

use crate::handles::ResizeHandle;
use kurbo::Rect;
use std::collections::HashMap;
use wd_core::{Document, ElementId, LayerColor, ViewTransform};

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub id: ElementId,
    /// Screen-space bounds, live preview applied.
    pub rect: Rect,
    pub rotation: f64,
    pub selected: bool,
    pub locked: bool,
    /// Showing uncommitted geometry from an active gesture.
    pub live: bool,
    pub layer_color: LayerColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleItem {
    pub id: ElementId,
    pub handle: ResizeHandle,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
    pub handles: Vec<HandleItem>,
    /// Screen-space marquee, present only once it is big enough to draw.
    pub marquee: Option<Rect>,
}

/// Everything the display list needs besides the document.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub view: &'a ViewTransform,
    pub selection: &'a [ElementId],
    /// Canvas-space provisional bounds keyed by element.
    pub live: &'a HashMap<ElementId, Rect>,
    /// Canvas-space marquee rectangle, if one is being dragged.
    pub marquee: Option<Rect>,
    pub marquee_threshold: f64,
    pub handle_size: f64,
}

pub fn build_display_list(doc: &Document, overlay: &Overlay<'_>) -> DisplayList {
    let mut list = DisplayList::default();

    for id in doc.paint_order() {
        if !doc.is_visible(id) {
            continue;
        }
        let Some(el) = doc.element(id) else {
            continue;
        };
        let live = overlay.live.get(&id).copied();
        let canvas = live.unwrap_or_else(|| el.bounds());
        let rect = overlay.view.rect_to_screen(canvas);
        let selected = overlay.selection.contains(&id);
        let locked = doc.is_locked(id);

        list.items.push(DisplayItem {
            id,
            rect,
            rotation: el.rotation,
            selected,
            locked,
            live: live.is_some(),
            layer_color: doc.layers.resolve(el.layer_id).color,
        });

        if selected && !locked {
            list.handles.extend(ResizeHandle::ALL.into_iter().map(|handle| HandleItem {
                id,
                handle,
                rect: handle.rect(rect, overlay.handle_size),
            }));
        }
    }

    list.marquee = overlay
        .marquee
        .filter(|m| m.width() > overlay.marquee_threshold || m.height() > overlay.marquee_threshold)
        .map(|m| overlay.view.rect_to_screen(m));

    log::trace!(
        "display list: {} items, {} handles",
        list.items.len(),
        list.handles.len()
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use pretty_assertions::assert_eq;
    use wd_core::{DocMutation, Element};

    fn doc_with(els: Vec<Element>) -> Document {
        let mut doc = Document::new();
        doc.apply(DocMutation::AddElements(els));
        doc
    }

    fn overlay<'a>(
        view: &'a ViewTransform,
        selection: &'a [ElementId],
        live: &'a HashMap<ElementId, Rect>,
        marquee: Option<Rect>,
    ) -> Overlay<'a> {
        Overlay {
            view,
            selection,
            live,
            marquee,
            marquee_threshold: 5.0,
            handle_size: 8.0,
        }
    }

    #[test]
    fn items_follow_paint_order_in_screen_space() {
        let doc = doc_with(vec![
            Element::with_id(ElementId::intern("dl_a"), "knob", 10.0, 10.0, 20.0, 20.0),
            Element::with_id(ElementId::intern("dl_b"), "knob", 0.0, 0.0, 5.0, 5.0),
        ]);
        let view = ViewTransform::new(2.0, Vec2::new(5.0, 5.0));
        let live = HashMap::new();
        let list = build_display_list(&doc, &overlay(&view, &[], &live, None));

        let ids: Vec<ElementId> = list.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ElementId::intern("dl_a"), ElementId::intern("dl_b")]);
        assert_eq!(list.items[0].rect, Rect::new(25.0, 25.0, 65.0, 65.0));
        assert!(list.handles.is_empty());
    }

    #[test]
    fn live_bounds_override_committed_geometry() {
        let id = ElementId::intern("dl_live");
        let doc = doc_with(vec![Element::with_id(id, "slider", 0.0, 0.0, 40.0, 40.0)]);
        let view = ViewTransform::IDENTITY;
        let mut live = HashMap::new();
        live.insert(id, Rect::new(30.0, 0.0, 70.0, 40.0));

        let list = build_display_list(&doc, &overlay(&view, &[id], &live, None));
        assert_eq!(list.items[0].rect, Rect::new(30.0, 0.0, 70.0, 40.0));
        assert!(list.items[0].live);
        assert_eq!(list.handles.len(), 8);
    }

    #[test]
    fn tiny_marquee_is_not_drawn() {
        let doc = Document::new();
        let view = ViewTransform::IDENTITY;
        let live = HashMap::new();

        let tiny = Some(Rect::new(0.0, 0.0, 4.0, 5.0));
        assert_eq!(build_display_list(&doc, &overlay(&view, &[], &live, tiny)).marquee, None);

        let wide = Some(Rect::new(0.0, 0.0, 6.0, 1.0));
        assert_eq!(
            build_display_list(&doc, &overlay(&view, &[], &live, wide)).marquee,
            Some(Rect::new(0.0, 0.0, 6.0, 1.0))
        );
    }

    #[test]
    fn locked_selection_has_no_handles() {
        let id = ElementId::intern("dl_locked");
        let doc = doc_with(vec![Element::with_id(id, "knob", 0.0, 0.0, 40.0, 40.0).locked(true)]);
        let view = ViewTransform::IDENTITY;
        let live = HashMap::new();
        let list = build_display_list(&doc, &overlay(&view, &[id], &live, None));
        assert!(list.items[0].selected);
        assert!(list.handles.is_empty());
    }
}
