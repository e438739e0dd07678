//! In-process clipboard for elements.
//!
//! Holds deep copies, so later edits to the originals do not leak into a
//! paste. Repeated pastes from one copy land at the same offset.

use std::collections::HashMap;
use wd_core::{CanvasResult, Document, Element, ElementId};

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    elements: Vec<Element>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `ids` in the given order. Stale ids are skipped; copying
    /// nothing leaves the previous contents in place.
    pub fn copy(&mut self, doc: &Document, ids: &[ElementId]) -> usize {
        let copied: Vec<Element> = ids.iter().filter_map(|id| doc.element(*id).cloned()).collect();
        if copied.is_empty() {
            return 0;
        }
        self.elements = copied;
        self.elements.len()
    }

    /// Fresh clones offset by `offset` on both axes. Parent links between
    /// copied elements follow the new ids.
    pub fn paste(&self, offset: f64) -> Vec<Element> {
        let fresh: Vec<ElementId> = self
            .elements
            .iter()
            .map(|el| ElementId::with_prefix(&el.kind))
            .collect();
        let new_ids: HashMap<ElementId, ElementId> = self
            .elements
            .iter()
            .map(|el| el.id)
            .zip(fresh.iter().copied())
            .collect();

        self.elements
            .iter()
            .zip(fresh)
            .map(|(el, id)| {
                let mut pasted = el.clone();
                pasted.id = id;
                pasted.x += offset;
                pasted.y += offset;
                if let Some(parent) = el.parent_id
                    && let Some(new_parent) = new_ids.get(&parent)
                {
                    pasted.parent_id = Some(*new_parent);
                }
                pasted
            })
            .collect()
    }

    /// Clipboard contents as JSON, for the system clipboard.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(&self.elements)?)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
