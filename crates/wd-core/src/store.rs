//! Element store: the canonical, ordered collection of placed elements.
//!
//! Array position is the intra-layer paint order (later = on top). Missing
//! ids are silent no-ops everywhere: ids routinely go stale (a context menu
//! opened before an undo, a preview for an element that was just deleted).

use crate::id::{ElementId, LayerId};
use crate::model::{Element, ElementPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        store.set_elements(elements);
        store
    }

    /// Append an element (topmost among its layer). A duplicate id is ignored.
    pub fn add(&mut self, element: Element) -> bool {
        if self.contains(element.id) {
            log::warn!("element {} already exists; add ignored", element.id);
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn add_many(&mut self, elements: impl IntoIterator<Item = Element>) -> usize {
        let mut added = 0;
        for el in elements {
            if self.add(el) {
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    /// Remove every listed id. Returns the removed elements in store order.
    pub fn remove_many(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let mut removed = Vec::new();
        self.elements.retain(|el| {
            if ids.contains(&el.id) {
                removed.push(el.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Apply a partial update. Returns `true` if the element existed and changed.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.get_mut(id) {
            Some(el) => el.apply(patch),
            None => {
                log::trace!("update on missing element {id}");
                false
            }
        }
    }

    /// Bulk replace. Later duplicates of an id are dropped.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        for el in elements {
            self.add(el);
        }
    }

    /// Reassign an element's layer without touching its array position.
    pub fn move_to_layer(&mut self, id: ElementId, layer: LayerId) -> bool {
        self.update(
            id,
            &ElementPatch {
                layer_id: Some(Some(layer)),
                ..ElementPatch::default()
            },
        )
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Array index of an element.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// All elements in array (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    /// Elements that are not children of a container.
    pub fn top_level(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.is_top_level())
    }

    pub fn children_of(&self, parent: ElementId) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |el| el.parent_id == Some(parent))
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|el| el.id).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
