//! Selection model: an ordered id set.
//!
//! Set semantics (no duplicates) with insertion order kept, so "primary"
//! queries see the element that was selected first.

use smallvec::SmallVec;
use wd_core::ElementId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: SmallVec<[ElementId; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `{id}`.
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Remove `id` if present, else add it.
    pub fn toggle(&mut self, id: ElementId) {
        match self.ids.iter().position(|s| *s == id) {
            Some(pos) => {
                self.ids.remove(pos);
            }
            None => self.ids.push(id),
        }
    }

    pub fn add(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Union with `ids`.
    pub fn select_multiple(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.add(id);
        }
    }

    /// Replace the whole selection (marquee recompute).
    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        self.select_multiple(ids);
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        match self.ids.iter().position(|s| *s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop ids that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// The first-selected element.
    pub fn primary(&self) -> Option<ElementId> {
        self.ids.first().copied()
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
