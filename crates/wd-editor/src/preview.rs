//! Live preview: provisional geometry broadcast during a drag or resize.
//!
//! A single slot holding the current `Preview`, plus subscribers that are
//! called on every write. The renderer and a live property inspector both
//! read from here while the store still holds the committed values.

use kurbo::{Rect, Vec2};
use std::collections::HashMap;
use std::fmt;
use wd_core::ElementId;

/// Screen-space translation of the element directly under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveOffset {
    pub id: ElementId,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preview {
    /// Canvas-space provisional bounds.
    pub bounds: HashMap<ElementId, Rect>,
    pub active: Option<ActiveOffset>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty() && self.active.is_none()
    }

    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.bounds.get(&id).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&Preview)>;

#[derive(Default)]
pub struct LivePreview {
    current: Preview,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_id: u64,
}

impl fmt::Debug for LivePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivePreview")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl LivePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Preview) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Replace the slot and notify.
    pub fn publish(&mut self, preview: Preview) {
        log::trace!("preview: {} live elements", preview.bounds.len());
        self.current = preview;
        self.notify();
    }

    /// Empty the slot. Subscribers hear about it once; clearing an
    /// already-empty slot is silent.
    pub fn clear(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.current = Preview::default();
        self.notify();
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.current);
        }
    }

    pub fn current(&self) -> &Preview {
        &self.current
    }

    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.current.get(id)
    }

    pub fn is_active(&self) -> bool {
        !self.current.is_empty()
    }
}
