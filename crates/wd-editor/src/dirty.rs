//! Unsaved-changes tracking.
//!
//! Compares the document's JSON against the copy taken at the last save.
//! Lives beside history, never inside it: undoing must not flip a project
//! back to "saved" bookkeeping of some earlier moment.

use wd_core::{CanvasResult, Document};

#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    saved_json: Option<String>,
    /// Caller-supplied timestamp (e.g. epoch millis).
    saved_at: Option<u64>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_saved(&mut self, doc: &Document, timestamp: u64) -> CanvasResult<()> {
        self.saved_json = Some(doc.to_json()?);
        self.saved_at = Some(timestamp);
        Ok(())
    }

    /// A never-saved document is dirty once it has any elements.
    pub fn is_dirty(&self, doc: &Document) -> bool {
        match &self.saved_json {
            None => !doc.elements.is_empty(),
            Some(saved) => match doc.to_json() {
                Ok(json) => json != *saved,
                Err(_) => true,
            },
        }
    }

    pub fn last_saved(&self) -> Option<u64> {
        self.saved_at
    }
}
