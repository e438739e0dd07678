//! Undo/Redo history.
//!
//! Every content mutation goes through [`History::execute`], which captures
//! a `Snapshot` of the document *before* the change. Undo swaps the current
//! document for the newest past snapshot; redo swaps it back.
//!
//! Gestures use **snapshot batching**: `begin_batch` captures the document
//! when the gesture starts, mutations inside the batch are applied live
//! without history entries, and `end_batch` pushes the captured snapshot
//! once, only if the document actually changed.
//!
//! Viewport, selection, live preview and save bookkeeping live outside
//! `Document`, so no snapshot ever contains them.

use std::collections::VecDeque;
use wd_core::{DocMutation, Document, Element, ElementId, Snapshot};

/// One recorded step: the state before it, and what it was.
#[derive(Debug, Clone)]
struct Step {
    before: Snapshot,
    description: String,
}

pub struct History {
    past: VecDeque<Step>,
    future: Vec<Step>,
    /// Maximum undo depth.
    limit: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Snapshot captured at the start of a batch.
    batch_snapshot: Option<Snapshot>,
    batch_description: String,
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("past", &self.past.len())
            .field("future", &self.future.len())
            .field("limit", &self.limit)
            .field("batch_depth", &self.batch_depth)
            .finish()
    }
}

fn capture(doc: &Document) -> Option<Snapshot> {
    match doc.snapshot() {
        Ok(snap) => Some(snap),
        Err(err) => {
            log::error!("history snapshot failed: {err}");
            None
        }
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(limit.min(64)),
            future: Vec::new(),
            limit,
            batch_depth: 0,
            batch_snapshot: None,
            batch_description: String::new(),
        }
    }

    /// Apply a mutation and record it as one undo step.
    ///
    /// Inside a batch the mutation is applied live and folded into the
    /// batch's single step. Mutations that change nothing leave history
    /// untouched.
    pub fn execute(
        &mut self,
        doc: &mut Document,
        mutation: DocMutation,
        description: &str,
    ) -> bool {
        if self.batch_depth > 0 {
            return doc.apply(mutation);
        }
        let before = capture(doc);
        let changed = doc.apply(mutation);
        if changed && let Some(before) = before {
            self.push(before, description);
        }
        changed
    }

    /// Start a batch group. Nested calls only bump the depth.
    pub fn begin_batch(&mut self, doc: &Document, description: &str) {
        if self.batch_depth == 0 {
            self.batch_snapshot = capture(doc);
            self.batch_description = description.to_string();
        }
        self.batch_depth += 1;
    }

    /// End a batch group. When the outermost batch closes, push one step
    /// if the document differs from the captured snapshot.
    pub fn end_batch(&mut self, doc: &Document) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        let Some(before) = self.batch_snapshot.take() else {
            return;
        };
        if capture(doc).is_some_and(|after| after != before) {
            let description = std::mem::take(&mut self.batch_description);
            self.push(before, &description);
        }
    }

    /// Close every open batch and restore the document captured when the
    /// outermost one began. Nothing is recorded.
    pub fn abort_batch(&mut self, doc: &mut Document) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth = 0;
        self.batch_description.clear();
        if let Some(before) = self.batch_snapshot.take() {
            restore(doc, &before);
        }
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    fn push(&mut self, before: Snapshot, description: &str) {
        log::debug!("history push: {description}");
        self.past.push_back(Step {
            before,
            description: description.to_string(),
        });
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Undo the last step. Returns its description.
    pub fn undo(&mut self, doc: &mut Document) -> Option<String> {
        let step = self.past.pop_back()?;
        let Some(current) = capture(doc) else {
            self.past.push_back(step);
            return None;
        };
        if !restore(doc, &step.before) {
            self.past.push_back(step);
            return None;
        }
        let description = step.description.clone();
        self.future.push(Step {
            before: current,
            description: step.description,
        });
        Some(description)
    }

    /// Redo the last undone step. Returns its description.
    pub fn redo(&mut self, doc: &mut Document) -> Option<String> {
        let step = self.future.pop()?;
        let Some(current) = capture(doc) else {
            self.future.push(step);
            return None;
        };
        if !restore(doc, &step.before) {
            self.future.push(step);
            return None;
        }
        let description = step.description.clone();
        self.past.push_back(Step {
            before: current,
            description: step.description,
        });
        Some(description)
    }

    /// Undo up to `n` steps. Returns how many were undone.
    pub fn undo_n(&mut self, doc: &mut Document, n: usize) -> usize {
        (0..n).take_while(|_| self.undo(doc).is_some()).count()
    }

    pub fn redo_n(&mut self, doc: &mut Document, n: usize) -> usize {
        (0..n).take_while(|_| self.redo(doc).is_some()).count()
    }

    /// Move to timeline position `index` (see [`History::entries`]).
    pub fn jump_to(&mut self, doc: &mut Document, index: usize) -> usize {
        let current = self.past.len();
        if index < current {
            self.undo_n(doc, current - index)
        } else {
            self.redo_n(doc, index - current)
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch_depth = 0;
        self.batch_snapshot = None;
        self.batch_description.clear();
    }

    /// The whole timeline for a history panel: past states oldest first,
    /// then the current document, then future states nearest first.
    pub fn entries(&self, current: &Document) -> Vec<HistoryEntry> {
        // Each state is labelled by the step that produced it.
        let mut states: Vec<(Option<Document>, &str)> = Vec::new();
        let mut produced_by = "";
        for step in &self.past {
            states.push((step.before.decode().ok(), produced_by));
            produced_by = &step.description;
        }
        let current_index = states.len();
        states.push((Some(current.clone()), produced_by));
        for step in self.future.iter().rev() {
            states.push((step.before.decode().ok(), &step.description));
        }

        let mut entries = Vec::with_capacity(states.len());
        let mut previous: Option<&Document> = None;
        for (index, (state, description)) in states.iter().enumerate() {
            let (action, affected, element_count) = match state {
                Some(doc) => (
                    infer_action(previous, doc),
                    affected_elements(previous, doc),
                    doc.elements.len(),
                ),
                None => (HistoryAction::Update, Vec::new(), 0),
            };
            entries.push(HistoryEntry {
                index,
                action,
                affected,
                element_count,
                description: description.to_string(),
                is_current: index == current_index,
                is_future: index > current_index,
            });
            previous = state.as_ref();
        }
        entries
    }
}

/// Decode `snap` into `doc`. Returns `false` (document untouched) on failure.
fn restore(doc: &mut Document, snap: &Snapshot) -> bool {
    match snap.decode() {
        Ok(restored) => {
            *doc = restored;
            true
        }
        Err(err) => {
            log::error!("history restore failed: {err}");
            false
        }
    }
}

// ─── History panel ───────────────────────────────────────────────────────

/// What a history step did, inferred by diffing adjacent states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Initial,
    Add,
    Delete,
    Move,
    Resize,
    Update,
    Canvas,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Timeline position, usable with [`History::jump_to`].
    pub index: usize,
    pub action: HistoryAction,
    /// Display names of the elements involved.
    pub affected: Vec<String>,
    pub element_count: usize,
    pub description: String,
    pub is_current: bool,
    pub is_future: bool,
}

/// Priority: canvas settings, count grows, count shrinks, first position
/// change, first size change, anything else.
pub fn infer_action(before: Option<&Document>, after: &Document) -> HistoryAction {
    let Some(before) = before else {
        return HistoryAction::Initial;
    };
    if before.canvas != after.canvas {
        return HistoryAction::Canvas;
    }
    let (nb, na) = (before.elements.len(), after.elements.len());
    if na > nb {
        return HistoryAction::Add;
    }
    if na < nb {
        return HistoryAction::Delete;
    }
    for el in after.elements.iter() {
        let Some(old) = before.elements.get(el.id) else {
            continue;
        };
        if old.x != el.x || old.y != el.y {
            return HistoryAction::Move;
        }
        if old.width != el.width || old.height != el.height {
            return HistoryAction::Resize;
        }
    }
    HistoryAction::Update
}

/// Names of added and removed elements, or of changed ones if none were
/// added or removed. The initial entry lists up to three elements.
pub fn affected_elements(before: Option<&Document>, after: &Document) -> Vec<String> {
    let Some(before) = before else {
        return after.elements.iter().take(3).map(|el| el.name.clone()).collect();
    };
    let name = |el: &Element| el.name.clone();
    let missing_from = |doc: &Document, id: ElementId| !doc.elements.contains(id);

    let mut names: Vec<String> = after
        .elements
        .iter()
        .filter(|el| missing_from(before, el.id))
        .map(name)
        .collect();
    names.extend(
        before
            .elements
            .iter()
            .filter(|el| missing_from(after, el.id))
            .map(name),
    );
    if names.is_empty() {
        names = after
            .elements
            .iter()
            .filter(|el| before.elements.get(el.id).is_some_and(|old| old != *el))
            .map(name)
            .collect();
    }
    names
}
