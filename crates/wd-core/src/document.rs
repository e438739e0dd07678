//! The durable document and the single mutation vocabulary over it.
//!
//! `Document` is everything that is content: elements, layers and canvas
//! settings. It is exactly what a history snapshot captures. Camera state,
//! selection, live previews and save bookkeeping live elsewhere and are
//! therefore never undoable.
//!
//! Every content change is expressed as a `DocMutation` so the editor can
//! route it through the history stack.

use crate::error::{CanvasError, CanvasResult};
use crate::id::{ElementId, LayerId};
use crate::layers::LayerStack;
use crate::model::{Background, CanvasSettings, Element, ElementPatch, LayerColor, LayerPatch};
use crate::order::{self, ZOrder};
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// What happens to a deleted layer's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerRemoval {
    /// Delete the member elements along with the layer.
    DeleteElements,
    /// Move the member elements onto the default layer.
    ReassignToDefault,
}

/// A content mutation. Applying one returns whether anything changed.
#[derive(Debug, Clone, PartialEq)]
pub enum DocMutation {
    AddElement(Box<Element>),
    AddElements(Vec<Element>),
    RemoveElement {
        id: ElementId,
    },
    RemoveElements {
        ids: Vec<ElementId>,
    },
    UpdateElement {
        id: ElementId,
        patch: ElementPatch,
    },
    /// Several element updates applied as one step (multi-select drag, nudge).
    UpdateElements(Vec<(ElementId, ElementPatch)>),
    Reorder {
        id: ElementId,
        op: ZOrder,
    },
    MoveToLayer {
        id: ElementId,
        layer: LayerId,
    },
    AddLayer {
        id: LayerId,
        name: String,
        color: LayerColor,
    },
    RemoveLayer {
        id: LayerId,
        policy: LayerRemoval,
    },
    UpdateLayer {
        id: LayerId,
        patch: LayerPatch,
    },
    ToggleLayerVisibility {
        id: LayerId,
    },
    ToggleLayerLock {
        id: LayerId,
    },
    ReorderLayers {
        from: usize,
        to: usize,
    },
    SetCanvasSize {
        width: f64,
        height: f64,
    },
    SetBackground(Background),
    SetSnapToGrid(bool),
    SetGridSize(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub elements: ElementStore,
    pub layers: LayerStack,
    pub canvas: CanvasSettings,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mutation. Stale ids and no-op values report `false`.
    pub fn apply(&mut self, mutation: DocMutation) -> bool {
        let changed = match mutation {
            DocMutation::AddElement(el) => self.elements.add(*el),
            DocMutation::AddElements(els) => self.elements.add_many(els) > 0,
            DocMutation::RemoveElement { id } => self.remove_element_tree(&[id]) > 0,
            DocMutation::RemoveElements { ids } => self.remove_element_tree(&ids) > 0,
            DocMutation::UpdateElement { id, patch } => self.elements.update(id, &patch),
            DocMutation::UpdateElements(updates) => {
                let mut any = false;
                for (id, patch) in &updates {
                    any |= self.elements.update(*id, patch);
                }
                any
            }
            DocMutation::Reorder { id, op } => {
                order::apply(&mut self.elements, &self.layers, id, op)
            }
            DocMutation::MoveToLayer { id, layer } => self.elements.move_to_layer(id, layer),
            DocMutation::AddLayer { id, name, color } => self.layers.insert_layer(id, &name, color),
            DocMutation::RemoveLayer { id, policy } => self.remove_layer(id, policy),
            DocMutation::UpdateLayer { id, patch } => self.layers.update_layer(id, &patch),
            DocMutation::ToggleLayerVisibility { id } => self.layers.toggle_visibility(id),
            DocMutation::ToggleLayerLock { id } => self.layers.toggle_lock(id),
            DocMutation::ReorderLayers { from, to } => self.layers.reorder_layers(from, to),
            DocMutation::SetCanvasSize { width, height } => {
                let changed = self.canvas.width != width || self.canvas.height != height;
                self.canvas.width = width;
                self.canvas.height = height;
                changed
            }
            DocMutation::SetBackground(background) => {
                let changed = self.canvas.background != background;
                self.canvas.background = background;
                changed
            }
            DocMutation::SetSnapToGrid(on) => {
                let changed = self.canvas.snap_to_grid != on;
                self.canvas.snap_to_grid = on;
                changed
            }
            DocMutation::SetGridSize(size) => {
                let changed = self.canvas.grid_size != size;
                self.canvas.grid_size = size;
                changed
            }
        };
        if changed {
            order::reindex(&mut self.elements, &self.layers);
        }
        changed
    }

    /// Remove elements and, transitively, their children.
    fn remove_element_tree(&mut self, ids: &[ElementId]) -> usize {
        let mut doomed: SmallVec<[ElementId; 8]> = ids.iter().copied().collect();
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            for child in self.elements.children_of(parent) {
                if !doomed.contains(&child.id) {
                    doomed.push(child.id);
                }
            }
            cursor += 1;
        }
        self.elements.remove_many(&doomed).len()
    }

    fn remove_layer(&mut self, id: LayerId, policy: LayerRemoval) -> bool {
        if id.is_default() || !self.layers.contains(id) {
            // Let the stack log the refusal for `default`.
            return self.layers.remove_layer(id).is_some();
        }
        let members: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|el| el.layer_id == Some(id))
            .map(|el| el.id)
            .collect();
        match policy {
            LayerRemoval::DeleteElements => {
                self.remove_element_tree(&members);
            }
            LayerRemoval::ReassignToDefault => {
                for member in members {
                    self.elements.move_to_layer(member, LayerId::default_layer());
                }
            }
        }
        self.layers.remove_layer(id).is_some()
    }

    /// Bulk replace for loading. Not a history step.
    pub fn replace(&mut self, other: Document) {
        *self = other;
        order::reindex(&mut self.elements, &self.layers);
    }

    // ─── Element-level queries ───────────────────────────────────────────

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Element flag AND its layer's flag.
    pub fn is_locked(&self, id: ElementId) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.locked || self.layers.resolve(el.layer_id).locked)
    }

    /// Element flag AND its layer's flag.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.visible && self.layers.resolve(el.layer_id).visible)
    }

    pub fn layer_visible(&self, el: &Element) -> bool {
        self.layers.resolve(el.layer_id).visible
    }

    /// Ids bottom-most first.
    pub fn paint_order(&self) -> Vec<ElementId> {
        order::paint_order(&self.elements, &self.layers)
    }

    // ─── Serialization ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> CanvasResult<Snapshot> {
        Snapshot::encode(self)
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(CanvasError::from)
    }

    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        order::reindex(&mut doc.elements, &doc.layers);
        Ok(doc)
    }
}

/// An immutable, encoded capture of a `Document` (MessagePack).
///
/// Cheap to clone; equality is byte equality, which is how the history
/// stack tells a real change from a no-op.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Arc<[u8]>,
}

impl Snapshot {
    pub fn encode(doc: &Document) -> CanvasResult<Self> {
        let bytes = rmp_serde::to_vec_named(doc)?;
        Ok(Self {
            bytes: bytes.into(),
        })
    }

    pub fn decode(&self) -> CanvasResult<Document> {
        let doc = rmp_serde::from_slice(&self.bytes)?;
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Snapshot({} bytes)", self.bytes.len())
    }
}
