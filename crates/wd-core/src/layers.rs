//! Layer stack: ordered, named groups that set the primary paint order.
//!
//! Invariants kept by every operation:
//! - the `default` layer always exists and always has order 0;
//! - `order` values form a dense permutation of `0..len`.

use crate::error::CanvasError;
use crate::id::LayerId;
use crate::model::{Layer, LayerColor, LayerPatch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Returned by `resolve` if the default layer were ever missing.
static FALLBACK_DEFAULT: LazyLock<Layer> = LazyLock::new(Layer::default_layer);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Layer>> for LayerStack {
    type Error = CanvasError;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        let mut stack = Self::new();
        stack.set_layers(layers)?;
        Ok(stack)
    }
}

impl From<LayerStack> for Vec<Layer> {
    fn from(stack: LayerStack) -> Self {
        stack.layers
    }
}

impl LayerStack {
    /// A stack holding only the default layer.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::default_layer()],
        }
    }

    /// Add a layer on top. Returns its generated id.
    pub fn add_layer(&mut self, name: &str, color: LayerColor) -> LayerId {
        let id = LayerId::with_prefix("layer");
        self.insert_layer(id, name, color);
        id
    }

    /// Add a layer with a caller-chosen id on top. An existing id is a no-op.
    pub fn insert_layer(&mut self, id: LayerId, name: &str, color: LayerColor) -> bool {
        if self.contains(id) {
            return false;
        }
        self.layers.push(Layer {
            id,
            name: name.to_string(),
            color,
            order: self.layers.len(),
            visible: true,
            locked: false,
        });
        true
    }

    /// Remove a non-default layer and close the gap in `order`.
    ///
    /// Member elements are the caller's concern (see `Document`).
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        if id.is_default() {
            log::warn!("cannot delete the default layer");
            return None;
        }
        let index = self.layers.iter().position(|l| l.id == id)?;
        let removed = self.layers.remove(index);
        self.normalize();
        Some(removed)
    }

    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) -> bool {
        let Some(layer) = self.get_mut(id) else {
            return false;
        };
        let before = layer.clone();
        if let Some(name) = &patch.name {
            layer.name.clone_from(name);
        }
        if let Some(color) = patch.color {
            layer.color = color;
        }
        if let Some(visible) = patch.visible {
            layer.visible = visible;
        }
        if let Some(locked) = patch.locked {
            layer.locked = locked;
        }
        *layer != before
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> bool {
        match self.get_mut(id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    pub fn toggle_lock(&mut self, id: LayerId) -> bool {
        match self.get_mut(id) {
            Some(layer) => {
                layer.locked = !layer.locked;
                true
            }
            None => false,
        }
    }

    /// Move the layer at bottom→top index `from` to index `to`.
    ///
    /// The default layer cannot move, and nothing can be dropped below it.
    pub fn reorder_layers(&mut self, from: usize, to: usize) -> bool {
        let mut sorted = self.layers.clone();
        sorted.sort_by_key(|l| l.order);

        let Some(moving) = sorted.get(from) else {
            return false;
        };
        if moving.id.is_default() {
            log::warn!("cannot reorder the default layer");
            return false;
        }
        if to == 0 {
            log::warn!("cannot place a layer below the default layer");
            return false;
        }
        if from == to {
            return false;
        }

        let removed = sorted.remove(from);
        let to = to.min(sorted.len());
        sorted.insert(to, removed);
        for (order, layer) in sorted.iter_mut().enumerate() {
            layer.order = order;
        }
        self.layers = sorted;
        true
    }

    /// Bulk replace from persistence. Restores a missing default layer and
    /// re-densifies `order`, keeping the relative order of the input.
    pub fn set_layers(&mut self, layers: Vec<Layer>) -> Result<(), CanvasError> {
        let mut seen = HashSet::new();
        for layer in &layers {
            if !seen.insert(layer.id) {
                return Err(CanvasError::InvalidLayers(format!(
                    "duplicate layer id `{}`",
                    layer.id
                )));
            }
        }
        self.layers = layers;
        if !self.layers.iter().any(|l| l.id.is_default()) {
            self.layers.push(Layer::default_layer());
        }
        self.normalize();
        Ok(())
    }

    /// Sort by order with default first, then renumber `0..len`.
    fn normalize(&mut self) {
        self.layers.sort_by_key(|l| (!l.id.is_default(), l.order));
        for (order, layer) in self.layers.iter_mut().enumerate() {
            layer.order = order;
        }
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn default_layer(&self) -> &Layer {
        self.get(LayerId::default_layer()).unwrap_or(&FALLBACK_DEFAULT)
    }

    /// The layer an element effectively belongs to. Unknown ids fall back
    /// to the default layer.
    pub fn resolve(&self, id: Option<LayerId>) -> &Layer {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_layer())
    }

    /// Bottom → top.
    pub fn layers_in_order(&self) -> Vec<&Layer> {
        let mut sorted: Vec<&Layer> = self.layers.iter().collect();
        sorted.sort_by_key(|l| l.order);
        sorted
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Whether `order` is a dense permutation of `0..len`.
    pub fn is_dense(&self) -> bool {
        let mut orders: Vec<usize> = self.layers.iter().map(|l| l.order).collect();
        orders.sort_unstable();
        orders.iter().enumerate().all(|(i, o)| i == *o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(stack: &LayerStack) -> Vec<String> {
        stack
            .layers_in_order()
            .iter()
            .map(|l| l.name.clone())
            .collect()
    }

    #[test]
    fn starts_with_default() {
        let stack = LayerStack::new();
        assert_eq!(stack.len(), 1);
        assert!(stack.default_layer().id.is_default());
        assert_eq!(stack.default_layer().order, 0);
    }

    #[test]
    fn add_puts_layer_on_top() {
        let mut stack = LayerStack::new();
        stack.add_layer("Knobs", LayerColor::Blue);
        stack.add_layer("Labels", LayerColor::Green);
        assert_eq!(names(&stack), vec!["Default", "Knobs", "Labels"]);
        assert!(stack.is_dense());
    }

    #[test]
    fn default_cannot_be_removed() {
        let mut stack = LayerStack::new();
        assert!(stack.remove_layer(LayerId::default_layer()).is_none());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn remove_closes_order_gap() {
        let mut stack = LayerStack::new();
        let a = stack.add_layer("A", LayerColor::Red);
        stack.add_layer("B", LayerColor::Red);
        stack.remove_layer(a);
        assert_eq!(names(&stack), vec!["Default", "B"]);
        assert!(stack.is_dense());
    }

    #[test]
    fn reorder_rules() {
        let mut stack = LayerStack::new();
        stack.add_layer("A", LayerColor::Red);
        stack.add_layer("B", LayerColor::Red);
        stack.add_layer("C", LayerColor::Red);

        // Default layer is pinned.
        assert!(!stack.reorder_layers(0, 2));
        // Nothing goes below default.
        assert!(!stack.reorder_layers(3, 0));

        assert!(stack.reorder_layers(3, 1));
        assert_eq!(names(&stack), vec!["Default", "C", "A", "B"]);
        assert!(stack.is_dense());
    }

    #[test]
    fn unknown_layer_resolves_to_default() {
        let stack = LayerStack::new();
        let layer = stack.resolve(Some(LayerId::intern("deleted_long_ago")));
        assert!(layer.id.is_default());
        assert!(stack.resolve(None).id.is_default());
    }

    #[test]
    fn set_layers_restores_default_and_densifies() {
        let mut stack = LayerStack::new();
        let layers = vec![
            Layer {
                id: LayerId::intern("top"),
                name: "Top".into(),
                color: LayerColor::Purple,
                order: 7,
                visible: true,
                locked: false,
            },
            Layer {
                id: LayerId::intern("mid"),
                name: "Mid".into(),
                color: LayerColor::Yellow,
                order: 3,
                visible: false,
                locked: true,
            },
        ];
        stack.set_layers(layers).unwrap();
        assert_eq!(names(&stack), vec!["Default", "Mid", "Top"]);
        assert!(stack.is_dense());
    }

    #[test]
    fn set_layers_rejects_duplicates() {
        let mut stack = LayerStack::new();
        let dup = Layer {
            id: LayerId::intern("twice"),
            name: "Twice".into(),
            color: LayerColor::Gray,
            order: 1,
            visible: true,
            locked: false,
        };
        let err = stack.set_layers(vec![dup.clone(), dup]).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidLayers(_)));
        // Stack untouched on error.
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut stack = LayerStack::new();
        let id = stack.add_layer("Meters", LayerColor::Orange);
        stack.toggle_visibility(id);
        stack.toggle_lock(id);
        let layer = stack.get(id).unwrap();
        assert!(!layer.visible);
        assert!(layer.locked);
        assert!(!stack.toggle_lock(LayerId::intern("ghost")));
    }
}
