//! Z-order: effective paint order and the front/back/forward/backward moves.
//!
//! Paint order has exactly one source of truth, the `PaintKey`:
//! layer order first (bottom → top), then array position in the store.
//! `Element::z_index` is rewritten from it by [`reindex`] and is never read
//! back as an input.
//!
//! Moves only ever reorder an element among *same-layer* siblings. Other
//! layers' elements keep their array slots, so a move never changes which
//! layer an element paints in. Moving across layers is `move_to_layer`.

use crate::id::{ElementId, LayerId};
use crate::layers::LayerStack;
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZOrder {
    Front,
    Back,
    Forward,
    Backward,
}

/// Sort key for painting. Compares layer order, then array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintKey {
    pub layer_order: usize,
    pub index: usize,
}

pub fn paint_key(store: &ElementStore, layers: &LayerStack, id: ElementId) -> Option<PaintKey> {
    let index = store.position(id)?;
    let el = &store.as_slice()[index];
    Some(PaintKey {
        layer_order: layers.resolve(el.layer_id).order,
        index,
    })
}

/// All element ids, bottom-most first.
pub fn paint_order(store: &ElementStore, layers: &LayerStack) -> Vec<ElementId> {
    let mut keyed: Vec<(PaintKey, ElementId)> = store
        .iter()
        .enumerate()
        .map(|(index, el)| {
            let key = PaintKey {
                layer_order: layers.resolve(el.layer_id).order,
                index,
            };
            (key, el.id)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, id)| id).collect()
}

/// Rewrite every element's `z_index` to its rank in paint order.
pub fn reindex(store: &mut ElementStore, layers: &LayerStack) {
    let order = paint_order(store, layers);
    for (rank, id) in order.into_iter().enumerate() {
        if let Some(el) = store.get_mut(id) {
            el.z_index = rank as u32;
        }
    }
}

/// Apply a z-order move. Returns `true` if the array changed.
pub fn apply(store: &mut ElementStore, layers: &LayerStack, id: ElementId, op: ZOrder) -> bool {
    match op {
        ZOrder::Front => move_to_front(store, layers, id),
        ZOrder::Back => move_to_back(store, layers, id),
        ZOrder::Forward => move_forward(store, layers, id),
        ZOrder::Backward => move_backward(store, layers, id),
    }
}

/// Array indices of elements sharing `id`'s effective layer (ascending),
/// plus the index of `id` itself.
fn siblings(
    store: &ElementStore,
    layers: &LayerStack,
    id: ElementId,
) -> Option<(usize, Vec<usize>)> {
    let index = store.position(id)?;
    let layer: LayerId = layers.resolve(store.as_slice()[index].layer_id).id;
    let slots = store
        .iter()
        .enumerate()
        .filter(|(_, el)| layers.resolve(el.layer_id).id == layer)
        .map(|(i, _)| i)
        .collect();
    Some((index, slots))
}

pub fn move_to_front(store: &mut ElementStore, layers: &LayerStack, id: ElementId) -> bool {
    let Some((index, slots)) = siblings(store, layers, id) else {
        return false;
    };
    let Some(&last) = slots.last() else {
        return false;
    };
    if index == last {
        return false;
    }
    let elements = store.as_mut_vec();
    let el = elements.remove(index);
    // `last` shifted down by one; inserting at it lands right after it.
    elements.insert(last, el);
    true
}

pub fn move_to_back(store: &mut ElementStore, layers: &LayerStack, id: ElementId) -> bool {
    let Some((index, slots)) = siblings(store, layers, id) else {
        return false;
    };
    let Some(&first) = slots.first() else {
        return false;
    };
    if index == first {
        return false;
    }
    let elements = store.as_mut_vec();
    let el = elements.remove(index);
    elements.insert(first, el);
    true
}

pub fn move_forward(store: &mut ElementStore, layers: &LayerStack, id: ElementId) -> bool {
    let Some((index, slots)) = siblings(store, layers, id) else {
        return false;
    };
    match slots.iter().find(|&&i| i > index) {
        Some(&next) => {
            store.as_mut_vec().swap(index, next);
            true
        }
        None => false,
    }
}

pub fn move_backward(store: &mut ElementStore, layers: &LayerStack, id: ElementId) -> bool {
    let Some((index, slots)) = siblings(store, layers, id) else {
        return false;
    };
    match slots.iter().rev().find(|&&i| i < index) {
        Some(&prev) => {
            store.as_mut_vec().swap(index, prev);
            true
        }
        None => false,
    }
}
