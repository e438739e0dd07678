//! `CanvasEngine`: the single entry point the UI layer talks to.
//!
//! Owns the document and everything around it that is *not* content:
//! history, viewport, selection, the active gesture, live preview, the
//! clipboard and save bookkeeping. Every content change goes through
//! `History::execute`, so it is undoable; nothing else is.
//!
//! ## Pointer contract
//!
//! | Pointer-down on | Effect |
//! |-----------------|--------|
//! | anything, in panning mode | pan |
//! | a resize handle of a selected, unlocked element | resize |
//! | an element | click rules below, then drag if it ends up selected and unlocked |
//! | empty canvas | marquee |
//!
//! Click rules: shift adds, the secondary modifier toggles, a plain click
//! on an unselected element selects only it, and a plain click on an
//! already-selected element keeps the selection so a group drag can start.

use crate::clipboard::Clipboard;
use crate::commands::{History, HistoryEntry};
use crate::config::EditorConfig;
use crate::dirty::DirtyTracker;
use crate::gesture::{Gesture, GestureKind, GestureScope, PanSession};
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::marquee::MarqueeSession;
use crate::preview::LivePreview;
use crate::selection::Selection;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{self, DragSession, ResizeSession};
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};
use wd_core::{
    Background, CanvasResult, DocMutation, Document, Element, ElementId, ElementPatch, Layer,
    LayerColor, LayerId, LayerPatch, LayerRemoval, ZOrder,
};
use wd_render::{DisplayList, Overlay, build_display_list, hit_test, hit_test_handle, hit_test_rect};

pub struct CanvasEngine {
    doc: Document,
    history: History,
    selection: Selection,
    viewport: Viewport,
    preview: LivePreview,
    gesture: Option<Gesture>,
    clipboard: Clipboard,
    dirty: DirtyTracker,
    config: EditorConfig,
    /// Layers-panel selection. UI state, outside history.
    selected_layer: Option<LayerId>,
    /// Set when a marquee drag ends; swallows the trailing background click.
    just_finished_marquee: bool,
    context_menu_open: bool,
    text_input_focused: bool,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Drop for CanvasEngine {
    fn drop(&mut self) {
        self.abort_gesture();
    }
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("elements", &self.doc.elements.len())
            .field("layers", &self.doc.layers.len())
            .field("selection", &self.selection)
            .field("gesture", &self.active_gesture())
            .field("history", &self.history)
            .finish()
    }
}

impl CanvasEngine {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    pub fn with_document(doc: Document, config: EditorConfig) -> Self {
        let mut engine = Self {
            doc: Document::new(),
            history: History::new(config.history_limit),
            selection: Selection::new(),
            viewport: Viewport::new(&config),
            preview: LivePreview::new(),
            gesture: None,
            clipboard: Clipboard::new(),
            dirty: DirtyTracker::new(),
            config,
            selected_layer: None,
            just_finished_marquee: false,
            context_menu_open: false,
            text_input_focused: false,
        };
        engine.doc.replace(doc);
        engine
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.doc.element(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Live preview slot. Subscribe here for real-time geometry.
    pub fn preview(&self) -> &LivePreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut LivePreview {
        &mut self.preview
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(Gesture::kind)
    }

    /// Canvas-space marquee rectangle while a marquee is being dragged.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Some(Gesture::Marquee(m)) => Some(m.rect()),
            _ => None,
        }
    }

    pub fn just_finished_marquee(&self) -> bool {
        self.just_finished_marquee
    }

    /// End of the current UI tick: one-tick flags expire.
    pub fn tick(&mut self) {
        self.just_finished_marquee = false;
    }

    pub fn display_list(&self) -> DisplayList {
        build_display_list(
            &self.doc,
            &Overlay {
                view: self.viewport.transform(),
                selection: self.selection.ids(),
                live: &self.preview.current().bounds,
                marquee: self.marquee_rect(),
                marquee_threshold: self.config.marquee_threshold,
                handle_size: self.config.handle_size,
            },
        )
    }

    /// Topmost element under a screen position.
    pub fn element_at(&self, screen: Point) -> Option<ElementId> {
        hit_test(&self.doc, self.viewport.to_canvas(screen))
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Route a host event. Returns `true` if it was consumed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => {
                self.pointer_down(*position, *button, *modifiers);
                true
            }
            InputEvent::PointerMove { position, modifiers } => {
                self.pointer_move(*position, *modifiers);
                self.gesture.is_some()
            }
            InputEvent::PointerUp { position, modifiers } => {
                let active = self.gesture.is_some();
                self.pointer_up(*position, *modifiers);
                active
            }
            InputEvent::BackgroundClick => {
                self.click_empty_canvas();
                true
            }
            InputEvent::Wheel {
                position,
                delta_y,
                modifiers,
            } => {
                self.viewport.wheel(*position, *delta_y, modifiers.ctrl);
                true
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, *modifiers),
            InputEvent::KeyUp { key, .. } => self.key_up(key),
            InputEvent::Blur => {
                self.blur();
                true
            }
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, position: Point, button: PointerButton, modifiers: Modifiers) {
        self.just_finished_marquee = false;
        if let Some(kind) = self.active_gesture() {
            log::debug!("pointer down ignored: {kind:?} in progress");
            return;
        }

        match button {
            PointerButton::Primary => {}
            PointerButton::Secondary => {
                if let Some(id) = self.element_at(position)
                    && !self.selection.contains(id)
                {
                    self.selection.select(id);
                }
                self.context_menu_open = true;
                return;
            }
            PointerButton::Middle => return,
        }

        if self.viewport.is_panning_mode() {
            self.begin(Gesture::Pan(PanSession {
                anchor: self.viewport.pan_anchor(position),
            }));
            return;
        }

        if let Some((id, handle)) = hit_test_handle(
            &self.doc,
            self.selection.ids(),
            self.viewport.transform(),
            position,
            self.config.handle_size,
        ) && let Some(el) = self.doc.element(id)
        {
            let session = ResizeSession::begin(
                id,
                handle,
                el.bounds(),
                self.viewport.to_canvas(position),
                self.config.min_size,
            );
            self.history.begin_batch(&self.doc, &format!("Resize {}", el.name));
            self.begin(Gesture::Resize(session));
            return;
        }

        let canvas = self.viewport.to_canvas(position);
        if let Some(id) = hit_test(&self.doc, canvas) {
            self.context_menu_open = false;
            self.click_element(id, modifiers);
            if self.selection.contains(id) && !self.doc.is_locked(id) {
                self.begin_drag(id, canvas);
            }
            return;
        }

        self.begin(Gesture::Marquee(MarqueeSession::begin(
            canvas,
            self.config.marquee_threshold,
        )));
    }

    fn begin(&mut self, gesture: Gesture) {
        log::debug!("gesture begin: {:?}", gesture.kind());
        self.gesture = Some(gesture);
    }

    fn begin_drag(&mut self, anchor: ElementId, start: Point) {
        let movers: Vec<ElementId> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| !self.doc.is_locked(*id))
            .collect();
        let scale = self.viewport.scale();
        let session = DragSession::begin(&self.doc, anchor, &movers, start, scale);
        self.history.begin_batch(&self.doc, &format!("Move {}", describe(&self.doc, &movers)));
        self.begin(Gesture::Drag(session));
    }

    pub fn pointer_move(&mut self, position: Point, _modifiers: Modifiers) {
        match &mut self.gesture {
            None => {}
            Some(Gesture::Pan(pan)) => self.viewport.pan(pan.anchor, position),
            Some(Gesture::Marquee(marquee)) => {
                marquee.update(self.viewport.to_canvas(position));
                if marquee.has_extent() {
                    self.selection.set(hit_test_rect(&self.doc, marquee.rect()));
                }
            }
            Some(Gesture::Drag(drag)) => {
                let canvas = self.viewport.to_canvas(position);
                let preview = drag.update(canvas, self.viewport.scale());
                self.preview.publish(preview);
            }
            Some(Gesture::Resize(resize)) => {
                let rect = resize.update(self.viewport.to_canvas(position));
                let id = resize.id();
                let preview = resize.preview();
                self.history.execute(
                    &mut self.doc,
                    DocMutation::UpdateElement {
                        id,
                        patch: ElementPatch::bounds(rect),
                    },
                    "Resize",
                );
                self.preview.publish(preview);
            }
        }
    }

    pub fn pointer_up(&mut self, position: Point, modifiers: Modifiers) {
        self.pointer_move(position, modifiers);
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        log::debug!("gesture end: {:?}", gesture.kind());
        let grid = self.snap_grid();

        match gesture {
            Gesture::Pan(_) => {}
            Gesture::Marquee(marquee) => {
                if marquee.did_drag() {
                    self.just_finished_marquee = true;
                }
            }
            Gesture::Drag(drag) => {
                if drag.moved() {
                    self.history.execute(
                        &mut self.doc,
                        DocMutation::UpdateElements(drag.finish(grid)),
                        "Move",
                    );
                }
                self.history.end_batch(&self.doc);
                self.preview.clear();
            }
            Gesture::Resize(resize) => {
                if grid.is_some() {
                    self.history.execute(
                        &mut self.doc,
                        DocMutation::UpdateElement {
                            id: resize.id(),
                            patch: resize.finish(grid),
                        },
                        "Resize",
                    );
                }
                self.history.end_batch(&self.doc);
                self.preview.clear();
            }
        }
    }

    /// Abandon the active gesture. A drag or resize puts geometry back the
    /// way it was and records nothing. Returns whether anything was active.
    pub fn abort_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        log::debug!("gesture abort: {:?}", gesture.kind());
        if matches!(gesture, Gesture::Drag(_) | Gesture::Resize(_)) {
            self.history.abort_batch(&mut self.doc);
        }
        self.preview.clear();
        true
    }

    /// Drive one primary-button gesture within the caller's frame. Returns
    /// `None` if the press started no gesture (or one is already running).
    pub fn begin_gesture(
        &mut self,
        position: Point,
        modifiers: Modifiers,
    ) -> Option<GestureScope<'_>> {
        if self.gesture.is_some() {
            return None;
        }
        self.pointer_down(position, PointerButton::Primary, modifiers);
        let kind = self.active_gesture()?;
        Some(GestureScope::new(self, kind))
    }

    /// Window lost focus: nothing is held down any more.
    pub fn blur(&mut self) {
        self.abort_gesture();
        self.viewport.set_panning_mode(false);
    }

    fn snap_grid(&self) -> Option<f64> {
        self.doc
            .canvas
            .snap_to_grid
            .then_some(self.doc.canvas.grid_size)
    }

    // ─── Clicks ──────────────────────────────────────────────────────────

    /// Selection rules for a click on an element.
    pub fn click_element(&mut self, id: ElementId, modifiers: Modifiers) {
        if modifiers.shift {
            self.selection.add(id);
        } else if modifiers.secondary() {
            self.selection.toggle(id);
        } else if !self.selection.contains(id) {
            self.selection.select(id);
        }
    }

    /// A click on the empty background. Clears the selection unless it is
    /// the tail of a marquee drag or it closes a context menu.
    pub fn click_empty_canvas(&mut self) {
        if self.just_finished_marquee {
            self.just_finished_marquee = false;
            return;
        }
        if self.context_menu_open {
            self.context_menu_open = false;
            return;
        }
        self.selection.clear();
    }

    pub fn open_context_menu(&mut self) {
        self.context_menu_open = true;
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu_open = false;
    }

    pub fn is_context_menu_open(&self) -> bool {
        self.context_menu_open
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    pub fn set_text_input_focus(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    /// Returns `true` if the key was bound and acted on.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        if self.text_input_focused && action.conflicts_with_text_input() {
            return false;
        }
        self.run(action)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match ShortcutMap::resolve_release(key) {
            Some(action) => self.run(action),
            None => false,
        }
    }

    /// Perform a shortcut action. Actions that edit content are refused
    /// while a gesture is running.
    pub fn run(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Escape => {
                if !self.abort_gesture() {
                    self.selection.clear();
                    self.context_menu_open = false;
                }
                return true;
            }
            ShortcutAction::PanStart => {
                self.viewport.set_panning_mode(true);
                return true;
            }
            ShortcutAction::PanEnd => {
                self.viewport.set_panning_mode(false);
                if matches!(self.gesture, Some(Gesture::Pan(_))) {
                    self.gesture = None;
                }
                return true;
            }
            ShortcutAction::Copy => {
                self.copy();
                return true;
            }
            _ => {}
        }

        if let Some(kind) = self.active_gesture() {
            log::debug!("{action:?} refused during {kind:?}");
            return false;
        }

        let (small, large_step) = (self.config.nudge_step, self.config.nudge_step_large);
        let step = |large: bool| if large { large_step } else { small };
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected() > 0,
            ShortcutAction::SelectAll => {
                self.select_all();
                true
            }
            ShortcutAction::Cut => self.cut() > 0,
            ShortcutAction::Paste => !self.paste().is_empty(),
            ShortcutAction::NudgeLeft { large } => self.nudge(Vec2::new(-step(large), 0.0)),
            ShortcutAction::NudgeRight { large } => self.nudge(Vec2::new(step(large), 0.0)),
            ShortcutAction::NudgeUp { large } => self.nudge(Vec2::new(0.0, -step(large))),
            ShortcutAction::NudgeDown { large } => self.nudge(Vec2::new(0.0, step(large))),
            ShortcutAction::BringForward => self.reorder_selected(ZOrder::Forward),
            ShortcutAction::SendBackward => self.reorder_selected(ZOrder::Backward),
            ShortcutAction::BringToFront => self.reorder_selected(ZOrder::Front),
            ShortcutAction::SendToBack => self.reorder_selected(ZOrder::Back),
            ShortcutAction::Escape
            | ShortcutAction::PanStart
            | ShortcutAction::PanEnd
            | ShortcutAction::Copy => true,
        }
    }

    /// Move every selected, unlocked element by `delta` as one undo step.
    pub fn nudge(&mut self, delta: Vec2) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let updates = tools::nudge(&self.doc, self.selection.ids(), delta);
        if updates.is_empty() {
            return false;
        }
        self.history
            .execute(&mut self.doc, DocMutation::UpdateElements(updates), "Nudge")
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, scale: f64, offset_x: f64, offset_y: f64) {
        self.viewport.set_viewport(scale, offset_x, offset_y);
    }

    pub fn zoom_at_point(&mut self, pointer: Point, factor: f64) {
        self.viewport.zoom_at_point(pointer, factor);
    }

    pub fn wheel(&mut self, pointer: Point, delta_y: f64, ctrl: bool) {
        self.viewport.wheel(pointer, delta_y, ctrl);
    }

    pub fn set_panning_mode(&mut self, on: bool) {
        self.viewport.set_panning_mode(on);
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, id: ElementId) {
        self.selection.select(id);
    }

    pub fn toggle_selection(&mut self, id: ElementId) {
        self.selection.toggle(id);
    }

    pub fn add_to_selection(&mut self, id: ElementId) {
        self.selection.add(id);
    }

    pub fn select_multiple(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selection.select_multiple(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Every top-level element on a visible layer.
    pub fn select_all(&mut self) {
        let ids: Vec<ElementId> = self
            .doc
            .elements
            .top_level()
            .map(|el| el.id)
            .filter(|id| self.doc.is_visible(*id))
            .collect();
        self.selection.set(ids);
    }

    fn prune_selection(&mut self) {
        let doc = &self.doc;
        self.selection.retain(|id| doc.elements.contains(id));
        if let Some(layer) = self.selected_layer
            && !doc.layers.contains(layer)
        {
            self.selected_layer = None;
        }
    }

    // ─── Elements ────────────────────────────────────────────────────────

    pub fn add_element(&mut self, element: Element) -> bool {
        let description = format!("Add {}", element.name);
        self.history.execute(
            &mut self.doc,
            DocMutation::AddElement(Box::new(element)),
            &description,
        )
    }

    pub fn add_elements(&mut self, elements: Vec<Element>) -> bool {
        let description = format!("Add {} elements", elements.len());
        self.history
            .execute(&mut self.doc, DocMutation::AddElements(elements), &description)
    }

    /// Remove an element (and its children). Also drops it from the selection.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let removed = self
            .history
            .execute(&mut self.doc, DocMutation::RemoveElement { id }, "Delete");
        self.prune_selection();
        removed
    }

    pub fn remove_elements(&mut self, ids: Vec<ElementId>) -> bool {
        let removed = self
            .history
            .execute(&mut self.doc, DocMutation::RemoveElements { ids }, "Delete");
        self.prune_selection();
        removed
    }

    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::UpdateElement { id, patch }, "Update")
    }

    /// Bulk replace for loading. Not undoable; history is left alone.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.abort_gesture();
        let mut doc = std::mem::take(&mut self.doc);
        doc.elements.set_elements(elements);
        self.doc.replace(doc);
        self.prune_selection();
    }

    /// Replace the whole document for loading. Not undoable.
    pub fn load(&mut self, doc: Document) {
        self.abort_gesture();
        self.doc.replace(doc);
        self.prune_selection();
    }

    pub fn move_to_layer(&mut self, id: ElementId, layer: LayerId) -> bool {
        self.history.execute(
            &mut self.doc,
            DocMutation::MoveToLayer { id, layer },
            "Move to layer",
        )
    }

    /// Delete every selected element as one undo step.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<ElementId> = self.selection.ids().to_vec();
        let before = self.doc.elements.len();
        self.remove_elements(ids);
        self.selection.clear();
        before - self.doc.elements.len()
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    pub fn reorder(&mut self, id: ElementId, op: ZOrder) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::Reorder { id, op }, "Reorder")
    }

    pub fn move_to_front(&mut self, id: ElementId) -> bool {
        self.reorder(id, ZOrder::Front)
    }

    pub fn move_to_back(&mut self, id: ElementId) -> bool {
        self.reorder(id, ZOrder::Back)
    }

    pub fn move_forward(&mut self, id: ElementId) -> bool {
        self.reorder(id, ZOrder::Forward)
    }

    pub fn move_backward(&mut self, id: ElementId) -> bool {
        self.reorder(id, ZOrder::Backward)
    }

    /// Reorder every selected element as one undo step, keeping their
    /// relative order.
    pub fn reorder_selected(&mut self, op: ZOrder) -> bool {
        let mut ids: Vec<ElementId> = self
            .doc
            .paint_order()
            .into_iter()
            .filter(|id| self.selection.contains(*id))
            .collect();
        if ids.is_empty() {
            return false;
        }
        // Topmost first when moving up, so movers never leapfrog each other.
        if matches!(op, ZOrder::Forward | ZOrder::Back) {
            ids.reverse();
        }
        let mut changed = false;
        self.history.begin_batch(&self.doc, "Reorder");
        for id in ids {
            changed |= self
                .history
                .execute(&mut self.doc, DocMutation::Reorder { id, op }, "Reorder");
        }
        self.history.end_batch(&self.doc);
        changed
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    pub fn add_layer(&mut self, name: &str, color: LayerColor) -> LayerId {
        let id = LayerId::with_prefix("layer");
        self.history.execute(
            &mut self.doc,
            DocMutation::AddLayer {
                id,
                name: name.to_string(),
                color,
            },
            &format!("Add layer {name}"),
        );
        id
    }

    pub fn remove_layer(&mut self, id: LayerId, policy: LayerRemoval) -> bool {
        let removed = self.history.execute(
            &mut self.doc,
            DocMutation::RemoveLayer { id, policy },
            "Delete layer",
        );
        self.prune_selection();
        removed
    }

    pub fn update_layer(&mut self, id: LayerId, patch: LayerPatch) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::UpdateLayer { id, patch }, "Update layer")
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> bool {
        self.history.execute(
            &mut self.doc,
            DocMutation::ToggleLayerVisibility { id },
            "Toggle layer visibility",
        )
    }

    pub fn toggle_layer_lock(&mut self, id: LayerId) -> bool {
        self.history.execute(
            &mut self.doc,
            DocMutation::ToggleLayerLock { id },
            "Toggle layer lock",
        )
    }

    pub fn reorder_layers(&mut self, from: usize, to: usize) -> bool {
        self.history.execute(
            &mut self.doc,
            DocMutation::ReorderLayers { from, to },
            "Reorder layers",
        )
    }

    /// Bulk replace for loading. Not undoable.
    pub fn set_layers(&mut self, layers: Vec<Layer>) -> CanvasResult<()> {
        self.abort_gesture();
        let mut doc = self.doc.clone();
        doc.layers.set_layers(layers)?;
        self.doc.replace(doc);
        self.prune_selection();
        Ok(())
    }

    /// Bottom → top.
    pub fn layers_in_order(&self) -> Vec<&Layer> {
        self.doc.layers.layers_in_order()
    }

    pub fn select_layer(&mut self, id: Option<LayerId>) {
        self.selected_layer = id.filter(|id| self.doc.layers.contains(*id));
    }

    pub fn selected_layer_id(&self) -> Option<LayerId> {
        self.selected_layer
    }

    // ─── Canvas settings ─────────────────────────────────────────────────

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        self.history.execute(
            &mut self.doc,
            DocMutation::SetCanvasSize { width, height },
            "Canvas size",
        )
    }

    pub fn set_background(&mut self, background: Background) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::SetBackground(background), "Background")
    }

    pub fn set_snap_to_grid(&mut self, on: bool) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::SetSnapToGrid(on), "Snap to grid")
    }

    pub fn set_grid_size(&mut self, size: f64) -> bool {
        self.history
            .execute(&mut self.doc, DocMutation::SetGridSize(size), "Grid size")
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    pub fn copy(&mut self) -> usize {
        self.clipboard.copy(&self.doc, self.selection.ids())
    }

    pub fn cut(&mut self) -> usize {
        if self.copy() == 0 {
            return 0;
        }
        self.delete_selected()
    }

    /// Paste as one undo step and select exactly the pasted elements.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let pasted = self.clipboard.paste(self.config.paste_offset);
        let ids: Vec<ElementId> = pasted.iter().map(|el| el.id).collect();
        let description = format!("Paste {} elements", ids.len());
        self.history
            .execute(&mut self.doc, DocMutation::AddElements(pasted), &description);
        self.selection.set(ids.iter().copied());
        ids
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.undo_n(1) > 0
    }

    pub fn redo(&mut self) -> bool {
        self.redo_n(1) > 0
    }

    pub fn undo_n(&mut self, n: usize) -> usize {
        self.abort_gesture();
        let steps = self.history.undo_n(&mut self.doc, n);
        self.prune_selection();
        steps
    }

    pub fn redo_n(&mut self, n: usize) -> usize {
        self.abort_gesture();
        let steps = self.history.redo_n(&mut self.doc, n);
        self.prune_selection();
        steps
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.entries(&self.doc)
    }

    pub fn jump_to(&mut self, index: usize) -> usize {
        self.abort_gesture();
        let steps = self.history.jump_to(&mut self.doc, index);
        self.prune_selection();
        steps
    }

    pub fn clear_history(&mut self) {
        self.abort_gesture();
        self.history.clear();
    }

    // ─── Save state ──────────────────────────────────────────────────────

    pub fn mark_saved(&mut self, timestamp: u64) -> CanvasResult<()> {
        self.dirty.mark_saved(&self.doc, timestamp)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty(&self.doc)
    }

    pub fn last_saved(&self) -> Option<u64> {
        self.dirty.last_saved()
    }
}

/// "gain_knob" or "3 elements", for history descriptions.
fn describe(doc: &Document, ids: &[ElementId]) -> String {
    match ids {
        [id] => doc
            .element(*id)
            .map(|el| el.name.clone())
            .unwrap_or_else(|| id.to_string()),
        _ => format!("{} elements", ids.len()),
    }
}
