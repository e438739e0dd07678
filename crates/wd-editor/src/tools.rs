//! Manipulation tools: drag-move, handle resize and keyboard nudge.
//!
//! Each session turns pointer positions into provisional geometry
//! (`Preview`) while the gesture runs and into `ElementPatch`es when it
//! finishes. Sessions never touch the document themselves; the engine
//! decides when their output is applied and how it reaches history.
//!
//! ## Coordinate spaces
//!
//! Both sessions take canvas-space pointer positions, so a zoom or pan in
//! the middle of a gesture keeps the element under the pointer. The drag
//! anchor's screen offset is the canvas shift times the scale passed to
//! the latest `update`.

use crate::preview::{ActiveOffset, Preview};
use kurbo::{Point, Rect, Vec2};
use wd_core::{Document, ElementId, ElementPatch, snap};
use wd_render::ResizeHandle;

// ─── Drag ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The element under the pointer when the drag began.
    anchor: ElementId,
    start: Point,
    /// Committed bounds of every element that moves.
    origins: Vec<(ElementId, Rect)>,
    shift: Vec2,
    scale: f64,
}

impl DragSession {
    /// `movers` are the selected, unlocked elements that follow the pointer.
    pub fn begin(
        doc: &Document,
        anchor: ElementId,
        movers: &[ElementId],
        start: Point,
        scale: f64,
    ) -> Self {
        let origins = movers
            .iter()
            .filter_map(|id| doc.element(*id).map(|el| (*id, el.bounds())))
            .collect();
        Self {
            anchor,
            start,
            origins,
            shift: Vec2::ZERO,
            scale,
        }
    }

    /// `pointer` is in canvas space; `scale` is the zoom right now.
    pub fn update(&mut self, pointer: Point, scale: f64) -> Preview {
        self.shift = pointer - self.start;
        self.scale = scale;
        self.preview()
    }

    /// Every mover shifted by the same canvas-space delta; the anchor also
    /// gets that delta in screen pixels as its transform offset.
    pub fn preview(&self) -> Preview {
        let mut preview = Preview {
            bounds: self
                .origins
                .iter()
                .map(|(id, r)| (*id, *r + self.shift))
                .collect(),
            active: None,
        };
        if self.origins.iter().any(|(id, _)| *id == self.anchor) {
            preview.active = Some(ActiveOffset {
                id: self.anchor,
                offset: self.shift * self.scale,
            });
        }
        preview
    }

    pub fn moved(&self) -> bool {
        self.shift != Vec2::ZERO
    }

    /// Final positions. `grid` snaps x and y independently.
    pub fn finish(&self, grid: Option<f64>) -> Vec<(ElementId, ElementPatch)> {
        self.origins
            .iter()
            .map(|(id, r)| {
                let mut x = r.x0 + self.shift.x;
                let mut y = r.y0 + self.shift.y;
                if let Some(grid) = grid {
                    x = snap(x, grid);
                    y = snap(y, grid);
                }
                (*id, ElementPatch::position(x, y))
            })
            .collect()
    }
}

// ─── Resize ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    id: ElementId,
    handle: ResizeHandle,
    start: Point,
    start_bounds: Rect,
    current: Rect,
    min_size: f64,
}

impl ResizeSession {
    pub fn begin(
        id: ElementId,
        handle: ResizeHandle,
        start_bounds: Rect,
        start: Point,
        min_size: f64,
    ) -> Self {
        Self {
            id,
            handle,
            start,
            start_bounds,
            current: start_bounds,
            min_size,
        }
    }

    /// New bounds for the canvas-space pointer position. The engine writes
    /// these through to the store on every frame.
    pub fn update(&mut self, pointer: Point) -> Rect {
        let delta = pointer - self.start;
        self.current = resize_bounds(self.start_bounds, self.handle, delta, self.min_size);
        self.current
    }

    pub fn preview(&self) -> Preview {
        let mut preview = Preview::default();
        preview.bounds.insert(self.id, self.current);
        preview
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Final bounds, snapped if `grid` is set.
    pub fn finish(&self, grid: Option<f64>) -> ElementPatch {
        let rect = match grid {
            Some(grid) => snap_bounds(self.current, grid, self.min_size),
            None => self.current,
        };
        ElementPatch::bounds(rect)
    }
}

/// Apply a canvas-space pointer delta to `start` through `handle`.
///
/// The edge opposite each moved edge stays put. Width and height never go
/// below `min_size`; past that point the moved edge stops following the
/// pointer.
pub fn resize_bounds(start: Rect, handle: ResizeHandle, delta: Vec2, min_size: f64) -> Rect {
    let (sx, sy, sw, sh) = (start.x0, start.y0, start.width(), start.height());
    let (mut x, mut y, mut w, mut h) = (sx, sy, sw, sh);

    if handle.moves_right() {
        w = (sw + delta.x).max(min_size);
    }
    if handle.moves_left() {
        w = (sw - delta.x).max(min_size);
        x = sx + sw - w;
    }
    if handle.moves_bottom() {
        h = (sh + delta.y).max(min_size);
    }
    if handle.moves_top() {
        h = (sh - delta.y).max(min_size);
        y = sy + sh - h;
    }
    Rect::new(x, y, x + w, y + h)
}

/// Snap origin and size independently to `grid`. A size that would snap
/// below `min_size` goes up to the next grid multiple instead.
pub fn snap_bounds(rect: Rect, grid: f64, min_size: f64) -> Rect {
    let x = snap(rect.x0, grid);
    let y = snap(rect.y0, grid);
    let w = snap_size(rect.width(), grid, min_size);
    let h = snap_size(rect.height(), grid, min_size);
    Rect::new(x, y, x + w, y + h)
}

fn snap_size(v: f64, grid: f64, min_size: f64) -> f64 {
    let snapped = snap(v, grid);
    if snapped >= min_size || grid <= 0.0 {
        return snapped;
    }
    (min_size / grid).ceil() * grid
}

// ─── Nudge ───────────────────────────────────────────────────────────────

/// Position updates moving each of `ids` by `delta`. Locked elements
/// (directly or through their layer) and stale ids are skipped.
pub fn nudge(
    doc: &Document,
    ids: &[ElementId],
    delta: Vec2,
) -> Vec<(ElementId, ElementPatch)> {
    ids.iter()
        .filter(|id| !doc.is_locked(**id))
        .filter_map(|id| doc.element(*id))
        .map(|el| (el.id, ElementPatch::position(el.x + delta.x, el.y + delta.y)))
        .collect()
}
