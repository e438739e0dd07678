//! Viewport: the camera over the canvas.
//!
//! Holds the scale/offset transform and the panning-mode flag. None of
//! this is document content, so nothing here ever reaches history.
//!
//! ```text
//! screen = canvas * scale + offset
//! ```

use crate::config::EditorConfig;
use kurbo::{Point, Vec2};
use wd_core::ViewTransform;

#[derive(Debug, Clone)]
pub struct Viewport {
    transform: ViewTransform,
    min_scale: f64,
    max_scale: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    /// Held-modifier pan mode (space bar). Pointer-down pans instead of
    /// selecting or manipulating while set.
    panning: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            panning: false,
        }
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.transform.offset
    }

    /// Write the transform. Scale is clamped; offsets are free.
    pub fn set_viewport(&mut self, scale: f64, offset_x: f64, offset_y: f64) {
        self.transform = ViewTransform::new(self.clamp_scale(scale), Vec2::new(offset_x, offset_y));
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.transform.scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Multiply the scale by `factor`, keeping the canvas point under
    /// `pointer` fixed on screen.
    pub fn zoom_at_point(&mut self, pointer: Point, factor: f64) {
        let anchor = self.transform.to_canvas(pointer);
        let scale = self.clamp_scale(self.transform.scale * factor);
        let offset = pointer.to_vec2() - anchor.to_vec2() * scale;
        self.transform = ViewTransform::new(scale, offset);
    }

    /// One wheel step. Scrolling down zooms out; a trackpad pinch arrives
    /// with `ctrl` set and reversed sign. A zero delta does nothing.
    pub fn wheel(&mut self, pointer: Point, delta_y: f64, ctrl: bool) {
        let delta = if ctrl { -delta_y } else { delta_y };
        if delta == 0.0 {
            return;
        }
        let factor = if delta < 0.0 {
            self.zoom_in_factor
        } else {
            self.zoom_out_factor
        };
        self.zoom_at_point(pointer, factor);
    }

    pub fn set_panning_mode(&mut self, on: bool) {
        self.panning = on;
    }

    pub fn is_panning_mode(&self) -> bool {
        self.panning
    }

    /// Pointer position relative to the current offset. Feeding it back to
    /// [`Viewport::pan`] keeps the grabbed canvas point under the cursor.
    pub fn pan_anchor(&self, pointer: Point) -> Vec2 {
        pointer.to_vec2() - self.transform.offset
    }

    pub fn pan(&mut self, anchor: Vec2, pointer: Point) {
        self.transform.offset = pointer.to_vec2() - anchor;
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        self.transform.to_canvas(screen)
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        self.transform.to_screen(canvas)
    }
}
