//! Marquee (rubber-band) selection session.
//!
//! Start and current points are canvas space. The session only tracks
//! geometry; the engine turns the rectangle into a selection with
//! `wd_render::hit_test_rect` on every move.

use kurbo::{Point, Rect};
use wd_core::rect_from_drag;

#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeSession {
    start: Point,
    current: Point,
    /// Moved past the threshold at some point during the gesture.
    did_drag: bool,
    threshold: f64,
}

impl MarqueeSession {
    pub fn begin(start: Point, threshold: f64) -> Self {
        Self {
            start,
            current: start,
            did_drag: false,
            threshold,
        }
    }

    pub fn update(&mut self, current: Point) {
        self.current = current;
        let dx = (current.x - self.start.x).abs();
        let dy = (current.y - self.start.y).abs();
        if dx > self.threshold || dy > self.threshold {
            self.did_drag = true;
        }
    }

    /// Normalized rectangle, whatever the drag direction.
    pub fn rect(&self) -> Rect {
        rect_from_drag(self.start, self.current)
    }

    pub fn has_extent(&self) -> bool {
        let r = self.rect();
        r.width() > 0.0 || r.height() > 0.0
    }

    pub fn did_drag(&self) -> bool {
        self.did_drag
    }
}
