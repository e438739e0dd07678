//! Geometry utilities: AABB intersection and canvas ↔ screen conversion.
//!
//! Canvas space is the untransformed space element geometry lives in.
//! Screen space is canvas space after the viewport transform:
//!
//! ```text
//! screen = canvas * scale + offset
//! canvas = (screen - offset) / scale
//! ```

use kurbo::{Point, Rect, Vec2};

/// Closed-interval AABB test: two rectangles intersect unless one lies
/// strictly left, right, above or below the other. Touching edges count.
pub fn intersects(a: Rect, b: Rect) -> bool {
    let a = a.abs();
    let b = b.abs();
    if a.x1 < b.x0 || b.x1 < a.x0 {
        return false;
    }
    if a.y1 < b.y0 || b.y1 < a.y0 {
        return false;
    }
    true
}

/// Normalized rectangle spanned by two drag points (either direction).
pub fn rect_from_drag(start: Point, current: Point) -> Rect {
    Rect::from_points(start, current)
}

/// The affine canvas → screen map: uniform scale then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        (canvas.to_vec2() * self.scale + self.offset).to_point()
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.offset) / self.scale).to_point()
    }

    pub fn rect_to_screen(&self, canvas: Rect) -> Rect {
        Rect::from_points(
            self.to_screen(canvas.origin()),
            self.to_screen(Point::new(canvas.x1, canvas.y1)),
        )
    }

    /// Screen-space delta → canvas-space delta (translation cancels out).
    pub fn delta_to_canvas(&self, screen_delta: Vec2) -> Vec2 {
        screen_delta / self.scale
    }
}

/// Round `v` to the nearest multiple of `grid`. A non-positive grid is a no-op.
pub fn snap(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).round() * grid
}
