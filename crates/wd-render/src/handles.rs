//! The eight resize handles drawn around a selected element.

use kurbo::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    /// Clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    /// Where the handle sits on `bounds` (corner or edge midpoint).
    pub fn anchor(self, bounds: Rect) -> Point {
        let cx = (bounds.x0 + bounds.x1) / 2.0;
        let cy = (bounds.y0 + bounds.y1) / 2.0;
        match self {
            ResizeHandle::NorthWest => Point::new(bounds.x0, bounds.y0),
            ResizeHandle::North => Point::new(cx, bounds.y0),
            ResizeHandle::NorthEast => Point::new(bounds.x1, bounds.y0),
            ResizeHandle::East => Point::new(bounds.x1, cy),
            ResizeHandle::SouthEast => Point::new(bounds.x1, bounds.y1),
            ResizeHandle::South => Point::new(cx, bounds.y1),
            ResizeHandle::SouthWest => Point::new(bounds.x0, bounds.y1),
            ResizeHandle::West => Point::new(bounds.x0, cy),
        }
    }

    /// Square of side `size` centered on the anchor.
    pub fn rect(self, bounds: Rect, size: f64) -> Rect {
        Rect::from_center_size(self.anchor(bounds), (size, size))
    }

    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast
        )
    }

    /// CSS cursor name for hovering this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::SouthEast => "nwse-resize",
            ResizeHandle::NorthEast | ResizeHandle::SouthWest => "nesw-resize",
            ResizeHandle::North | ResizeHandle::South => "ns-resize",
            ResizeHandle::East | ResizeHandle::West => "ew-resize",
        }
    }

    /// Short compass name (`"nw"`, `"e"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::North => "n",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::East => "e",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::South => "s",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::West => "w",
        }
    }
}
