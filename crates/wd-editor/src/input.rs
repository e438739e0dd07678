//! Input abstraction layer.
//!
//! Normalizes pointer, wheel and keyboard events from the host into a
//! single `InputEvent` enum. Pointer positions are screen space.

use kurbo::Point;

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// ⌘ on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// The platform "secondary" modifier: Ctrl, or ⌘ on macOS.
    pub fn secondary(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    /// Usually opens a context menu.
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        position: Point,
        modifiers: Modifiers,
    },
    /// A click on the empty canvas background, delivered after pointer-up.
    BackgroundClick,
    /// Scroll / pinch. Trackpad pinch arrives with `ctrl` set.
    Wheel {
        position: Point,
        delta_y: f64,
        modifiers: Modifiers,
    },
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"ArrowLeft"`).
    KeyDown {
        key: String,
        modifiers: Modifiers,
    },
    KeyUp {
        key: String,
        modifiers: Modifiers,
    },
    /// The window lost focus; any in-flight gesture is abandoned.
    Blur,
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer or wheel event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. }
            | Self::Wheel { position, .. } => Some(*position),
            _ => None,
        }
    }
}
