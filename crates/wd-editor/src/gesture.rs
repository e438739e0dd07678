//! Gesture sessions.
//!
//! At most one pointer gesture runs at a time. The engine owns it in a
//! single slot; beginning another while one is active is refused up front.
//! Whatever ends a gesture abnormally (Escape, window blur, the engine or a
//! [`GestureScope`] being dropped) goes through
//! [`CanvasEngine::abort_gesture`], which reverts and cleans up.

use crate::canvas::CanvasEngine;
use crate::input::Modifiers;
use crate::marquee::MarqueeSession;
use crate::tools::{DragSession, ResizeSession};
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Pan,
    Marquee,
    Drag,
    Resize,
}

/// Space-drag panning. `anchor` is the pointer relative to the offset at
/// gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    pub anchor: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Pan(PanSession),
    Marquee(MarqueeSession),
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Pan(_) => GestureKind::Pan,
            Gesture::Marquee(_) => GestureKind::Marquee,
            Gesture::Drag(_) => GestureKind::Drag,
            Gesture::Resize(_) => GestureKind::Resize,
        }
    }
}

/// Drives one gesture within a single call frame.
///
/// Created by [`CanvasEngine::begin_gesture`]. `finish` ends the gesture
/// normally; dropping the scope any other way (early return, `?`, panic)
/// aborts it.
pub struct GestureScope<'a> {
    engine: &'a mut CanvasEngine,
    kind: GestureKind,
    finished: bool,
}

impl<'a> GestureScope<'a> {
    pub(crate) fn new(engine: &'a mut CanvasEngine, kind: GestureKind) -> Self {
        Self {
            engine,
            kind,
            finished: false,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn update(&mut self, pointer: Point) {
        self.engine.pointer_move(pointer, Modifiers::NONE);
    }

    pub fn finish(mut self, pointer: Point) {
        self.engine.pointer_up(pointer, Modifiers::NONE);
        self.finished = true;
    }

    pub fn engine(&self) -> &CanvasEngine {
        self.engine
    }
}

impl Drop for GestureScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.engine.abort_gesture();
        }
    }
}
