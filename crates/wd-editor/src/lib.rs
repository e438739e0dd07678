//! Canvas interaction engine for the widget designer.
//!
//! [`CanvasEngine`] is the facade: feed it [`InputEvent`]s, read back the
//! document, the selection and a display list.

pub mod canvas;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod dirty;
pub mod gesture;
pub mod input;
pub mod marquee;
pub mod preview;
pub mod selection;
pub mod shortcuts;
pub mod tools;
pub mod viewport;

pub use canvas::CanvasEngine;
pub use commands::{History, HistoryAction, HistoryEntry};
pub use config::EditorConfig;
pub use gesture::{GestureKind, GestureScope};
pub use input::{InputEvent, Modifiers, PointerButton};
pub use preview::{LivePreview, Preview, SubscriberId};
pub use selection::Selection;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use viewport::Viewport;
