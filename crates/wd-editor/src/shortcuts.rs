//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The platform
//! secondary modifier is Ctrl, or ⌘ on macOS; both are accepted.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // Editing
    Undo,
    Redo,
    Delete,
    SelectAll,
    Copy,
    Cut,
    Paste,

    // Arrow-key nudges; `large` is shift
    NudgeLeft { large: bool },
    NudgeRight { large: bool },
    NudgeUp { large: bool },
    NudgeDown { large: bool },

    // Viewport
    PanStart,
    PanEnd,

    // Stacking
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,

    /// Abort the active gesture, or clear the selection.
    Escape,
}

impl ShortcutAction {
    /// Actions that edit content or selection from the keyboard. These are
    /// suppressed while a text input has focus.
    pub fn conflicts_with_text_input(self) -> bool {
        matches!(
            self,
            ShortcutAction::Delete
                | ShortcutAction::SelectAll
                | ShortcutAction::NudgeLeft { .. }
                | ShortcutAction::NudgeRight { .. }
                | ShortcutAction::NudgeUp { .. }
                | ShortcutAction::NudgeDown { .. }
        )
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key-down to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, mods: Modifiers) -> Option<ShortcutAction> {
        let cmd = mods.secondary();

        if cmd && mods.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "c" | "C" => Some(ShortcutAction::Copy),
                "x" | "X" => Some(ShortcutAction::Cut),
                "v" | "V" => Some(ShortcutAction::Paste),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                _ => None,
            };
        }

        let large = mods.shift;
        match key {
            "ArrowLeft" => Some(ShortcutAction::NudgeLeft { large }),
            "ArrowRight" => Some(ShortcutAction::NudgeRight { large }),
            "ArrowUp" => Some(ShortcutAction::NudgeUp { large }),
            "ArrowDown" => Some(ShortcutAction::NudgeDown { large }),
            _ if mods.shift => None,
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Escape),
            " " => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }

    /// Resolve a key-up. Only the space bar matters.
    pub fn resolve_release(key: &str) -> Option<ShortcutAction> {
        match key {
            " " => Some(ShortcutAction::PanEnd),
            _ => None,
        }
    }
}
