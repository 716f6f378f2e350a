//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s so the browser
//! shell and native hosts share one binding table.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolText,

    // ── Edit ──
    Delete,
    SelectAll,
    Deselect,

    // ── Z-order ──
    BringToFront,
    SendToBack,
}

/// Resolves key events into shortcut actions.
///
/// The command modifier is ⌘ on macOS and Ctrl elsewhere; either counts.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"a"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: &Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "]" => Some(ShortcutAction::BringToFront),
                "[" => Some(ShortcutAction::SendToBack),
                _ => None,
            };
        }

        match key {
            "Escape" => Some(ShortcutAction::Deselect),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            _ if modifiers.shift || modifiers.alt => None,
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "t" | "T" => Some(ShortcutAction::ToolText),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    #[test]
    fn resolve_tool_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("v", &Modifiers::NONE),
            Some(ShortcutAction::ToolSelect)
        );
        assert_eq!(
            ShortcutMap::resolve("T", &Modifiers::NONE),
            Some(ShortcutAction::ToolText)
        );
        assert_eq!(ShortcutMap::resolve("t", &Modifiers::SHIFT), None);
    }

    #[test]
    fn resolve_select_all_on_both_platforms() {
        assert_eq!(
            ShortcutMap::resolve("a", &CTRL),
            Some(ShortcutAction::SelectAll)
        );
        assert_eq!(
            ShortcutMap::resolve("a", &META),
            Some(ShortcutAction::SelectAll)
        );
        assert_eq!(ShortcutMap::resolve("a", &Modifiers::NONE), None);
    }

    #[test]
    fn resolve_delete_and_escape() {
        assert_eq!(
            ShortcutMap::resolve("Delete", &Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", &Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Escape", &Modifiers::SHIFT),
            Some(ShortcutAction::Deselect)
        );
    }

    #[test]
    fn resolve_z_order() {
        assert_eq!(
            ShortcutMap::resolve("]", &CTRL),
            Some(ShortcutAction::BringToFront)
        );
        assert_eq!(
            ShortcutMap::resolve("[", &META),
            Some(ShortcutAction::SendToBack)
        );
        assert_eq!(ShortcutMap::resolve("[", &Modifiers::NONE), None);
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        assert_eq!(ShortcutMap::resolve("q", &Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("z", &CTRL), None);
    }
}
