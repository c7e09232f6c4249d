//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Hosts forward
//! raw `KeyboardEvent.key` values and the engine decides what they mean.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── View ──
    ZoomIn,
    ZoomOut,
    /// Back to 100%, anchored at the frame centre.
    ResetZoom,
    /// Pan so the root sits in the middle of the frame.
    CenterRoot,

    // ── Edit ──
    /// New child under the selection, or under the root if none.
    CreateChild,

    // ── UI ──
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘, elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"n"`, `"Escape"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // ── Modifier combos first ──
        if cmd {
            return match key {
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetZoom),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        // ── Single keys ──
        match key {
            "n" | "N" => Some(ShortcutAction::CreateChild),
            "." => Some(ShortcutAction::CenterRoot),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
