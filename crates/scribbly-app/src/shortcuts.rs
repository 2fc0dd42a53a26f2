//! Keyboard shortcut registry.

use serde::{Deserialize, Serialize};

/// What a shortcut does to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Undo,
    Redo,
    /// Drop the stroke being drawn.
    Cancel,
    /// Return the camera to the origin at 100%.
    ResetView,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, Action::Undo, "Undo"),
            Shortcut::new("Z", true, true, Action::Redo, "Redo"),
            Shortcut::new("Y", true, false, Action::Redo, "Redo"),
            Shortcut::new("Escape", false, false, Action::Cancel, "Cancel current stroke"),
            Shortcut::new("0", true, false, Action::ResetView, "Reset view"),
        ]
    }

    /// Find the action bound to a key combination.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<Action> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("z", true, false), Some(Action::Undo));
        assert_eq!(ShortcutRegistry::lookup("Z", true, true), Some(Action::Redo));
        assert_eq!(ShortcutRegistry::lookup("Y", true, false), Some(Action::Redo));
        assert_eq!(ShortcutRegistry::lookup("Escape", false, false), Some(Action::Cancel));
        assert_eq!(ShortcutRegistry::lookup("Z", false, false), None);
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new("Z", true, true, Action::Redo, "Redo");
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
    }
}
