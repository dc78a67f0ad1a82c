//! Keyboard shortcut registry and documentation.

use inkfield_core::Modifiers;

/// Action bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
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

    /// Alt and Meta are never part of a binding, so holding either misses.
    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.ctrl
            && self.shift == modifiers.shift
            && !modifiers.alt
            && !modifiers.meta
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("Z", true, false, Command::Undo, "Undo"),
    Shortcut::new("Z", true, true, Command::Redo, "Redo"),
    Shortcut::new("Y", true, false, Command::Redo, "Redo"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Command bound to a key chord. Keys compare case-insensitively.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<Command> {
        SHORTCUTS
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
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
