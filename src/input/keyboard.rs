//! Keyboard shortcuts for race control.
//!
//! Maps single characters to race commands. Keys are case-insensitive.

use std::collections::BTreeMap;

use crate::storage::EntrantConfig;

/// Race commands that can be triggered from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Add the default penalty to an entrant
    Penalty(String),
    /// Reset every entrant
    Reset,
    /// Export lap results
    Export,
    /// Stop the race loop
    Quit,
}

impl KeyAction {
    /// Short label for the controls footer.
    pub fn description(&self) -> String {
        match self {
            KeyAction::Penalty(id) => format!("{} penalty", id),
            KeyAction::Reset => "Reset".to_string(),
            KeyAction::Export => "Export".to_string(),
            KeyAction::Quit => "Quit".to_string(),
        }
    }
}

/// Keyboard input handler.
#[derive(Debug, Clone)]
pub struct KeyboardHandler {
    /// Registered shortcuts, keyed by lowercase character
    shortcuts: BTreeMap<char, KeyAction>,
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardHandler {
    /// Create a handler with the reset, export and quit shortcuts.
    pub fn new() -> Self {
        let mut handler = Self {
            shortcuts: BTreeMap::new(),
        };
        handler.register('r', KeyAction::Reset);
        handler.register('e', KeyAction::Export);
        handler.register('q', KeyAction::Quit);
        handler
    }

    /// Create a handler that also binds a penalty key per entrant.
    ///
    /// Each entrant gets the first letter of its display name that is not
    /// already taken ("Blue Car" -> `b`, "Green Car" -> `g`).
    pub fn for_entrants(entrants: &[EntrantConfig]) -> Self {
        let mut handler = Self::new();

        for entrant in entrants {
            let key = entrant
                .name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .find(|c| !handler.shortcuts.contains_key(c));

            match key {
                Some(key) => handler.register(key, KeyAction::Penalty(entrant.id.clone())),
                None => tracing::warn!("No free penalty key for {}", entrant.name),
            }
        }

        handler
    }

    /// Register a shortcut for an action.
    pub fn register(&mut self, key: char, action: KeyAction) {
        self.shortcuts.insert(key.to_ascii_lowercase(), action);
    }

    /// Unregister a shortcut.
    pub fn unregister(&mut self, key: char) {
        self.shortcuts.remove(&key.to_ascii_lowercase());
    }

    /// Get the action for a key press.
    pub fn get_action(&self, key: char) -> Option<&KeyAction> {
        self.shortcuts.get(&key.to_ascii_lowercase())
    }

    /// Get all registered shortcuts.
    pub fn all_shortcuts(&self) -> impl Iterator<Item = (&char, &KeyAction)> {
        self.shortcuts.iter()
    }

    /// Get the key bound to an action.
    pub fn shortcut_for(&self, action: &KeyAction) -> Option<char> {
        self.shortcuts
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(k, _)| *k)
    }
}
