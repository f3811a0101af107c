//! Input handling module for race control shortcuts.

pub mod keyboard;

// Re-export types
pub use keyboard::{KeyAction, KeyboardHandler};
