//! UI module for text heads-up display output.

pub mod hud;

pub use hud::{controls_help, format_hud_line, hud_color};
