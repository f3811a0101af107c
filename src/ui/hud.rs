//! Heads-up display text.
//!
//! Formats the per-entrant status line and the controls footer. Drawing is
//! left to whatever frontend shows the frame.

use crate::input::{KeyAction, KeyboardHandler};
use crate::racing::{EntrantSnapshot, Rgb};

/// Color of an entrant that has not been seen recently.
pub const LOST_COLOR: Rgb = Rgb(120, 120, 120);

/// Color of an entrant right after a penalty.
pub const PENALTY_COLOR: Rgb = Rgb(255, 0, 0);

/// Number of previous laps shown on the HUD.
const PREVIOUS_LAPS: usize = 3;

/// Render one entrant's HUD status line.
///
/// `Blue Car | Curr 12.3s | Best 10.52s | Prev [11.0s 10.5s] | Pen +2.0s`
pub fn format_hud_line(entrant: &EntrantSnapshot) -> String {
    let curr = entrant
        .current_lap
        .map_or_else(|| "--".to_string(), |t| format!("{:.1}s", t));

    let best = entrant
        .best_lap
        .map_or_else(|| "--".to_string(), |t| format!("{:.2}s", t));

    let prev = entrant
        .recent_laps(PREVIOUS_LAPS)
        .iter()
        .map(|t| format!("{:.1}s", t))
        .collect::<Vec<_>>()
        .join(" ");
    let prev = if prev.is_empty() { "--".to_string() } else { prev };

    format!(
        "{} | Curr {} | Best {} | Prev [{}] | Pen +{:.1}s",
        entrant.name, curr, best, prev, entrant.current_penalty
    )
}

/// Color to draw an entrant's status line in.
pub fn hud_color(entrant: &EntrantSnapshot) -> Rgb {
    if entrant.penalty_flashing {
        PENALTY_COLOR
    } else if entrant.active {
        entrant.color
    } else {
        LOST_COLOR
    }
}

/// Controls footer listing the key bindings.
pub fn controls_help(keyboard: &KeyboardHandler, penalty_seconds: f64) -> String {
    keyboard
        .all_shortcuts()
        .map(|(key, action)| {
            let label = match action {
                KeyAction::Penalty(id) => format!("{} +{}s", id, penalty_seconds),
                other => other.description(),
            };
            format!("[{}] {}", key.to_ascii_uppercase(), label)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
