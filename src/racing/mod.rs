//! Race timing core.
//!
//! Finish line geometry, per-entrant crossing state machines and the race
//! orchestrator that dispatches detections to them once per frame. The core
//! does no I/O and takes every timestamp from the caller.

pub mod entrant;
pub mod finish_line;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use entrant::{Entrant, TimerState};
pub use finish_line::{ccw, Endpoint, FinishLine, Point};
pub use state::{EntrantSnapshot, RaceState};
pub use types::{Crossing, LapRecord, RaceConfig, RaceError, Rgb, Timestamp};
