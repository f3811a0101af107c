//! LapTrack - RC car lap timing
//!
//! Times laps for radio-controlled cars tracked by an object detector as
//! they cross a finish line drawn on the camera image. The race core keeps
//! per-car position history, detects line crossings, debounces detector
//! jitter and keeps the lap and penalty ledger. Detector output, keyboard
//! commands and CSV export are thin layers around it.

pub mod detection;
pub mod input;
pub mod racing;
pub mod recording;
pub mod session;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use racing::{FinishLine, Point, RaceConfig, RaceState};
pub use session::{RaceSession, SessionOutcome};
pub use storage::AppConfig;
