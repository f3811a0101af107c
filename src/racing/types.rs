//! Shared racing types: timing configuration, lap records and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds on the caller's clock. The core never reads the clock itself.
pub type Timestamp = f64;

/// Timing parameters handed to the race core at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Positions needed before a crossing check is attempted (never below 2)
    pub min_history_length: usize,
    /// Positions kept per entrant; the oldest is evicted first. Raised to
    /// the required history when configured smaller
    pub history_capacity: usize,
    /// Crossings closer than this to the previous one are ignored
    pub lap_cooldown_seconds: f64,
    /// Amount added by a single manual penalty
    pub penalty_seconds: f64,
    /// How long the HUD highlights an entrant after a penalty
    pub penalty_flash_duration: f64,
    /// Silence after which an entrant is shown as lost
    pub lost_after_seconds: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            min_history_length: 2,
            history_capacity: 50,
            lap_cooldown_seconds: 2.0,
            penalty_seconds: 2.0,
            penalty_flash_duration: 0.5,
            lost_after_seconds: 1.0,
        }
    }
}

impl RaceConfig {
    /// History length actually required before checking for a crossing.
    pub fn required_history(&self) -> usize {
        self.min_history_length.max(2)
    }

    /// Positions actually kept per entrant.
    ///
    /// Never below `required_history`, so a crossing check is always reachable.
    pub fn history_limit(&self) -> usize {
        self.history_capacity.max(self.required_history())
    }
}

/// Display color of an entrant (RGB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One completed lap.
///
/// `time` already includes `penalty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Recorded lap time in seconds, penalty included
    pub time: f64,
    /// Penalty seconds applied to this lap
    pub penalty: f64,
}

impl LapRecord {
    /// Lap time without the penalty.
    pub fn raw_time(&self) -> f64 {
        self.time - self.penalty
    }
}

/// Result of a finish line crossing that was honored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// First crossing: the entrant's timer is now running
    Start,
    /// A lap was completed
    Lap { record: LapRecord, new_best: bool },
}

/// Race command errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError {
    /// No entrant registered under this identifier
    #[error("Unknown entrant: {0}")]
    UnknownEntrant(String),

    /// Identifier registered twice
    #[error("Duplicate entrant: {0}")]
    DuplicateEntrant(String),
}
