//! Per-entrant position history and the crossing-to-lap state machine.

use std::collections::VecDeque;

use super::finish_line::{FinishLine, Point};
use super::types::{Crossing, LapRecord, RaceConfig, Rgb, Timestamp};

/// Lap timer state of a single entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No crossing recorded yet
    Unarmed,
    /// Timer running since the last crossing
    Armed,
}

/// One tracked racer.
#[derive(Debug, Clone)]
pub struct Entrant {
    name: String,
    color: Rgb,
    config: RaceConfig,

    position: Option<Point>,
    last_seen_at: Option<Timestamp>,
    history: VecDeque<Point>,
    laps: Vec<LapRecord>,
    last_cross_time: Option<Timestamp>,
    best_lap: Option<f64>,
    current_penalty: f64,
    penalty_flash_until: Option<Timestamp>,
}

impl Entrant {
    /// Create an entrant with no race history.
    pub fn new(name: impl Into<String>, color: Rgb, config: RaceConfig) -> Self {
        let capacity = config.history_limit();
        Self {
            name: name.into(),
            color,
            config,
            position: None,
            last_seen_at: None,
            history: VecDeque::with_capacity(capacity),
            laps: Vec::new(),
            last_cross_time: None,
            best_lap: None,
            current_penalty: 0.0,
            penalty_flash_until: None,
        }
    }

    /// Record a new position and check it against the finish line.
    ///
    /// Returns the crossing that was honored this call, if any. Short
    /// history, an unready line and the cooldown window are silent no-ops.
    pub fn update(&mut self, pos: Point, line: &FinishLine, now: Timestamp) -> Option<Crossing> {
        self.position = Some(pos);
        self.last_seen_at = Some(now);
        self.push_history(pos);

        if self.history.len() < self.config.required_history() || !line.is_ready() {
            return None;
        }

        if let Some(last) = self.last_cross_time {
            if now - last < self.config.lap_cooldown_seconds {
                return None;
            }
        }

        let n = self.history.len();
        if !line.crossed(self.history[n - 2], self.history[n - 1]) {
            return None;
        }

        let crossing = match self.last_cross_time {
            None => {
                tracing::info!("{} START", self.name);
                Crossing::Start
            }
            Some(last) => {
                let lap = (now - last) + self.current_penalty;
                let record = LapRecord {
                    time: lap,
                    penalty: self.current_penalty,
                };
                self.laps.push(record);

                let new_best = self.best_lap.map_or(true, |best| lap < best);
                if new_best {
                    self.best_lap = Some(lap);
                }

                tracing::info!(
                    "{} LAP {}: {:.2}s (+{:.1}s){}",
                    self.name,
                    self.laps.len(),
                    lap,
                    record.penalty,
                    if new_best { " best" } else { "" }
                );
                Crossing::Lap { record, new_best }
            }
        };

        self.last_cross_time = Some(now);
        self.current_penalty = 0.0;

        Some(crossing)
    }

    /// Add seconds to the penalty applied to the next completed lap.
    ///
    /// The sign is not checked.
    pub fn add_penalty(&mut self, seconds: f64, now: Timestamp) {
        self.current_penalty += seconds;
        self.penalty_flash_until = Some(now + self.config.penalty_flash_duration);
        tracing::warn!(
            "{} PENALTY +{:.1}s (total {:.1}s)",
            self.name,
            seconds,
            self.current_penalty
        );
    }

    /// Clear all race state, keeping name and color.
    pub fn reset(&mut self) {
        self.position = None;
        self.last_seen_at = None;
        self.history.clear();
        self.laps.clear();
        self.last_cross_time = None;
        self.best_lap = None;
        self.current_penalty = 0.0;
        self.penalty_flash_until = None;
        tracing::info!("{} RESET", self.name);
    }

    fn push_history(&mut self, pos: Point) {
        while self.history.len() >= self.config.history_limit() {
            self.history.pop_front();
        }
        self.history.push_back(pos);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn state(&self) -> TimerState {
        if self.last_cross_time.is_some() {
            TimerState::Armed
        } else {
            TimerState::Unarmed
        }
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn last_seen_at(&self) -> Option<Timestamp> {
        self.last_seen_at
    }

    /// Recent positions, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.history.iter()
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Recorded lap times (penalties included).
    pub fn lap_times(&self) -> Vec<f64> {
        self.laps.iter().map(|lap| lap.time).collect()
    }

    /// Penalty applied to each recorded lap, index-aligned with `lap_times`.
    pub fn lap_penalties(&self) -> Vec<f64> {
        self.laps.iter().map(|lap| lap.penalty).collect()
    }

    pub fn last_cross_time(&self) -> Option<Timestamp> {
        self.last_cross_time
    }

    pub fn best_lap(&self) -> Option<f64> {
        self.best_lap
    }

    pub fn current_penalty(&self) -> f64 {
        self.current_penalty
    }

    pub fn penalty_flash_until(&self) -> Option<Timestamp> {
        self.penalty_flash_until
    }

    /// Running time of the lap in progress, pending penalty included.
    pub fn current_lap_time(&self, now: Timestamp) -> Option<f64> {
        self.last_cross_time
            .map(|last| now - last + self.current_penalty)
    }

    /// The last `count` lap times, oldest first.
    pub fn recent_laps(&self, count: usize) -> Vec<f64> {
        let skip = self.laps.len().saturating_sub(count);
        self.laps.iter().skip(skip).map(|lap| lap.time).collect()
    }

    /// Whether the entrant was detected within the configured lost threshold.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.last_seen_at
            .is_some_and(|seen| now - seen < self.config.lost_after_seconds)
    }

    pub fn is_penalty_flashing(&self, now: Timestamp) -> bool {
        self.penalty_flash_until.is_some_and(|until| now < until)
    }
}
