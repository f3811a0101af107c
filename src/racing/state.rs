//! Race orchestration: one finish line, many entrants, one tick per frame.

use std::collections::HashMap;

use serde::Serialize;

use super::entrant::{Entrant, TimerState};
use super::finish_line::{FinishLine, Point};
use super::types::{Crossing, LapRecord, RaceConfig, RaceError, Rgb, Timestamp};

/// Read-only view of one entrant for presentation and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrantSnapshot {
    pub id: String,
    pub name: String,
    pub color: Rgb,
    pub laps: Vec<LapRecord>,
    pub best_lap: Option<f64>,
    pub current_penalty: f64,
    /// Detected within the lost threshold
    pub active: bool,
    pub armed: bool,
    /// Running time of the lap in progress (penalty included)
    pub current_lap: Option<f64>,
    pub penalty_flashing: bool,
}

impl EntrantSnapshot {
    pub fn lap_times(&self) -> Vec<f64> {
        self.laps.iter().map(|lap| lap.time).collect()
    }

    pub fn lap_penalties(&self) -> Vec<f64> {
        self.laps.iter().map(|lap| lap.penalty).collect()
    }

    /// The last `count` lap times, oldest first.
    pub fn recent_laps(&self, count: usize) -> Vec<f64> {
        let skip = self.laps.len().saturating_sub(count);
        self.laps.iter().skip(skip).map(|lap| lap.time).collect()
    }
}

/// Owns the finish line and every registered entrant.
#[derive(Debug, Clone)]
pub struct RaceState {
    config: RaceConfig,
    finish_line: FinishLine,
    entrants: HashMap<String, Entrant>,
    /// Registration order, used for snapshots
    order: Vec<String>,
}

impl RaceState {
    /// Create a race with no entrants and an unset finish line.
    pub fn new(config: RaceConfig) -> Self {
        Self {
            config,
            finish_line: FinishLine::new(),
            entrants: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an entrant under a detector class identifier.
    pub fn add_entrant(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        color: Rgb,
    ) -> Result<(), RaceError> {
        let id = id.into();
        if self.entrants.contains_key(&id) {
            return Err(RaceError::DuplicateEntrant(id));
        }

        let entrant = Entrant::new(name, color, self.config.clone());
        self.entrants.insert(id.clone(), entrant);
        self.order.push(id);
        Ok(())
    }

    /// Process one batch of detections.
    ///
    /// Unknown identifiers are ignored; entrants without a detection are
    /// left untouched. Returns the crossings honored this tick.
    pub fn tick<'a, I>(&mut self, detections: I, now: Timestamp) -> Vec<(String, Crossing)>
    where
        I: IntoIterator<Item = (&'a String, &'a Point)>,
    {
        let mut crossings = Vec::new();

        for (id, pos) in detections {
            let Some(entrant) = self.entrants.get_mut(id) else {
                tracing::debug!("Ignoring detection for unknown entrant {}", id);
                continue;
            };

            if let Some(crossing) = entrant.update(*pos, &self.finish_line, now) {
                crossings.push((id.clone(), crossing));
            }
        }

        crossings
    }

    pub fn set_finish_line_point1(&mut self, point: Point) {
        self.finish_line.set_point1(point);
        tracing::info!("Finish line P1 set at {}", point);
    }

    pub fn set_finish_line_point2(&mut self, point: Point) {
        self.finish_line.set_point2(point);
        tracing::info!("Finish line P2 set at {}", point);
    }

    /// Place the next finish line endpoint from a setup click.
    pub fn click_finish_line(&mut self, point: Point) {
        let endpoint = self.finish_line.click(point);
        tracing::info!("Finish line {} set at {}", endpoint, point);
    }

    pub fn finish_line(&self) -> &FinishLine {
        &self.finish_line
    }

    /// Add a penalty to an entrant. Returns its new accumulated penalty.
    pub fn add_penalty(
        &mut self,
        id: &str,
        seconds: f64,
        now: Timestamp,
    ) -> Result<f64, RaceError> {
        let entrant = self
            .entrants
            .get_mut(id)
            .ok_or_else(|| RaceError::UnknownEntrant(id.to_string()))?;

        entrant.add_penalty(seconds, now);
        Ok(entrant.current_penalty())
    }

    /// Add the configured default penalty to an entrant.
    pub fn add_default_penalty(&mut self, id: &str, now: Timestamp) -> Result<f64, RaceError> {
        let seconds = self.config.penalty_seconds;
        self.add_penalty(id, seconds, now)
    }

    /// Reset every entrant. The finish line is kept.
    pub fn reset_all(&mut self) {
        tracing::info!("Race reset");
        for entrant in self.entrants.values_mut() {
            entrant.reset();
        }
    }

    pub fn entrant(&self, id: &str) -> Option<&Entrant> {
        self.entrants.get(id)
    }

    /// Entrant identifiers in registration order.
    pub fn entrant_ids(&self) -> &[String] {
        &self.order
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Read-only view of all entrants in registration order.
    pub fn snapshot(&self, now: Timestamp) -> Vec<EntrantSnapshot> {
        self.order
            .iter()
            .filter_map(|id| self.entrants.get(id).map(|e| (id, e)))
            .map(|(id, entrant)| EntrantSnapshot {
                id: id.clone(),
                name: entrant.name().to_string(),
                color: entrant.color(),
                laps: entrant.laps().to_vec(),
                best_lap: entrant.best_lap(),
                current_penalty: entrant.current_penalty(),
                active: entrant.is_active(now),
                armed: entrant.state() == TimerState::Armed,
                current_lap: entrant.current_lap_time(now),
                penalty_flashing: entrant.is_penalty_flashing(now),
            })
            .collect()
    }
}
