//! Race session driver.
//!
//! Glues the detector, keyboard and export collaborators to the race core:
//! frames become ticks, clicks place the finish line and keys become race
//! commands.

use std::path::PathBuf;

use chrono::Local;
use crate::detection::{select_best, EventSource, Frame, ReplayError, SessionEvent};
use crate::input::{KeyAction, KeyboardHandler};
use crate::racing::{Point, RaceError, RaceState, Timestamp};
use crate::recording::{export_all, ExportError};
use crate::storage::AppConfig;
use crate::ui::format_hud_line;

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Quit,
}

/// A running race with its input and export collaborators.
pub struct RaceSession {
    race: RaceState,
    keyboard: KeyboardHandler,
    entrant_ids: Vec<String>,
    confidence_threshold: f32,
    export_dir: PathBuf,
    /// Latest timestamp seen, used for events that carry none
    now: Timestamp,
}

impl RaceSession {
    /// Build a session from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, RaceError> {
        let mut race = RaceState::new(config.race.clone());
        for entrant in &config.entrants {
            race.add_entrant(entrant.id.clone(), entrant.name.clone(), entrant.color)?;
        }

        Ok(Self {
            entrant_ids: race.entrant_ids().to_vec(),
            race,
            keyboard: KeyboardHandler::for_entrants(&config.entrants),
            confidence_threshold: config.model.confidence_threshold,
            export_dir: config.export.directory.clone(),
            now: 0.0,
        })
    }

    pub fn race(&self) -> &RaceState {
        &self.race
    }

    pub fn race_mut(&mut self) -> &mut RaceState {
        &mut self.race
    }

    pub fn keyboard(&self) -> &KeyboardHandler {
        &self.keyboard
    }

    /// Latest timestamp the session has seen.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Apply one session event.
    pub fn handle_event(&mut self, event: SessionEvent) -> SessionOutcome {
        match event {
            SessionEvent::Frame { t, detections } => {
                self.handle_frame(&Frame {
                    timestamp: t,
                    detections,
                });
            }
            SessionEvent::Boxes { t, boxes } => {
                let detections = select_best(
                    &boxes,
                    self.entrant_ids.as_slice(),
                    self.confidence_threshold,
                );
                self.handle_frame(&Frame {
                    timestamp: t,
                    detections,
                });
            }
            SessionEvent::Click { x, y } => {
                self.race.click_finish_line(Point::new(x, y));
            }
            SessionEvent::Key { t, key } => {
                self.advance_clock(t);
                return self.handle_key(key);
            }
        }

        SessionOutcome::Continue
    }

    /// Feed one frame of detections to the race.
    pub fn handle_frame(&mut self, frame: &Frame) {
        self.advance_clock(frame.timestamp);
        self.race.tick(&frame.positions(), frame.timestamp);
    }

    /// Dispatch a key press at the current session time.
    pub fn handle_key(&mut self, key: char) -> SessionOutcome {
        let Some(action) = self.keyboard.get_action(key).cloned() else {
            tracing::debug!("Unbound key {:?}", key);
            return SessionOutcome::Continue;
        };

        self.apply(&action)
    }

    /// Apply a race command at the current session time.
    pub fn apply(&mut self, action: &KeyAction) -> SessionOutcome {
        match action {
            KeyAction::Penalty(id) => {
                if let Err(e) = self.race.add_default_penalty(id, self.now) {
                    tracing::warn!("Penalty ignored: {}", e);
                }
            }
            KeyAction::Reset => self.race.reset_all(),
            KeyAction::Export => {
                if let Err(e) = self.export() {
                    tracing::error!("Export failed: {}", e);
                }
            }
            KeyAction::Quit => return SessionOutcome::Quit,
        }

        SessionOutcome::Continue
    }

    /// Write lap CSVs for every entrant with laps.
    pub fn export(&self) -> Result<Vec<PathBuf>, ExportError> {
        let snapshot = self.race.snapshot(self.now);
        export_all(&snapshot, &self.export_dir, Local::now().naive_local())
    }

    /// Current HUD status lines, one per entrant.
    pub fn hud_lines(&self) -> Vec<String> {
        self.race
            .snapshot(self.now)
            .iter()
            .map(format_hud_line)
            .collect()
    }

    /// Drain an event source until it ends or a quit command arrives.
    pub fn run<S: EventSource>(&mut self, source: &mut S) -> Result<SessionOutcome, ReplayError> {
        while let Some(event) = source.next_event()? {
            if self.handle_event(event) == SessionOutcome::Quit {
                tracing::info!("Quit requested");
                return Ok(SessionOutcome::Quit);
            }
        }

        tracing::info!("End of stream");
        Ok(SessionOutcome::Continue)
    }

    fn advance_clock(&mut self, t: Timestamp) {
        if t > self.now {
            self.now = t;
        }
    }
}
