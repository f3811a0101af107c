//! Detector output types.
//!
//! The race core only consumes entrant positions. Confidence and boxes are
//! carried here for presentation and filtering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::racing::{Point, Timestamp};

/// Axis-aligned box in frame pixels, serialized as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Integer center of the box.
    pub fn center(&self) -> Point {
        let cx = (self.x1 as i64 + self.x2 as i64) / 2;
        let cy = (self.y1 as i64 + self.y2 as i64) / 2;
        Point::new(cx as i32, cy as i32)
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

fn full_confidence() -> f32 {
    1.0
}

/// One entrant detected in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Centroid
    #[serde(flatten)]
    pub center: Point,
    /// Detector confidence (0-1)
    #[serde(default = "full_confidence")]
    pub confidence: f32,
    /// Bounding box, if the detector reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn at(center: Point) -> Self {
        Self {
            center,
            confidence: 1.0,
            bbox: None,
        }
    }
}

/// A raw detector box before per-class filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Model class name
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Keep the most confident box per known class at or above `threshold`.
///
/// Classes outside `known` are dropped. Ties keep the earlier box.
pub fn select_best<S: AsRef<str>>(
    raw: &[RawDetection],
    known: &[S],
    threshold: f32,
) -> HashMap<String, Detection> {
    let mut best: HashMap<String, Detection> = HashMap::new();

    for det in raw {
        if det.confidence < threshold {
            continue;
        }
        if !known.iter().any(|k| k.as_ref() == det.class_name) {
            continue;
        }

        let better = best
            .get(&det.class_name)
            .map_or(true, |current| det.confidence > current.confidence);
        if better {
            best.insert(
                det.class_name.clone(),
                Detection {
                    center: det.bbox.center(),
                    confidence: det.confidence,
                    bbox: Some(det.bbox),
                },
            );
        }
    }

    best
}

/// All detections for one processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub timestamp: Timestamp,
    pub detections: HashMap<String, Detection>,
}

impl Frame {
    /// Positions only, as consumed by `RaceState::tick`.
    pub fn positions(&self) -> HashMap<String, Point> {
        self.detections
            .iter()
            .map(|(id, det)| (id.clone(), det.center))
            .collect()
    }
}

/// One recorded session event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Filtered detections, one per entrant
    Frame {
        t: Timestamp,
        detections: HashMap<String, Detection>,
    },
    /// Unfiltered detector boxes
    Boxes {
        t: Timestamp,
        boxes: Vec<RawDetection>,
    },
    /// Finish line setup click
    Click { x: i32, y: i32 },
    /// Key press
    Key { t: Timestamp, key: char },
}

/// Source of session events (live detector glue or a recording).
pub trait EventSource {
    /// Next event, or `None` at end of stream.
    fn next_event(&mut self) -> Result<Option<SessionEvent>, ReplayError>;
}

impl EventSource for std::collections::VecDeque<SessionEvent> {
    fn next_event(&mut self) -> Result<Option<SessionEvent>, ReplayError> {
        Ok(self.pop_front())
    }
}

/// Errors reading a recorded session.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event on line {line}: {message}")]
    Malformed { line: usize, message: String },
}
