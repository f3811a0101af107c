//! Detector glue: detection types, per-class filtering and session replay.

pub mod replay;
pub mod types;

pub use replay::ReplayReader;
pub use types::{
    select_best, BoundingBox, Detection, EventSource, Frame, RawDetection, ReplayError,
    SessionEvent,
};
