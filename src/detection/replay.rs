//! Recorded session playback.
//!
//! A session file holds one JSON event per line. Blank lines and lines
//! starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::types::{EventSource, ReplayError, SessionEvent};

/// Reads session events from a line-oriented JSON stream.
pub struct ReplayReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl ReplayReader<BufReader<File>> {
    /// Open a session file.
    pub fn open(path: &Path) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        tracing::info!("Replaying session from {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplayReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Line number of the last event read (1-based).
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> EventSource for ReplayReader<R> {
    fn next_event(&mut self) -> Result<Option<SessionEvent>, ReplayError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| ReplayError::Malformed {
                    line: self.line_no,
                    message: e.to_string(),
                });
        }
    }
}
