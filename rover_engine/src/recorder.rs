use crate::error::RecorderError;
use crate::position::{Heading, Position};
use crate::rover::RunResult;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Creates the recorder used to keep the history of runs.
///
/// # Arguments
/// * `path` - The file to append runs to. If `None`, runs are not recorded.
pub fn create_run_recorder(path: Option<PathBuf>) -> Box<dyn RunRecorder> {
    match path {
        None => Box::new(NoOpRunRecorder {}),
        Some(path) => Box::new(JsonRunRecorder::new(path)),
    }
}

/// A persisted run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub start_x: i32,
    pub start_y: i32,
    pub start_heading: Heading,
    pub raw_instructions: String,
    pub end_x: i32,
    pub end_y: i32,
    pub end_heading: Heading,
    pub created_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(result: &RunResult, raw_instructions: &str, created_at: DateTime<Utc>) -> RunRecord {
        RunRecord {
            id: Uuid::new_v4(),
            start_x: result.start.x,
            start_y: result.start.y,
            start_heading: result.start.heading,
            raw_instructions: raw_instructions.to_string(),
            end_x: result.end.x,
            end_y: result.end.y,
            end_heading: result.end.heading,
            created_at,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y, self.start_heading)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_x, self.end_y, self.end_heading)
    }
}

/// Keeps the history of runs.
///
/// The default implementation records nothing.
pub trait RunRecorder: Send + Sync {
    /// Records a finished run and returns the stored record.
    fn record(
        &self,
        result: &RunResult,
        raw_instructions: &str,
        created_at: DateTime<Utc>,
    ) -> Result<RunRecord, RecorderError> {
        Ok(RunRecord::new(result, raw_instructions, created_at))
    }

    /// All recorded runs, oldest first.
    fn records(&self) -> Result<Vec<RunRecord>, RecorderError> {
        Ok(Vec::new())
    }
}

pub struct NoOpRunRecorder;
impl RunRecorder for NoOpRunRecorder {}

impl<R: RunRecorder + ?Sized> RunRecorder for Arc<R> {
    fn record(
        &self,
        result: &RunResult,
        raw_instructions: &str,
        created_at: DateTime<Utc>,
    ) -> Result<RunRecord, RecorderError> {
        (**self).record(result, raw_instructions, created_at)
    }

    fn records(&self) -> Result<Vec<RunRecord>, RecorderError> {
        (**self).records()
    }
}

/// Keeps runs in memory for the lifetime of the recorder.
#[derive(Default)]
pub struct MemoryRunRecorder {
    records: Mutex<Vec<RunRecord>>,
}

impl MemoryRunRecorder {
    pub fn new() -> MemoryRunRecorder {
        MemoryRunRecorder::default()
    }
}

impl RunRecorder for MemoryRunRecorder {
    fn record(
        &self,
        result: &RunResult,
        raw_instructions: &str,
        created_at: DateTime<Utc>,
    ) -> Result<RunRecord, RecorderError> {
        let record = RunRecord::new(result, raw_instructions, created_at);
        self.records
            .lock()
            .map_err(|_| RecorderError::Poisoned)?
            .push(record.clone());
        Ok(record)
    }

    fn records(&self) -> Result<Vec<RunRecord>, RecorderError> {
        Ok(self
            .records
            .lock()
            .map_err(|_| RecorderError::Poisoned)?
            .clone())
    }
}

/// Appends runs to a file, one JSON object per line.
pub struct JsonRunRecorder {
    path: PathBuf,
    // Serializes appends from concurrent runs so lines never interleave
    lock: Mutex<()>,
}

impl JsonRunRecorder {
    pub fn new(path: impl Into<PathBuf>) -> JsonRunRecorder {
        JsonRunRecorder {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RecorderError {
        RecorderError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RunRecorder for JsonRunRecorder {
    fn record(
        &self,
        result: &RunResult,
        raw_instructions: &str,
        created_at: DateTime<Utc>,
    ) -> Result<RunRecord, RecorderError> {
        let record = RunRecord::new(result, raw_instructions, created_at);
        let line = serde_json::to_string(&record)?;

        let _guard = self.lock.lock().map_err(|_| RecorderError::Poisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", line).map_err(|e| self.io_error(e))?;

        info!(
            "Recorded run {} ({} -> {}) to {}",
            record.id,
            record.start(),
            record.end(),
            self.path.display()
        );
        Ok(record)
    }

    fn records(&self) -> Result<Vec<RunRecord>, RecorderError> {
        let _guard = self.lock.lock().map_err(|_| RecorderError::Poisoned)?;
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // Nothing has been recorded yet
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str(&line).map_err(|source| RecorderError::Malformed {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}
