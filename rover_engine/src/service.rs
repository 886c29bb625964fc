use crate::config::RoverConfig;
use crate::error::{Axis, ConfigError, Result, RoverError, ValidationError};
use crate::grid::GridBounds;
use crate::instructions::parse;
use crate::notify::{LogNotifier, NotificationSink, RunEvent};
use crate::position::validate_start;
use crate::recorder::{create_run_recorder, RunRecord, RunRecorder};
use crate::rover::{simulate, RunResult};
use chrono::Utc;
use log::{error, warn};
use serde::{Deserialize, Serialize};

/// Date format used when listing runs, e.g. `09/03/2024 14:05:07`.
const LOG_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Raw start coordinates as a caller sent them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub direction: Option<String>,
}

/// A request to move the rover.
///
/// Deserializes from:
///
/// ```json
/// {"coordinates": {"x": 1, "y": 2, "direction": "N"}, "instructions": "LMLMLMLMM"}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MoveRequest {
    pub coordinates: Option<Coordinates>,
    pub instructions: Option<String>,
}

impl MoveRequest {
    pub fn new(x: i64, y: i64, direction: &str, instructions: &str) -> MoveRequest {
        MoveRequest {
            coordinates: Some(Coordinates {
                x: Some(x),
                y: Some(y),
                direction: Some(direction.to_string()),
            }),
            instructions: Some(instructions.to_string()),
        }
    }
}

/// The response to a successful move.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub result: RunResult,
    /// The end position as `"<x> <y> <heading>"`.
    pub formatted_result: String,
}

/// A recorded run prepared for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattedRunLog {
    pub id: String,
    pub initial_position: String,
    pub commands: String,
    pub final_position: String,
    /// Creation time in UTC, formatted as `DD/MM/YYYY HH:MM:SS`.
    pub created: String,
}

impl From<&RunRecord> for FormattedRunLog {
    fn from(record: &RunRecord) -> Self {
        FormattedRunLog {
            id: record.id.to_string(),
            initial_position: record.start().to_string(),
            commands: record.raw_instructions.clone(),
            final_position: record.end().to_string(),
            created: record.created_at.format(LOG_DATE_FORMAT).to_string(),
        }
    }
}

/// Main entry point for moving the rover.
///
/// Wires validation and simulation to the run history and to notifications. The service
/// holds no state of its own between runs, so it can be shared across threads.
pub struct RoverService {
    bounds: GridBounds,
    recorder: Box<dyn RunRecorder>,
    notifier: Box<dyn NotificationSink>,
}

impl RoverService {
    /// Creates a new service.
    ///
    /// # Arguments
    /// * `bounds` - The grid every run happens on.
    /// * `recorder` - Where finished runs are recorded.
    /// * `notifier` - Who is told about finished runs.
    pub fn new(
        bounds: GridBounds,
        recorder: Box<dyn RunRecorder>,
        notifier: Box<dyn NotificationSink>,
    ) -> RoverService {
        RoverService {
            bounds,
            recorder,
            notifier,
        }
    }

    /// Creates a service from configuration, logging every run event.
    pub fn from_config(config: &RoverConfig) -> std::result::Result<RoverService, ConfigError> {
        Ok(RoverService::new(
            config.bounds()?,
            create_run_recorder(config.recorder.path.clone()),
            Box::new(LogNotifier),
        ))
    }

    /// Replaces the notification sink (builder pattern).
    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSink>) -> RoverService {
        self.notifier = notifier;
        self
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Validates the request, runs it, records it and fires the new run event.
    ///
    /// Validation happens in this order: request shape, coordinate presence, instructions,
    /// heading and bounds. A run that cannot be recorded is still returned; the failure
    /// is only logged.
    pub fn move_rover(&self, request: &MoveRequest) -> Result<MoveResponse> {
        let coordinates = request
            .coordinates
            .as_ref()
            .ok_or(RoverError::MissingCoordinates)?;
        let raw_instructions = request
            .instructions
            .as_deref()
            .ok_or(RoverError::MissingInstructions)?;

        let x = coordinates
            .x
            .ok_or(ValidationError::MissingCoordinate { axis: Axis::X })?;
        let y = coordinates
            .y
            .ok_or(ValidationError::MissingCoordinate { axis: Axis::Y })?;
        let direction = coordinates
            .direction
            .as_deref()
            .ok_or(ValidationError::MissingHeading)?;

        let instructions = parse(raw_instructions)?;
        let start = validate_start(Some(x), Some(y), Some(direction), &self.bounds)?;

        let result = simulate(start, instructions, &self.bounds).map_err(|e| {
            warn!("Rejected run from {} with {}: {}", start, raw_instructions, e);
            e
        })?;

        if let Err(e) = self.recorder.record(&result, raw_instructions, Utc::now()) {
            error!("Failed to record run from {}: {}", start, e);
        }

        self.notifier.notify(&RunEvent {
            result: result.clone(),
            coordinates: coordinates.clone(),
            instructions: raw_instructions.to_string(),
        });

        Ok(MoveResponse {
            formatted_result: result.formatted(),
            result,
        })
    }

    /// All recorded runs, oldest first.
    pub fn logs(&self) -> Result<Vec<RunRecord>> {
        Ok(self.recorder.records()?)
    }

    /// All recorded runs prepared for display.
    pub fn formatted_logs(&self) -> Result<Vec<FormattedRunLog>> {
        Ok(self.logs()?.iter().map(FormattedRunLog::from).collect())
    }
}
