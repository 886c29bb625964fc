//! Error types for the rover engine.

use crate::grid::GridBounds;
use crate::position::Position;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A coordinate axis, used to point at the offending half of a coordinate pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors produced while parsing an instruction string.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("Instructions must not be empty")]
    EmptyInstructions,

    /// `index` counts characters, not bytes.
    #[error("Invalid instruction '{character}' at index {index}, expected one of L, R, M")]
    InvalidCharacter { character: char, index: usize },
}

/// Errors produced while validating a starting position.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Missing {axis} coordinate")]
    MissingCoordinate { axis: Axis },

    #[error("Missing direction")]
    MissingHeading,

    #[error("Invalid direction '{value}', expected one of N, E, S, W")]
    InvalidHeading { value: String },

    #[error("Position ({x}, {y}) is outside of the grid {bounds}")]
    OutOfBounds { x: i64, y: i64, bounds: GridBounds },
}

/// Errors produced while executing instructions.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SimulationError {
    #[error("Start position {start} is outside of the grid {bounds}")]
    StartOutOfBounds { start: Position, bounds: GridBounds },

    /// `position` is the last valid pose and `trajectory` holds every pose reached
    /// before the offending command.
    #[error(
        "Instruction {index} would move the rover from {position} outside of the grid {bounds}"
    )]
    BoundaryViolation {
        index: usize,
        position: Position,
        trajectory: Vec<Position>,
        bounds: GridBounds,
    },
}

/// Errors produced by run recorders.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Could not access run log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed run record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize run record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Run log lock was poisoned")]
    Poisoned,
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid grid bounds: min ({min}) is greater than max ({max}) on the {axis} axis")]
    InvalidBounds { axis: Axis, min: i32, max: i32 },
}

/// Top level error for the rover engine.
#[derive(Debug, Error)]
pub enum RoverError {
    #[error("Coordinates are required")]
    MissingCoordinates,

    #[error("Instructions are required")]
    MissingInstructions,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RoverError {
    /// Get a short error code for logging and for callers that render their own messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCoordinates => "MISSING_COORDINATES",
            Self::MissingInstructions => "MISSING_INSTRUCTIONS",
            Self::Parse(ParseError::EmptyInstructions) => "EMPTY_INSTRUCTIONS",
            Self::Parse(ParseError::InvalidCharacter { .. }) => "INVALID_CHARACTER",
            Self::Validation(ValidationError::MissingCoordinate { .. }) => "MISSING_COORDINATE",
            Self::Validation(ValidationError::MissingHeading) => "MISSING_HEADING",
            Self::Validation(ValidationError::InvalidHeading { .. }) => "INVALID_HEADING",
            Self::Validation(ValidationError::OutOfBounds { .. }) => "OUT_OF_BOUNDS",
            Self::Simulation(SimulationError::StartOutOfBounds { .. }) => "OUT_OF_BOUNDS",
            Self::Simulation(SimulationError::BoundaryViolation { .. }) => "BOUNDARY_VIOLATION",
            Self::Recorder(_) => "RECORDER",
            Self::Config(_) => "CONFIG",
        }
    }

    /// Whether the error was caused by the caller's input rather than by the environment.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Recorder(_) | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, RoverError>;
