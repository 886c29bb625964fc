//! # rover_engine
//!
//! The core engine for the Mars Rover exercise.
//! A rover is placed on a bounded grid and driven by a string of `L`, `R` and `M`
//! instructions. Every run is deterministic, and every finished run can be recorded and
//! announced to listeners.

pub mod config;
pub mod error;
pub mod grid;
pub mod instructions;
pub mod notify;
pub mod position;
pub mod recorder;
pub mod rover;
pub mod service;

pub use config::RoverConfig;
pub use error::{
    Axis, ConfigError, ParseError, RecorderError, Result, RoverError, SimulationError,
    ValidationError,
};
pub use grid::{GridBounds, MAX_RENDER_SIDE};
pub use instructions::{parse, Command, Instructions};
pub use notify::{ChannelNotifier, LogNotifier, NoOpNotifier, NotificationSink, RunEvent};
pub use position::{validate_start, Heading, Position};
pub use recorder::{
    create_run_recorder, JsonRunRecorder, MemoryRunRecorder, NoOpRunRecorder, RunRecord,
    RunRecorder,
};
pub use rover::{simulate, Rover, RunResult};
pub use service::{Coordinates, FormattedRunLog, MoveRequest, MoveResponse, RoverService};
