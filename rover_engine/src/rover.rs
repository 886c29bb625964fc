use crate::error::SimulationError;
use crate::grid::GridBounds;
use crate::instructions::{Command, Instructions};
use crate::position::Position;
use log::debug;
use serde::{Deserialize, Serialize};

/// The outcome of a run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// The validated pose the rover started from.
    pub start: Position,
    /// The commands that were executed.
    pub instructions: Instructions,
    /// The pose after the last command.
    pub end: Position,
    /// The pose after each command, in execution order.
    pub trajectory: Vec<Position>,
}

impl RunResult {
    /// The end position as `"<x> <y> <heading>"`.
    pub fn formatted(&self) -> String {
        self.end.to_string()
    }
}

/// The rover state machine.
///
/// Owns its pose for the duration of a run. A command that would take it off the grid is
/// refused and leaves the pose untouched.
#[derive(Clone, Debug)]
pub struct Rover {
    position: Position,
}

impl Rover {
    pub fn new(position: Position) -> Rover {
        Rover { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Applies a single command.
    ///
    /// Returns the cell the rover would have reached as `Err` when a move leaves `bounds`.
    /// The cell is kept as `i64` since it may lie outside of the `i32` range.
    pub fn apply(
        &mut self,
        command: Command,
        bounds: &GridBounds,
    ) -> Result<Position, (i64, i64)> {
        let Position { x, y, heading } = self.position;

        match command {
            Command::TurnLeft => self.position.heading = heading.left(),
            Command::TurnRight => self.position.heading = heading.right(),
            Command::MoveForward => {
                let (dx, dy) = heading.offset();
                let (to_x, to_y) = (i64::from(x) + dx, i64::from(y) + dy);

                if !bounds.contains(to_x, to_y) {
                    return Err((to_x, to_y));
                }

                // In bounds, so both fit in `i32`
                self.position.x = to_x as i32;
                self.position.y = to_y as i32;
            }
        }

        Ok(self.position)
    }
}

/// Runs `instructions` from `start`.
///
/// The run is all or nothing: a move that would leave `bounds` aborts it with
/// [`SimulationError::BoundaryViolation`], which carries the offending command index and
/// the poses reached so far. No [`RunResult`] is produced in that case.
///
/// # Arguments
/// * `start` - The pose to start from. Must be inside `bounds`.
/// * `instructions` - The parsed commands, consumed by the run.
/// * `bounds` - The grid the rover must stay on.
pub fn simulate(
    start: Position,
    instructions: Instructions,
    bounds: &GridBounds,
) -> Result<RunResult, SimulationError> {
    if !bounds.contains_position(&start) {
        return Err(SimulationError::StartOutOfBounds {
            start,
            bounds: *bounds,
        });
    }

    let mut rover = Rover::new(start);
    let mut trajectory = Vec::with_capacity(instructions.len());

    for (index, command) in instructions.iter().enumerate() {
        match rover.apply(*command, bounds) {
            Ok(position) => trajectory.push(position),
            Err((to_x, to_y)) => {
                debug!(
                    "Run from {} aborted at instruction {}: {},{} is outside of {}",
                    start, index, to_x, to_y, bounds
                );
                return Err(SimulationError::BoundaryViolation {
                    index,
                    position: rover.position(),
                    trajectory,
                    bounds: *bounds,
                });
            }
        }
    }

    let end = rover.position();
    debug!("Run from {} with {} ended at {}", start, instructions, end);

    Ok(RunResult {
        start,
        instructions,
        end,
        trajectory,
    })
}
