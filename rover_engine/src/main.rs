//! `rover` - drive the rover from the command line.
//!
//! ```bash
//! # Move from 1 2 N and print the final position
//! rover move --x 1 --y 2 --direction N --instructions LMLMLMLMM
//!
//! # Same run, drawn on the grid
//! rover move --x 1 --y 2 --direction N --instructions LMLMLMLMM --draw
//!
//! # List recorded runs (needs `[recorder] path` in the config)
//! rover --config rover.toml logs
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rover_engine::{Coordinates, MoveRequest, RoverConfig, RoverError, RoverService};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "rover.toml";

#[derive(Debug, Parser)]
#[command(name = "rover", version, about = "Drive a rover around a bounded grid.")]
struct RoverArgs {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a string of instructions from a starting position.
    Move {
        /// Starting x coordinate.
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i64>,
        /// Starting y coordinate.
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i64>,
        /// Starting direction, one of N, E, S, W.
        #[arg(long)]
        direction: Option<String>,
        /// Instructions made of L (turn left), R (turn right) and M (move forward).
        #[arg(long)]
        instructions: Option<String>,
        /// Draw the grid and the path of the rover.
        #[arg(long)]
        draw: bool,
        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List recorded runs.
    Logs {
        /// Print the raw records as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = RoverArgs::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            // Bad input gets its own exit code so scripts can tell it apart from I/O trouble
            match e.downcast_ref::<RoverError>() {
                Some(e) if e.is_input_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RoverConfig> {
    match path {
        Some(path) => RoverConfig::load(path)
            .with_context(|| format!("Could not load config from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            RoverConfig::load(Path::new(DEFAULT_CONFIG)).context("Could not load rover.toml")
        }
        None => Ok(RoverConfig::default()),
    }
}

fn run(command: Commands, config: &RoverConfig) -> Result<()> {
    let service = RoverService::from_config(config)?;

    match command {
        Commands::Move {
            x,
            y,
            direction,
            instructions,
            draw,
            json,
        } => {
            let request = MoveRequest {
                coordinates: Some(Coordinates { x, y, direction }),
                instructions,
            };

            let response = match service.move_rover(&request) {
                Ok(response) => response,
                Err(e) if json => {
                    let error = json!({ "error": e.to_string(), "code": e.code() });
                    println!("{}", serde_json::to_string_pretty(&error)?);
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };

            if draw {
                service.bounds().draw(&response.result)?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.formatted_result);
            }
        }
        Commands::Logs { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&service.logs()?)?);
                return Ok(());
            }

            for log in service.formatted_logs()? {
                println!(
                    "{}  {} -> {}  {}  {}",
                    log.created, log.initial_position, log.final_position, log.commands, log.id
                );
            }
        }
    }

    Ok(())
}
