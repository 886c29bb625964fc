use crate::error::ParseError;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A single instruction for the rover.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// Quarter turn counter-clockwise (`L`).
    TurnLeft,
    /// Quarter turn clockwise (`R`).
    TurnRight,
    /// One cell forward in the current heading (`M`).
    MoveForward,
}

impl Command {
    pub fn as_char(self) -> char {
        match self {
            Command::TurnLeft => 'L',
            Command::TurnRight => 'R',
            Command::MoveForward => 'M',
        }
    }

    pub fn from_char(value: char) -> Option<Command> {
        match value {
            'L' => Some(Command::TurnLeft),
            'R' => Some(Command::TurnRight),
            'M' => Some(Command::MoveForward),
            _ => None,
        }
    }
}

impl Distribution<Command> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Command {
        match rng.gen_range(0..3) {
            0 => Command::TurnLeft,
            1 => Command::TurnRight,
            _ => Command::MoveForward,
        }
    }
}

/// A parsed, non-empty sequence of commands in execution order.
///
/// Serializes back to the `L`/`R`/`M` string it was parsed from.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instructions {
    commands: Vec<Command>,
}

impl Instructions {
    /// Wraps an already built command sequence. Fails if the sequence is empty.
    pub fn new(commands: Vec<Command>) -> Result<Instructions, ParseError> {
        if commands.is_empty() {
            return Err(ParseError::EmptyInstructions);
        }

        Ok(Instructions { commands })
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false`, parsing never produces an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }
}

impl IntoIterator for Instructions {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.commands
            .iter()
            .try_for_each(|command| write!(f, "{}", command.as_char()))
    }
}

impl FromStr for Instructions {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse(raw)
    }
}

impl TryFrom<String> for Instructions {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        parse(&raw)
    }
}

impl From<Instructions> for String {
    fn from(instructions: Instructions) -> Self {
        instructions.to_string()
    }
}

fn invalid_character() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r"[^LRM]").unwrap())
}

/// Parses a raw instruction string into commands.
///
/// Only uppercase `L`, `R` and `M` are accepted. Nothing is trimmed, so whitespace is
/// reported as an invalid character like anything else outside the alphabet.
///
/// # Arguments
/// * `raw` - The instruction string, e.g. `"LMLMLMLMM"`.
pub fn parse(raw: &str) -> Result<Instructions, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::EmptyInstructions);
    }

    if let Some(found) = invalid_character().find(raw) {
        // Report the position in characters so multi-byte input points at the right spot
        let index = raw[..found.start()].chars().count();
        let character = found.as_str().chars().next().unwrap_or_default();
        return Err(ParseError::InvalidCharacter { character, index });
    }

    let commands = raw.chars().filter_map(Command::from_char).collect();
    Ok(Instructions { commands })
}
