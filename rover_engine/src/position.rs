use crate::error::{Axis, ValidationError};
use crate::grid::GridBounds;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the direction the rover is facing.
///
/// Headings are ordered clockwise, which is what turning left and right walks through.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Heading {
    /// All headings in clockwise order starting from North.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// The heading after a quarter turn counter-clockwise.
    pub fn left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::East => Heading::North,
            Heading::South => Heading::East,
            Heading::West => Heading::South,
        }
    }

    /// The heading after a quarter turn clockwise.
    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// The `(dx, dy)` of a single step forward.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    /// Maps an uppercase cardinal letter to a heading. Lowercase letters are not accepted.
    pub fn from_char(value: char) -> Option<Heading> {
        match value {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }
}

impl FromStr for Heading {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.chars();
        let heading = match (chars.next(), chars.next()) {
            (Some(c), None) => Heading::from_char(c),
            _ => None,
        };

        heading.ok_or_else(|| ValidationError::InvalidHeading {
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Distribution<Heading> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        match rng.gen_range(0..4) {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }
}

/// The pose of the rover: where it is and which way it faces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
}

impl Position {
    pub fn new(x: i32, y: i32, heading: Heading) -> Position {
        Position { x, y, heading }
    }
}

impl fmt::Display for Position {
    /// Formats as `"<x> <y> <heading>"`, e.g. `"1 3 N"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.heading)
    }
}

/// Validates a raw starting position against the grid.
///
/// Presence is checked first (x, then y, then heading), then the heading letter, then the
/// bounds. The first failing check is reported.
///
/// # Arguments
/// * `x` - The raw x coordinate, `None` when it was not supplied.
/// * `y` - The raw y coordinate, `None` when it was not supplied.
/// * `heading` - The raw heading, one of `N`, `E`, `S`, `W` (case-sensitive).
/// * `bounds` - The grid the rover must start on.
pub fn validate_start(
    x: Option<i64>,
    y: Option<i64>,
    heading: Option<&str>,
    bounds: &GridBounds,
) -> Result<Position, ValidationError> {
    let x = x.ok_or(ValidationError::MissingCoordinate { axis: Axis::X })?;
    let y = y.ok_or(ValidationError::MissingCoordinate { axis: Axis::Y })?;
    let heading: Heading = heading.ok_or(ValidationError::MissingHeading)?.parse()?;

    if !bounds.contains(x, y) {
        return Err(ValidationError::OutOfBounds {
            x,
            y,
            bounds: *bounds,
        });
    }

    // Both fit in `i32` since the bounds do
    Ok(Position::new(x as i32, y as i32, heading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn when_turning_left_four_times_the_heading_is_restored() {
        for heading in Heading::ALL {
            assert_eq!(heading.left().left().left().left(), heading);
        }
    }

    #[test]
    fn when_turning_right_four_times_the_heading_is_restored() {
        for heading in Heading::ALL {
            assert_eq!(heading.right().right().right().right(), heading);
        }
    }

    #[test]
    fn when_turning_left_then_right_the_heading_is_unchanged() {
        for heading in Heading::ALL {
            assert_eq!(heading.left().right(), heading);
            assert_eq!(heading.right().left(), heading);
        }
    }

    #[test]
    fn when_turning_left_from_north_the_heading_wraps_to_west() {
        assert_eq!(Heading::North.left(), Heading::West);
        assert_eq!(Heading::West.right(), Heading::North);
    }

    #[test]
    fn when_parsing_a_heading_only_a_single_uppercase_letter_is_accepted() {
        assert_eq!("N".parse::<Heading>().unwrap(), Heading::North);
        assert_eq!("W".parse::<Heading>().unwrap(), Heading::West);

        for value in ["n", "", "NE", "North", " N"] {
            assert_eq!(
                value.parse::<Heading>().unwrap_err(),
                ValidationError::InvalidHeading {
                    value: value.to_string()
                }
            );
        }
    }

    #[test]
    fn when_formatting_a_position_it_is_a_space_separated_triple() {
        assert_eq!(Position::new(2, 2, Heading::East).to_string(), "2 2 E");
        assert_eq!(Position::new(-1, 0, Heading::South).to_string(), "-1 0 S");
    }

    #[test]
    fn when_serializing_a_heading_it_is_a_single_letter() {
        let json = serde_json::to_string(&Position::new(1, 2, Heading::North)).unwrap();

        assert_eq!(json, r#"{"x":1,"y":2,"heading":"N"}"#);
    }

    #[test]
    fn when_sampling_headings_all_of_them_are_produced() {
        let mut rng = StdRng::seed_from_u64(0);
        let headings: Vec<Heading> = (0..100).map(|_| rng.gen()).collect();

        for heading in Heading::ALL {
            assert!(headings.contains(&heading));
        }
    }

    #[test]
    fn when_validating_a_start_inside_the_grid_the_position_is_returned() {
        let position = validate_start(Some(0), Some(0), Some("N"), &GridBounds::default());

        assert_eq!(position.unwrap(), Position::new(0, 0, Heading::North));
    }

    #[test]
    fn when_validating_a_start_with_a_missing_coordinate_the_axis_is_reported() {
        let bounds = GridBounds::default();

        assert_eq!(
            validate_start(None, Some(1), Some("N"), &bounds).unwrap_err(),
            ValidationError::MissingCoordinate { axis: Axis::X }
        );
        assert_eq!(
            validate_start(Some(1), None, Some("N"), &bounds).unwrap_err(),
            ValidationError::MissingCoordinate { axis: Axis::Y }
        );
        assert_eq!(
            validate_start(Some(1), Some(1), None, &bounds).unwrap_err(),
            ValidationError::MissingHeading
        );
    }

    #[test]
    fn when_validating_a_start_with_an_unknown_heading_an_error_is_returned() {
        let error = validate_start(Some(1), Some(1), Some("Q"), &GridBounds::default());

        assert_eq!(
            error.unwrap_err(),
            ValidationError::InvalidHeading {
                value: "Q".to_string()
            }
        );
    }

    #[test]
    fn when_validating_a_start_outside_the_grid_an_out_of_bounds_error_is_returned() {
        let bounds = GridBounds::default();
        let error = validate_start(Some(5), Some(5), Some("N"), &bounds);

        assert_eq!(
            error.unwrap_err(),
            ValidationError::OutOfBounds { x: 5, y: 5, bounds }
        );
    }

    #[test]
    fn when_validating_a_start_beyond_the_coordinate_range_an_out_of_bounds_error_is_returned() {
        let bounds = GridBounds::default();
        let error = validate_start(Some(i64::MAX), Some(0), Some("N"), &bounds);

        assert!(matches!(
            error.unwrap_err(),
            ValidationError::OutOfBounds { .. }
        ));
    }

    #[test]
    fn when_validating_a_start_on_custom_bounds_negative_coordinates_are_accepted() {
        let bounds = GridBounds::square(-3, 3).unwrap();
        let position = validate_start(Some(-3), Some(3), Some("S"), &bounds);

        assert_eq!(position.unwrap(), Position::new(-3, 3, Heading::South));
    }
}
