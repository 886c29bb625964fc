use rover_engine::{
    parse, simulate, validate_start, Command, GridBounds, Heading, Instructions, ParseError,
    Position, SimulationError, ValidationError,
};

fn plateau() -> GridBounds {
    GridBounds::square(0, 4).unwrap()
}

fn run(x: i64, y: i64, heading: &str, instructions: &str) -> Result<Position, SimulationError> {
    let bounds = plateau();
    let start = validate_start(Some(x), Some(y), Some(heading), &bounds).unwrap();
    let instructions = parse(instructions).unwrap();

    simulate(start, instructions, &bounds).map(|result| result.end)
}

#[test]
fn when_running_mmrmm_from_the_origin_the_rover_ends_at_2_2_east() {
    // N: (0,1) (0,2), turn to E: (1,2) (2,2)
    assert_eq!(run(0, 0, "N", "MMRMM").unwrap(), Position::new(2, 2, Heading::East));
}

#[test]
fn when_running_the_classic_sequences_the_expected_positions_are_reached() {
    assert_eq!(
        run(1, 2, "N", "LMLMLMLMM").unwrap(),
        Position::new(1, 3, Heading::North)
    );

    let bounds = GridBounds::square(0, 5).unwrap();
    let start = validate_start(Some(3), Some(3), Some("E"), &bounds).unwrap();
    let result = simulate(start, parse("MMRMMRMRRM").unwrap(), &bounds).unwrap();
    assert_eq!(result.end, Position::new(5, 1, Heading::East));
    assert_eq!(result.formatted(), "5 1 E");
}

#[test]
fn when_running_the_classic_sequence_from_the_origin_the_west_edge_is_hit() {
    // The first L faces West from x = 0, so the first M is rejected
    let error = run(0, 0, "N", "LMLMLMLMM").unwrap_err();

    assert!(matches!(
        error,
        SimulationError::BoundaryViolation { index: 1, .. }
    ));
}

#[test]
fn when_leaving_the_top_right_corner_the_first_command_is_rejected() {
    let error = run(4, 4, "N", "M").unwrap_err();

    match error {
        SimulationError::BoundaryViolation {
            index,
            position,
            trajectory,
            ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(position, Position::new(4, 4, Heading::North));
            assert!(trajectory.is_empty());
        }
        other => panic!("Expected a boundary violation, got {:?}", other),
    }
}

#[test]
fn when_parsing_an_invalid_character_its_index_is_reported() {
    assert_eq!(
        parse("MMRX").unwrap_err(),
        ParseError::InvalidCharacter {
            character: 'X',
            index: 3
        }
    );
}

#[test]
fn when_starting_outside_the_grid_the_start_is_out_of_bounds() {
    let error = validate_start(Some(5), Some(5), Some("N"), &plateau()).unwrap_err();

    assert!(matches!(error, ValidationError::OutOfBounds { x: 5, y: 5, .. }));
}

#[test]
fn when_building_instructions_from_commands_the_text_form_matches() {
    let commands = vec![
        Command::MoveForward,
        Command::TurnLeft,
        Command::MoveForward,
        Command::TurnRight,
        Command::TurnRight,
    ];
    let instructions = Instructions::new(commands.clone()).unwrap();

    assert_eq!(instructions.to_string(), "MLMRR");
    assert_eq!(parse("MLMRR").unwrap().commands(), commands.as_slice());
}
