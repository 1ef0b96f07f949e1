use glam::IVec2;
use pacman_arcade::constants::{MapTile, BOARD_CELL_SIZE, RAW_BOARD};
use pacman_arcade::error::ParseError;
use pacman_arcade::map::parser::{BoardCell, MapTileParser};
use pacman_arcade::systems::Ghost;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_parse_character() {
    let test_cases = [
        ('#', BoardCell::Tile(MapTile::Wall)),
        ('.', BoardCell::Tile(MapTile::Pellet)),
        ('o', BoardCell::Tile(MapTile::PowerPellet)),
        (' ', BoardCell::Tile(MapTile::Empty)),
        ('P', BoardCell::PacmanStart),
        ('G', BoardCell::GhostStart),
    ];

    for (character, expected) in test_cases {
        assert_that(&MapTileParser::parse_character(character)).is_ok_containing(expected);
    }

    assert_that(&MapTileParser::parse_character('Z')).is_err_containing(ParseError::UnknownCharacter('Z'));
}

#[test]
fn test_parse_board() {
    let parsed = MapTileParser::parse_board(&RAW_BOARD).expect("default board should parse");

    assert_eq!(parsed.size, BOARD_CELL_SIZE.as_ivec2());
    assert_that(&parsed.tiles.len()).is_equal_to((BOARD_CELL_SIZE.x * BOARD_CELL_SIZE.y) as usize);
    assert_eq!(parsed.pacman_start, IVec2::new(9, 11));
    assert_eq!(
        parsed.ghost_starts.to_vec(),
        vec![
            (Ghost::Pinky, IVec2::new(9, 5)),
            (Ghost::Inky, IVec2::new(8, 7)),
            (Ghost::Clyde, IVec2::new(10, 7)),
        ]
    );
}

#[test]
fn test_parse_board_start_cells_are_floor() {
    let parsed = MapTileParser::parse_board(&["#PG.#"]).unwrap();

    assert_eq!(
        parsed.tiles,
        vec![MapTile::Wall, MapTile::Empty, MapTile::Empty, MapTile::Pellet, MapTile::Wall]
    );
}

#[test]
fn test_parse_board_ghost_identities_cycle() {
    let parsed = MapTileParser::parse_board(&["PGGGG."]).unwrap();
    let ghosts: Vec<Ghost> = parsed.ghost_starts.iter().map(|(ghost, _)| *ghost).collect();

    assert_eq!(ghosts, vec![Ghost::Pinky, Ghost::Inky, Ghost::Clyde, Ghost::Pinky]);
}

#[test]
fn test_parse_board_invalid_character() {
    let mut invalid_board = RAW_BOARD.map(|s| s.to_string());
    invalid_board[0] = "##################Z".to_string();

    let result = MapTileParser::parse_board(&invalid_board.each_ref().map(|s| s.as_str()));
    assert_that(&matches!(result, Err(ParseError::UnknownCharacter('Z')))).is_true();
}

#[test]
fn test_parse_board_ragged_row() {
    let result = MapTileParser::parse_board(&["#####", "#PG#", "#####"]);

    assert_that(&matches!(
        result,
        Err(ParseError::RaggedRow {
            row: 1,
            expected: 5,
            found: 4
        })
    ))
    .is_true();
}

#[test]
fn test_parse_board_empty() {
    assert_that(&matches!(MapTileParser::parse_board(&[]), Err(ParseError::EmptyBoard))).is_true();
    assert_that(&matches!(MapTileParser::parse_board(&[""]), Err(ParseError::EmptyBoard))).is_true();
}

#[test]
fn test_parse_board_pacman_start_count() {
    assert_that(&matches!(
        MapTileParser::parse_board(&["#..G#"]),
        Err(ParseError::InvalidPacmanStartCount(0))
    ))
    .is_true();
    assert_that(&matches!(
        MapTileParser::parse_board(&["#PPG#"]),
        Err(ParseError::InvalidPacmanStartCount(2))
    ))
    .is_true();
}

#[test]
fn test_parse_board_requires_a_ghost() {
    assert_that(&matches!(MapTileParser::parse_board(&["#P..#"]), Err(ParseError::NoGhostStarts))).is_true();
}

#[test]
fn test_parse_board_requires_a_pellet() {
    assert_that(&matches!(MapTileParser::parse_board(&["#PG#"]), Err(ParseError::NoPellets))).is_true();
    assert_that(&matches!(MapTileParser::parse_board(&["#P G #"]), Err(ParseError::NoPellets))).is_true();

    // A lone power pellet is enough
    assert_that(&MapTileParser::parse_board(&["#PGo#"]).is_ok()).is_true();
}
