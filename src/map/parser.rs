//! Map parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;
use smallvec::SmallVec;

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::systems::components::Ghost;

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// The parsed tiles, row-major.
    pub tiles: Vec<MapTile>,
    /// Board size in tiles.
    pub size: IVec2,
    /// Pac-Man's starting cell.
    pub pacman_start: IVec2,
    /// Each ghost's identity and starting cell, in reading order.
    pub ghost_starts: SmallVec<[(Ghost, IVec2); 4]>,
}

/// A single board character, after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCell {
    Tile(MapTile),
    PacmanStart,
    GhostStart,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a board cell.
    ///
    /// Starting positions are floor tiles; they are reported separately so the caller can record them.
    pub fn parse_character(c: char) -> Result<BoardCell, ParseError> {
        match c {
            '#' => Ok(BoardCell::Tile(MapTile::Wall)),
            '.' => Ok(BoardCell::Tile(MapTile::Pellet)),
            'o' => Ok(BoardCell::Tile(MapTile::PowerPellet)),
            ' ' => Ok(BoardCell::Tile(MapTile::Empty)),
            'P' => Ok(BoardCell::PacmanStart),
            'G' => Ok(BoardCell::GhostStart),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, its rows differ in width, it contains unknown
    /// characters, it does not have exactly one Pac-Man start and at least one ghost start, or it
    /// holds no pellets.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().map(|row| row.chars().count()).ok_or(ParseError::EmptyBoard)?;
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut pacman_starts: SmallVec<[IVec2; 1]> = SmallVec::new();
        let mut ghost_starts: SmallVec<[(Ghost, IVec2); 4]> = SmallVec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let cell = IVec2::new(x as i32, y as i32);
                let tile = match Self::parse_character(character)? {
                    BoardCell::Tile(tile) => tile,
                    BoardCell::PacmanStart => {
                        pacman_starts.push(cell);
                        MapTile::Empty
                    }
                    BoardCell::GhostStart => {
                        let ghost = Ghost::ROSTER[ghost_starts.len() % Ghost::ROSTER.len()];
                        ghost_starts.push((ghost, cell));
                        MapTile::Empty
                    }
                };
                tiles.push(tile);
            }
        }

        let pacman_start = match pacman_starts.as_slice() {
            [start] => *start,
            others => return Err(ParseError::InvalidPacmanStartCount(others.len())),
        };

        if ghost_starts.is_empty() {
            return Err(ParseError::NoGhostStarts);
        }

        // A board with nothing to eat could never be played, only won
        if !tiles.iter().any(|tile| tile.is_pellet()) {
            return Err(ParseError::NoPellets);
        }

        Ok(ParsedMap {
            tiles,
            size: IVec2::new(width as i32, raw_board.len() as i32),
            pacman_start,
            ghost_starts,
        })
    }
}
