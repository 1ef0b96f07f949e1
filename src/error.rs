//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs. It doubles as an ECS
/// event so systems can report failures without aborting the frame.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Console initialization failed: {0}")]
    ConsoleInit(String),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board has no rows")]
    EmptyBoard,
    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board must have exactly one Pac-Man start, found {0}")]
    InvalidPacmanStartCount(usize),
    #[error("Board has no ghost start positions")]
    NoGhostStarts,
    #[error("Board has no pellets to eat")]
    NoPellets,
}

/// Errors related to map configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(i32),
}

/// Errors raised while building or validating a game configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tile size must be positive, got {0}")]
    InvalidTileSize(i32),
    #[error("Velocity must be positive, got {0}")]
    InvalidVelocity(i32),
    #[error("Tile size {tile_size} is not a multiple of velocity {velocity}")]
    MisalignedVelocity { tile_size: i32, velocity: i32 },
    #[error("A game needs at least one life")]
    NoLives,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
