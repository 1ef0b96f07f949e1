//! Game configuration: defaults from [`crate::constants`], overridable from the command line.

use bevy_ecs::resource::Resource;
use clap::Parser;
use tracing::debug;

use crate::{
    constants::{RAW_BOARD, STARTING_LIVES, TILE_SIZE, VELOCITY},
    error::ConfigError,
};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Edge length of a tile in pixels.
    pub tile_size: i32,
    /// Pixels moved per tick by Pac-Man and the ghosts.
    pub velocity: i32,
    pub starting_lives: u8,
    /// Seed for ghost randomness; `None` draws one from the system.
    pub seed: Option<u64>,
    pub muted: bool,
    /// Log to a console even where one would not normally be attached.
    pub force_console: bool,
    pub board: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            velocity: VELOCITY,
            starting_lives: STARTING_LIVES,
            seed: None,
            muted: false,
            force_console: false,
            board: RAW_BOARD.iter().map(|row| row.to_string()).collect(),
        }
    }
}

/// A small tile-based Pac-Man clone
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version)]
pub struct Cli {
    /// Log to a console even where one would not normally be attached
    #[arg(long, short)]
    pub console: bool,
    /// Seed for ghost randomness, for reproducible games
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Lives Pac-Man starts with
    #[arg(long, value_name = "N", default_value_t = STARTING_LIVES)]
    pub lives: u8,
    /// Start with audio muted
    #[arg(long)]
    pub muted: bool,
}

impl GameConfig {
    /// Builds a validated configuration from parsed command-line flags, keeping defaults for
    /// everything the command line does not cover.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let config = Self {
            starting_lives: cli.lives,
            seed: cli.seed,
            muted: cli.muted,
            force_console: cli.console,
            ..Self::default()
        };
        debug!(seed = ?config.seed, lives = config.starting_lives, muted = config.muted, "Configuration loaded");

        config.validate()?;
        Ok(config)
    }

    /// Checks that entities can land exactly on tile boundaries and that the player has a life to lose.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.velocity <= 0 {
            return Err(ConfigError::InvalidVelocity(self.velocity));
        }
        if self.tile_size % self.velocity != 0 {
            return Err(ConfigError::MisalignedVelocity {
                tile_size: self.tile_size,
                velocity: self.velocity,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    pub fn board_rows(&self) -> Vec<&str> {
        self.board.iter().map(String::as_str).collect()
    }
}
