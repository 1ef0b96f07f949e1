//! This module contains all the constants used in the game.

use std::ops::RangeInclusive;
use std::time::Duration;

use glam::UVec2;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 75;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: i32 = 32;
/// Distance travelled per tick by Pac-Man and the ghosts, in pixels.
pub const VELOCITY: i32 = 2;
/// Lives at the start of a game.
pub const STARTING_LIVES: u8 = 3;

/// Height of the score/lives strip below the maze, in pixels.
pub const HUD_HEIGHT: u32 = 32;

/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(19, 13);
/// The size of the canvas (maze plus HUD strip), in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(
    BOARD_CELL_SIZE.x * TILE_SIZE as u32,
    BOARD_CELL_SIZE.y * TILE_SIZE as u32 + HUD_HEIGHT,
);

/// Power pellet timings, in ticks.
pub mod power {
    use super::TICKS_PER_SECOND;

    /// How long a power pellet keeps Pac-Man powered.
    pub const DURATION_TICKS: u32 = 6 * TICKS_PER_SECOND;
    /// Length of the closing window during which the power-up is about to expire.
    pub const EXPIRY_WARNING_TICKS: u32 = 3 * TICKS_PER_SECOND;
}

/// Ghost timings, in ticks.
pub mod ghost {
    use super::RangeInclusive;

    /// Range the per-ghost direction-change interval is drawn from.
    pub const DIRECTION_TIMER_RANGE: RangeInclusive<u32> = 10..=25;
    /// Time an eaten ghost stays away before reappearing at its start.
    pub const RESPAWN_TICKS: u32 = 60 * 5;
    /// Interval between the two scared looks while the power-up is about to expire.
    pub const SCARED_FLASH_TICKS: u32 = 10;
}

/// Points awarded for each kind of capture.
pub mod score {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    pub const GHOST: u32 = 200;
}

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// Walkable floor with nothing on it.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
}

impl MapTile {
    /// Whether this tile still holds something to eat.
    pub fn is_pellet(self) -> bool {
        matches!(self, MapTile::Pellet | MapTile::PowerPellet)
    }
}

/// The raw layout of the game board, as rows of characters.
///
/// `#` wall, `.` pellet, `o` power pellet, ` ` floor, `P` Pac-Man's start, `G` a ghost's start.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...G...#....#",
    "####.###.#.###.####",
    "#....#..G.G..#....#",
    "#.##.#.#####.#.##.#",
    "#.................#",
    "#.##.###.#.###.##.#",
    "#o.......P.......o#",
    "###################",
];
