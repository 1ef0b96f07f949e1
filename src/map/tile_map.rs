//! The maze grid and its pellet state.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::MapTile;
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::parser::MapTileParser;
use crate::systems::components::Ghost;

/// The game's tile map.
///
/// Holds the fixed-size grid of tiles along with the starting cells discovered while parsing.
/// The only mutation after construction is a pellet turning into floor when eaten.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    tiles: Vec<MapTile>,
    size: IVec2,
    tile_size: i32,
    pellets_remaining: usize,
    pacman_start: IVec2,
    ghost_starts: SmallVec<[(Ghost, IVec2); 4]>,
}

impl TileMap {
    /// Creates a new `TileMap` from a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is not positive or the board fails to parse.
    pub fn new(raw_board: &[&str], tile_size: i32) -> GameResult<TileMap> {
        if tile_size <= 0 {
            return Err(MapError::InvalidTileSize(tile_size).into());
        }

        let parsed = MapTileParser::parse_board(raw_board)?;
        let pellets_remaining = parsed.tiles.iter().filter(|tile| tile.is_pellet()).count();

        debug!(
            width = parsed.size.x,
            height = parsed.size.y,
            pellets = pellets_remaining,
            ghosts = parsed.ghost_starts.len(),
            "Tile map built"
        );

        Ok(TileMap {
            tiles: parsed.tiles,
            size: parsed.size,
            tile_size,
            pellets_remaining,
            pacman_start: parsed.pacman_start,
            ghost_starts: parsed.ghost_starts,
        })
    }

    /// Board size, in tiles.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Board size, in pixels.
    pub fn pixel_size(&self) -> IVec2 {
        self.size * self.tile_size
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Pixel position of Pac-Man's starting cell.
    pub fn pacman_start(&self) -> IVec2 {
        self.pacman_start * self.tile_size
    }

    /// Each ghost's identity and the pixel position of its starting cell.
    pub fn ghost_starts(&self) -> impl Iterator<Item = (Ghost, IVec2)> + '_ {
        self.ghost_starts
            .iter()
            .map(move |(ghost, cell)| (*ghost, *cell * self.tile_size))
    }

    /// Returns the tile at the given cell, or `None` outside the board.
    pub fn tile_at(&self, cell: IVec2) -> Option<MapTile> {
        self.index_of(cell).map(|index| self.tiles[index])
    }

    /// Iterates every cell along with its tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        let width = self.size.x;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (IVec2::new(index as i32 % width, index as i32 / width), *tile))
    }

    /// Whether a pixel position lies exactly on a tile boundary on both axes.
    pub fn is_aligned(&self, position: IVec2) -> bool {
        position.x.rem_euclid(self.tile_size) == 0 && position.y.rem_euclid(self.tile_size) == 0
    }

    /// The cell containing a pixel position.
    pub fn cell_of(&self, position: IVec2) -> IVec2 {
        IVec2::new(position.x.div_euclid(self.tile_size), position.y.div_euclid(self.tile_size))
    }

    /// Whether moving from `position` in `direction` would run into a wall.
    ///
    /// Only aligned positions can collide: between tiles an entity is always free to finish its step.
    /// Cells outside the board count as walls.
    pub fn did_collide_with_environment(&self, position: IVec2, direction: Direction) -> bool {
        if !self.is_aligned(position) {
            return false;
        }

        let next = self.cell_of(position) + direction.as_ivec2();
        !matches!(
            self.tile_at(next),
            Some(MapTile::Empty | MapTile::Pellet | MapTile::PowerPellet)
        )
    }

    /// Eats the pellet under an aligned position, returning what was eaten.
    pub fn eat_pellet(&mut self, position: IVec2) -> Option<MapTile> {
        if !self.is_aligned(position) {
            return None;
        }

        let cell = self.cell_of(position);
        let index = self.index_of(cell)?;
        let tile = self.tiles[index];
        if !tile.is_pellet() {
            return None;
        }

        self.tiles[index] = MapTile::Empty;
        self.pellets_remaining -= 1;
        trace!(?cell, ?tile, remaining = self.pellets_remaining, "Pellet eaten");
        Some(tile)
    }

    /// Pellets and power pellets still on the board.
    pub fn pellets_remaining(&self) -> usize {
        self.pellets_remaining
    }

    /// True once every pellet and power pellet has been eaten.
    pub fn did_win(&self) -> bool {
        self.pellets_remaining == 0
    }

    fn index_of(&self, cell: IVec2) -> Option<usize> {
        let in_bounds = (0..self.size.x).contains(&cell.x) && (0..self.size.y).contains(&cell.y);
        in_bounds.then(|| (cell.y * self.size.x + cell.x) as usize)
    }
}
