//! Map rendering functionality.

use glam::IVec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget};

use crate::constants::MapTile;
use crate::map::tile_map::TileMap;

const WALL_COLOR: Color = Color::RGB(33, 33, 222);
const PELLET_COLOR: Color = Color::RGB(255, 184, 151);

/// Handles rendering operations for the map.
pub struct MapRenderer;

impl MapRenderer {
    /// Draws walls and remaining pellets, with the board's top-left corner at `offset`.
    pub fn render_tiles<T: RenderTarget>(canvas: &mut Canvas<T>, map: &TileMap, offset: IVec2) -> Result<(), String> {
        let tile_size = map.tile_size();
        let half = tile_size / 2;

        for (cell, tile) in map.tiles() {
            let origin = offset + cell * tile_size;
            let center = origin + IVec2::splat(half);

            match tile {
                MapTile::Wall => {
                    canvas.set_draw_color(WALL_COLOR);
                    canvas.fill_rect(Rect::new(origin.x, origin.y, tile_size as u32, tile_size as u32))?;
                }
                MapTile::Pellet => {
                    canvas.filled_circle(center.x as i16, center.y as i16, (tile_size / 10).max(1) as i16, PELLET_COLOR)?;
                }
                MapTile::PowerPellet => {
                    canvas.filled_circle(center.x as i16, center.y as i16, (tile_size / 4).max(2) as i16, PELLET_COLOR)?;
                }
                MapTile::Empty => {}
            }
        }

        Ok(())
    }
}
