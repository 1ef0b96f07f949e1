use glam::IVec2;

use crate::map::direction::Direction;
use crate::map::tile_map::TileMap;

/// Attempts one step from `position` in `direction`.
///
/// Returns the new position, or `None` when a wall blocks the way. Walls are only checked on
/// tile boundaries, so an entity that started a tile always finishes it.
pub fn try_step(map: &TileMap, position: IVec2, direction: Direction, speed: i32) -> Option<IVec2> {
    if map.did_collide_with_environment(position, direction) {
        return None;
    }
    Some(position + direction.as_ivec2() * speed)
}
