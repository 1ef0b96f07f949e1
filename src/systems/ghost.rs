use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    constants::ghost::{DIRECTION_TIMER_RANGE, SCARED_FLASH_TICKS},
    map::{direction::Direction, tile_map::TileMap},
    systems::{
        components::{
            DirectionTimer, GameRng, Ghost, GhostState, PlayerControlled, Position, ScaredFlash, SpawnPoint, Velocity,
        },
        movement::try_step,
        player::CombatState,
    },
};

/// Picks a heading uniformly at random.
pub fn random_direction(rng: &mut impl Rng) -> Direction {
    Direction::DIRECTIONS[rng.random_range(0..Direction::DIRECTIONS.len())]
}

/// Draws a ghost's direction-change interval.
pub fn random_timer_interval(rng: &mut impl Rng) -> u32 {
    rng.random_range(DIRECTION_TIMER_RANGE)
}

/// Greedy chase heuristic.
///
/// Ranks the four directions by the Manhattan distance from the neighbouring cell to the target's
/// cell and returns the closest one that is not blocked. Ties keep the order up, down, left,
/// right. Returns `None` only when every direction is walled off.
pub fn choose_direction(map: &TileMap, position: IVec2, target: IVec2) -> Option<Direction> {
    let cell = map.cell_of(position);
    let target_cell = map.cell_of(target);

    let mut ranked: SmallVec<[(Direction, i32); 4]> = Direction::DIRECTIONS
        .iter()
        .map(|&direction| {
            let delta = cell + direction.as_ivec2() - target_cell;
            (direction, delta.x.abs() + delta.y.abs())
        })
        .collect();
    // `sort_by_key` is stable, which keeps the tie order intact
    ranked.sort_by_key(|&(_, distance)| distance);

    ranked
        .into_iter()
        .map(|(direction, _)| direction)
        .find(|&direction| !map.did_collide_with_environment(position, direction))
}

/// Moves every active ghost, then lets it reconsider its heading once its timer runs out.
#[allow(clippy::type_complexity)]
pub fn ghost_movement_system(
    map: Res<TileMap>,
    players: Query<&Position, (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(&Ghost, &mut Position, &mut Velocity, &mut DirectionTimer, &GhostState), Without<PlayerControlled>>,
) {
    let Ok(pacman) = players.single() else {
        return;
    };

    for (ghost, mut position, mut velocity, mut timer, state) in ghosts.iter_mut() {
        if state.is_eaten() {
            continue;
        }

        if let Some(direction) = velocity.direction {
            if let Some(next) = try_step(&map, position.0, direction, velocity.speed) {
                position.0 = next;
            }
        }

        timer.remaining = timer.remaining.saturating_sub(1);
        if timer.remaining > 0 || !map.is_aligned(position.0) {
            continue;
        }

        timer.remaining = timer.interval;
        if let Some(direction) = choose_direction(&map, position.0, pacman.0) {
            if velocity.direction != Some(direction) {
                trace!(ghost = ghost.as_ref(), ?direction, "Ghost changed direction");
            }
            velocity.direction = Some(direction);
        }
    }
}

/// Counts down eaten ghosts and puts them back at their start once the timer expires.
///
/// Runs every tick, including while the game is paused.
pub fn ghost_respawn_system(
    mut rng: ResMut<GameRng>,
    mut ghosts: Query<(&Ghost, &SpawnPoint, &mut Position, &mut Velocity, &mut GhostState)>,
) {
    for (ghost, spawn, mut position, mut velocity, mut state) in ghosts.iter_mut() {
        let GhostState::Eaten { respawn_ticks } = &mut *state else {
            continue;
        };

        *respawn_ticks = respawn_ticks.saturating_sub(1);
        if *respawn_ticks > 0 {
            continue;
        }

        *state = GhostState::Active;
        position.0 = spawn.0;
        velocity.direction = Some(random_direction(&mut rng.0));
        debug!(ghost = ghost.as_ref(), direction = ?velocity.direction, "Ghost respawned");
    }
}

/// Alternates the scared look of every ghost while the power-up is about to expire.
pub fn scared_flash_system(
    players: Query<&CombatState, With<PlayerControlled>>,
    mut ghosts: Query<&mut ScaredFlash, With<Ghost>>,
) {
    let expiring = players.iter().any(CombatState::is_about_to_expire);

    for mut flash in ghosts.iter_mut() {
        if !expiring {
            flash.alternate = false;
            continue;
        }

        flash.countdown = flash.countdown.saturating_sub(1);
        if flash.countdown == 0 {
            flash.countdown = SCARED_FLASH_TICKS;
            flash.alternate = !flash.alternate;
        }
    }
}
