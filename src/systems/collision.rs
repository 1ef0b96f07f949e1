use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{Query, ResMut},
};
use tracing::{debug, info, warn};

use crate::{
    audio::Sound,
    constants::{ghost::RESPAWN_TICKS, score},
    events::GameEvent,
    systems::{
        audio::AudioEvent,
        components::{
            Collider, DirectionTimer, GameRng, Ghost, GhostCollider, GhostState, MadeFirstMove, PacmanCollider,
            PlayerControlled, Position, RequestedDirection, ScaredFlash, ScoreResource, SpawnPoint, Velocity,
        },
        ghost::random_direction,
        player::CombatState,
        stage::{GameStage, PlayerLives},
    },
};

/// Detects overlaps between Pac-Man and every ghost that is still in play.
pub fn collision_system(
    pacman_query: Query<(Entity, &Position, &Collider), With<PacmanCollider>>,
    ghost_query: Query<(Entity, &Position, &Collider, &GhostState), With<GhostCollider>>,
    mut events: EventWriter<GameEvent>,
) {
    for (pacman, pacman_position, pacman_collider) in pacman_query.iter() {
        for (ghost, ghost_position, ghost_collider, state) in ghost_query.iter() {
            if state.is_eaten() {
                continue;
            }

            if pacman_collider.overlaps(pacman_position.0, ghost_collider, ghost_position.0) {
                events.write(GameEvent::Collision(pacman, ghost));
            }
        }
    }
}

/// Resolves Pac-Man/ghost collisions.
///
/// A powered Pac-Man eats the ghost. Otherwise a life is lost (at most one per tick): with lives
/// to spare everyone returns to their start and the game waits for a new first move, without
/// any the game is over.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn ghost_collision_system(
    mut collisions: EventReader<GameEvent>,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<PlayerLives>,
    mut stage: ResMut<GameStage>,
    mut rng: ResMut<GameRng>,
    mut pacman_query: Query<
        (
            &SpawnPoint,
            &mut Position,
            &mut Velocity,
            &mut RequestedDirection,
            &mut MadeFirstMove,
            &mut CombatState,
        ),
        With<PlayerControlled>,
    >,
    mut ghost_query: Query<
        (
            &Ghost,
            &SpawnPoint,
            &mut Position,
            &mut Velocity,
            &mut DirectionTimer,
            &mut GhostState,
            &mut ScaredFlash,
        ),
        (With<GhostCollider>, Without<PlayerControlled>),
    >,
    mut audio_events: EventWriter<AudioEvent>,
) {
    let mut life_lost = false;

    for event in collisions.read() {
        let GameEvent::Collision(pacman_entity, ghost_entity) = *event else {
            continue;
        };

        if life_lost || *stage != GameStage::Playing {
            break;
        }

        let Ok((_, _, _, _, _, combat)) = pacman_query.get(pacman_entity) else {
            warn!(entity = ?pacman_entity, "Collision reported for a missing player");
            continue;
        };
        let powered = combat.is_powered();

        if powered {
            let Ok((ghost, _, _, _, _, mut state, _)) = ghost_query.get_mut(ghost_entity) else {
                warn!(entity = ?ghost_entity, "Collision reported for a missing ghost");
                continue;
            };
            if state.is_eaten() {
                continue;
            }

            *state = GhostState::Eaten {
                respawn_ticks: RESPAWN_TICKS,
            };
            score.0 += score::GHOST;
            debug!(ghost = ghost.as_ref(), score = score.0, "Ghost eaten");
            audio_events.write(AudioEvent::PlaySound(Sound::EatGhost));
            continue;
        }

        life_lost = true;
        lives.0 = lives.0.saturating_sub(1);

        if lives.0 == 0 {
            info!(score = score.0, "Out of lives, game over");
            *stage = GameStage::GameOver;
            audio_events.write(AudioEvent::StopAll);
            audio_events.write(AudioEvent::PlaySound(Sound::GameOver));
            continue;
        }

        debug!(lives = lives.0, "Life lost, resetting positions");
        audio_events.write(AudioEvent::PlaySound(Sound::Death));

        for (spawn, mut position, mut velocity, mut requested, mut first_move, mut combat) in pacman_query.iter_mut() {
            position.0 = spawn.0;
            velocity.direction = None;
            requested.0 = None;
            first_move.0 = false;
            combat.deactivate();
        }

        for (_, spawn, mut position, mut velocity, mut timer, mut state, mut flash) in ghost_query.iter_mut() {
            position.0 = spawn.0;
            velocity.direction = Some(random_direction(&mut rng.0));
            timer.remaining = timer.interval;
            *state = GhostState::Active;
            *flash = ScaredFlash::default();
        }
    }
}
