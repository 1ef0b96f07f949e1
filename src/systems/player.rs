use bevy_ecs::{
    component::Component,
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info, trace};

use crate::{
    audio::Sound,
    constants::{power, score, MapTile},
    error::GameError,
    events::{GameCommand, GameEvent},
    map::tile_map::TileMap,
    systems::{
        audio::{AudioEvent, AudioState},
        components::{GlobalState, MadeFirstMove, PlayerControlled, Position, RequestedDirection, ScoreResource, Velocity},
        movement::try_step,
        stage::GameStage,
    },
};

/// Power-up state for Pac-Man. Tick-based.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatState {
    #[default]
    Normal,
    Powered {
        /// Remaining power-up duration in ticks
        remaining_ticks: u32,
        /// Ticks until the power-up is flagged as about to expire (counts down to 0)
        warning_countdown_ticks: u32,
    },
}

impl CombatState {
    pub fn is_powered(&self) -> bool {
        matches!(self, CombatState::Powered { .. })
    }

    /// True during the closing stretch of a power-up.
    pub fn is_about_to_expire(&self) -> bool {
        matches!(self, CombatState::Powered { warning_countdown_ticks, .. } if *warning_countdown_ticks == 0)
    }

    pub fn deactivate(&mut self) {
        *self = CombatState::Normal;
    }

    /// (Re)starts the power-up. The final `warning_ticks` of `total_ticks` count as about to expire.
    pub fn activate(&mut self, total_ticks: u32, warning_ticks: u32) {
        *self = CombatState::Powered {
            remaining_ticks: total_ticks,
            warning_countdown_ticks: total_ticks.saturating_sub(warning_ticks),
        };
    }

    /// Advance one frame. When ticks reach zero, returns to Normal.
    pub fn tick_frame(&mut self) {
        if let CombatState::Powered {
            remaining_ticks,
            warning_countdown_ticks,
        } = self
        {
            *remaining_ticks = remaining_ticks.saturating_sub(1);
            *warning_countdown_ticks = warning_countdown_ticks.saturating_sub(1);
            if *remaining_ticks == 0 {
                *self = CombatState::Normal;
            }
        }
    }
}

/// Processes player input commands and updates game state accordingly.
///
/// Movement commands record the requested direction and end the first-move wait. Asking for the
/// exact opposite of the current heading reverses on the spot, even between tiles; any other
/// turn waits until Pac-Man sits on a tile boundary.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut audio_state: ResMut<AudioState>,
    stage: Res<GameStage>,
    mut players: Query<(&mut Velocity, &mut RequestedDirection, &mut MadeFirstMove), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut velocity, mut requested, mut first_move) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {}",
                e
            )));
            return;
        }
    };

    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match *command {
            GameCommand::MovePlayer(direction) => {
                if *stage != GameStage::Playing {
                    continue;
                }

                if velocity.direction == Some(direction.opposite()) {
                    velocity.direction = Some(direction);
                }
                requested.0 = Some(direction);

                if !first_move.0 {
                    debug!(?direction, "First move made");
                    first_move.0 = true;
                }
            }
            GameCommand::Restart => {
                if stage.is_finished() {
                    info!(stage = ?*stage, "Restart requested");
                    state.restart = true;
                } else {
                    trace!("Ignoring restart while the game is still in progress");
                }
            }
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::MuteAudio => {
                audio_state.muted = !audio_state.muted;
                info!("Audio {}", if audio_state.muted { "muted" } else { "unmuted" });
            }
            GameCommand::TogglePause => {}
        }
    }
}

/// Executes frame-by-frame movement for Pac-Man.
///
/// On a tile boundary the requested direction is adopted if it is open. Pac-Man then advances in
/// the current direction unless a wall is directly ahead.
pub fn player_movement_system(
    map: Res<TileMap>,
    mut players: Query<(&mut Position, &mut Velocity, &RequestedDirection), With<PlayerControlled>>,
) {
    for (mut position, mut velocity, requested) in players.iter_mut() {
        if let Some(requested) = requested.0 {
            if velocity.direction != Some(requested)
                && map.is_aligned(position.0)
                && !map.did_collide_with_environment(position.0, requested)
            {
                trace!(from = ?velocity.direction, to = ?requested, "Player turned");
                velocity.direction = Some(requested);
            }
        }

        let Some(direction) = velocity.direction else {
            continue;
        };

        if let Some(next) = try_step(&map, position.0, direction, velocity.speed) {
            position.0 = next;
        }
    }
}

/// Eats whatever pellet lies under Pac-Man, awarding points and starting the power-up.
pub fn pellet_system(
    mut map: ResMut<TileMap>,
    mut score: ResMut<ScoreResource>,
    mut players: Query<(&Position, &mut CombatState), With<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for (position, mut combat) in players.iter_mut() {
        let Some(eaten) = map.eat_pellet(position.0) else {
            continue;
        };

        match eaten {
            MapTile::Pellet => {
                score.0 += score::PELLET;
                audio_events.write(AudioEvent::PlaySound(Sound::Waka));
            }
            MapTile::PowerPellet => {
                score.0 += score::POWER_PELLET;
                combat.activate(power::DURATION_TICKS, power::EXPIRY_WARNING_TICKS);
                debug!(
                    duration_ticks = power::DURATION_TICKS,
                    remaining = map.pellets_remaining(),
                    "Power pellet eaten, ghosts are scared"
                );
                audio_events.write(AudioEvent::PlaySound(Sound::PowerPellet));
            }
            MapTile::Empty | MapTile::Wall => {}
        }
    }
}

/// Counts down the power-up every tick, whether or not Pac-Man is moving.
pub fn combat_timer_system(mut players: Query<&mut CombatState, With<PlayerControlled>>) {
    for mut combat in players.iter_mut() {
        let was_powered = combat.is_powered();
        combat.tick_frame();
        if was_powered && !combat.is_powered() {
            debug!("Power-up expired");
        }
    }
}
