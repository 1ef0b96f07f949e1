use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use tracing::info;

use crate::{
    audio::Sound,
    events::{GameCommand, GameEvent},
    map::tile_map::TileMap,
    systems::{
        audio::AudioEvent,
        components::{MadeFirstMove, PlayerControlled},
    },
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Pac-Man ran out of lives.
    GameOver,
    /// Every pellet has been eaten.
    Won,
}

impl GameStage {
    /// Whether the round has ended, one way or the other. Only then can it be restarted.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStage::GameOver | GameStage::Won)
    }
}

/// A resource to store the number of player lives.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(crate::constants::STARTING_LIVES)
    }
}

/// Manual pause toggled by the player, independent of the first-move wait.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }
}

pub fn handle_pause_command(
    mut events: EventReader<GameEvent>,
    mut pause_state: ResMut<PauseState>,
    stage: Res<GameStage>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in events.read() {
        if let GameEvent::Command(GameCommand::TogglePause) = event {
            if stage.is_finished() {
                continue;
            }

            *pause_state = match *pause_state {
                PauseState::Active => {
                    info!("Game resumed");
                    audio_events.write(AudioEvent::Resume);
                    PauseState::Inactive
                }
                PauseState::Inactive => {
                    info!("Game paused");
                    audio_events.write(AudioEvent::Pause);
                    PauseState::Active
                }
            }
        }
    }
}

/// Run condition for timers: the round is in progress and not manually paused.
pub fn round_in_progress(stage: Res<GameStage>, pause_state: Res<PauseState>) -> bool {
    *stage == GameStage::Playing && !pause_state.active()
}

/// Run condition for everything that moves: the round is in progress, the player has made their
/// first move since spawning, and the game is not manually paused.
pub fn gameplay_active(
    stage: Res<GameStage>,
    pause_state: Res<PauseState>,
    players: Query<&MadeFirstMove, With<PlayerControlled>>,
) -> bool {
    *stage == GameStage::Playing && !pause_state.active() && players.iter().any(|first_move| first_move.0)
}

/// Declares the round won once no pellets remain. Runs after collisions, so a game over in the
/// same tick takes precedence.
pub fn win_system(map: Res<TileMap>, mut stage: ResMut<GameStage>, mut audio_events: EventWriter<AudioEvent>) {
    if *stage != GameStage::Playing || !map.did_win() {
        return;
    }

    info!("All pellets eaten, round won");
    *stage = GameStage::Won;
    audio_events.write(AudioEvent::StopAll);
    audio_events.write(AudioEvent::PlaySound(Sound::GameWin));
}
