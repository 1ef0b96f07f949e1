//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use tracing::{debug, error, info, trace};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::map::tile_map::TileMap;
use crate::platform;
use crate::systems::{
    self, combat_timer_system, gameplay_active, ghost::random_timer_interval, ghost_collision_system, ghost_movement_system,
    ghost_respawn_system, handle_pause_command, pellet_system, player_control_system, player_movement_system,
    random_direction, round_in_progress, scared_flash_system, win_system, AudioEvent, AudioState, Collider, CombatState,
    DirectionTimer, GameRng, GameStage, GhostBundle, GhostCollider, GhostState, GlobalState, MadeFirstMove, PacmanCollider,
    PauseState, PlayerBundle, PlayerControlled, PlayerLives, Position, RequestedDirection, ScaredFlash, ScoreResource,
    SpawnPoint, Velocity,
};

/// System sets run in declaration order every tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameplaySet {
    /// Translate input into commands and apply them
    Input,
    /// Power-up and scared-flash countdowns
    Timers,
    /// Movement, pellets and collision detection
    Update,
    /// Collision outcomes and win detection
    Respond,
    /// Drawing, presenting and audio playback
    Render,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the `World` holding every entity and resource, and the `Schedule` defining system order.
/// The simulation itself is headless; [`Game::attach_frontend`] adds the SDL2 systems on top.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a fresh game from `config`: parses the board, spawns Pac-Man and the ghosts and
    /// configures the schedule.
    ///
    /// # Errors
    ///
    /// Returns `GameError` for invalid configuration or a malformed board.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        config.validate()?;

        let mut world = World::default();
        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, &config)?;
        world.insert_resource(config);
        Self::spawn_entities(&mut world);

        let mut schedule = Schedule::default();
        Self::configure_schedule(&mut schedule);

        info!("Game initialized");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    /// (Re)inserts every per-round resource. Audio preferences and the RNG survive a restart.
    fn insert_resources(world: &mut World, config: &GameConfig) -> GameResult<()> {
        let map = TileMap::new(&config.board_rows(), config.tile_size)?;
        debug!(
            size = ?map.size(),
            pellets = map.pellets_remaining(),
            ghosts = map.ghost_starts().count(),
            "Map built"
        );

        world.insert_resource(map);
        world.insert_resource(GlobalState::default());
        world.insert_resource(PlayerLives(config.starting_lives));
        world.insert_resource(ScoreResource(0));
        world.insert_resource(GameStage::default());
        world.insert_resource(PauseState::default());

        if !world.contains_resource::<AudioState>() {
            world.insert_resource(AudioState { muted: config.muted });
        }
        if !world.contains_resource::<GameRng>() {
            world.insert_resource(GameRng(platform::game_rng(config.seed)));
        }

        Ok(())
    }

    fn spawn_entities(world: &mut World) {
        let (pacman_start, ghost_starts, tile_size) = {
            let map = world.resource::<TileMap>();
            (map.pacman_start(), map.ghost_starts().collect::<Vec<_>>(), map.tile_size())
        };
        let speed = world.resource::<GameConfig>().velocity;
        let collider = Collider { size: tile_size / 2 };

        let pacman = world
            .spawn(PlayerBundle {
                player: PlayerControlled,
                position: Position(pacman_start),
                spawn: SpawnPoint(pacman_start),
                velocity: Velocity { direction: None, speed },
                requested: RequestedDirection::default(),
                first_move: MadeFirstMove::default(),
                combat: CombatState::default(),
                collider,
                pacman_collider: PacmanCollider,
            })
            .id();
        trace!(entity = ?pacman, position = ?pacman_start, "Spawned player entity");

        for (ghost, start) in ghost_starts {
            let (direction, interval) = {
                let mut rng = world.resource_mut::<GameRng>();
                (random_direction(&mut rng.0), random_timer_interval(&mut rng.0))
            };

            let entity = world
                .spawn(GhostBundle {
                    ghost,
                    position: Position(start),
                    spawn: SpawnPoint(start),
                    velocity: Velocity {
                        direction: Some(direction),
                        speed,
                    },
                    timer: DirectionTimer::new(interval),
                    state: GhostState::Active,
                    flash: ScaredFlash::default(),
                    collider,
                    ghost_collider: GhostCollider,
                })
                .id();
            trace!(ghost = ghost.as_ref(), ?entity, ?direction, interval, "Spawned ghost entity");
        }
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (player_control_system, handle_pause_command)
                    .chain()
                    .in_set(GameplaySet::Input),
                // Eaten ghosts count down even while the game is paused
                ghost_respawn_system
                    .after(GameplaySet::Input)
                    .before(GameplaySet::Update),
                (combat_timer_system, scared_flash_system)
                    .chain()
                    .in_set(GameplaySet::Timers),
                (
                    player_movement_system,
                    pellet_system,
                    ghost_movement_system,
                    systems::collision_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (ghost_collision_system, win_system).chain().in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Timers.run_if(round_in_progress),
                    GameplaySet::Update.run_if(gameplay_active),
                    GameplaySet::Respond,
                    GameplaySet::Render,
                )
                    .chain(),
            );
    }

    /// Queues a command as if it had come from the keyboard; it is applied on the next tick.
    pub fn send_command(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::Command(command));
    }

    /// Advances the simulation by one tick.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);
        formatter::increment_frame();

        for e in self.world.resource_mut::<Events<GameError>>().drain() {
            error!("{}", e);
        }
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();

        let Some((exit, restart)) = self.world.get_resource::<GlobalState>().map(|state| (state.exit, state.restart)) else {
            error!("GlobalState is missing, stopping");
            return true;
        };

        if restart && !exit {
            if let Err(e) = self.restart() {
                error!("Failed to restart game: {}", e);
                return true;
            }
        }

        exit
    }

    /// Rebuilds the round from the stored configuration: fresh map, score, lives and entities.
    pub fn restart(&mut self) -> GameResult<()> {
        let config = self
            .world
            .get_resource::<GameConfig>()
            .cloned()
            .ok_or_else(|| GameError::InvalidState("GameConfig resource is missing".to_string()))?;

        self.world.clear_entities();
        Self::insert_resources(&mut self.world, &config)?;
        Self::spawn_entities(&mut self.world);
        self.world.resource_mut::<Events<GameEvent>>().clear();

        info!("Game restarted");
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    pub fn lives(&self) -> u8 {
        self.world.get_resource::<PlayerLives>().map_or(0, |lives| lives.0)
    }

    pub fn stage(&self) -> GameStage {
        self.world.get_resource::<GameStage>().copied().unwrap_or_default()
    }
}

#[cfg(feature = "gui")]
mod frontend {
    use bevy_ecs::schedule::IntoScheduleConfigs;
    use sdl2::{render::Canvas, video::Window, EventPump};

    use super::{Game, GameplaySet};
    use crate::audio::Audio;
    use crate::systems::{
        audio_system, hud_render_system, input::input_system, player_control_system, present_system, render_system,
        AnimationClock, AudioResource, Bindings,
    };

    impl Game {
        /// Hands the SDL2 window, event pump and mixer to the world and schedules the systems
        /// that use them. SDL handles are not `Send`, so they are stored as non-send resources.
        pub fn attach_frontend(&mut self, canvas: Canvas<Window>, event_pump: EventPump, audio: Audio) {
            self.world.insert_non_send_resource(canvas);
            self.world.insert_non_send_resource(event_pump);
            self.world.insert_non_send_resource(AudioResource(audio));
            self.world.insert_resource(Bindings::default());
            self.world.insert_resource(AnimationClock::default());

            self.schedule.add_systems((
                input_system.in_set(GameplaySet::Input).before(player_control_system),
                (render_system, hud_render_system, present_system, audio_system)
                    .chain()
                    .in_set(GameplaySet::Render),
            ));
        }
    }
}
