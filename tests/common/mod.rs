#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::IVec2;
use pacman_arcade::{
    config::GameConfig,
    constants::TILE_SIZE,
    error::GameError,
    events::GameEvent,
    map::{direction::Direction, tile_map::TileMap},
    platform,
    systems::{
        AudioEvent, AudioState, Collider, CombatState, DirectionTimer, GameRng, GameStage, Ghost, GhostBundle,
        GhostCollider, GhostState, GlobalState, MadeFirstMove, PacmanCollider, PauseState, PlayerBundle, PlayerControlled,
        PlayerLives, Position, RequestedDirection, ScaredFlash, ScoreResource, SpawnPoint, Velocity,
    },
};

/// A small loop: a top corridor, a bottom corridor and two side passages.
///
/// ```text
/// #######
/// #P...G#
/// #.###.#
/// #.....#
/// #######
/// ```
pub const CORRIDOR_BOARD: [&str; 5] = ["#######", "#P...G#", "#.###.#", "#.....#", "#######"];

/// One pellet between Pac-Man and a ghost sealed in its own cell.
pub const SEALED_GHOST_BOARD: [&str; 3] = ["######", "#P.#G#", "######"];

/// Pac-Man and a ghost side by side in a dead end, with the only pellet behind the ghost.
pub const FACE_OFF_BOARD: [&str; 3] = ["#####", "#PG.#", "#####"];

pub const TEST_SEED: u64 = 0x5EED;

/// Pixel position of the top-left corner of a cell.
pub fn cell(x: i32, y: i32) -> IVec2 {
    IVec2::new(x, y) * TILE_SIZE
}

pub fn create_test_map(board: &[&str]) -> TileMap {
    TileMap::new(board, TILE_SIZE).expect("Failed to create test map")
}

pub fn create_test_world() -> World {
    create_test_world_with_board(&CORRIDOR_BOARD)
}

pub fn create_test_world_with_board(board: &[&str]) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(ScoreResource(0));
    world.insert_resource(AudioState::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(PlayerLives::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(GameRng(platform::game_rng(Some(TEST_SEED))));
    world.insert_resource(create_test_map(board));

    world
}

/// Spawns Pac-Man at rest at the given pixel position, which doubles as its spawn point.
pub fn spawn_test_player(world: &mut World, position: IVec2) -> Entity {
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(position),
            spawn: SpawnPoint(position),
            velocity: Velocity {
                direction: None,
                speed: 2,
            },
            requested: RequestedDirection::default(),
            first_move: MadeFirstMove(true),
            combat: CombatState::default(),
            collider: Collider { size: TILE_SIZE / 2 },
            pacman_collider: PacmanCollider,
        })
        .id()
}

/// Spawns an active ghost with a long direction timer at the given pixel position.
pub fn spawn_test_ghost(world: &mut World, ghost: Ghost, position: IVec2, direction: Option<Direction>) -> Entity {
    world
        .spawn(GhostBundle {
            ghost,
            position: Position(position),
            spawn: SpawnPoint(position),
            velocity: Velocity { direction, speed: 2 },
            timer: DirectionTimer::new(20),
            state: GhostState::Active,
            flash: ScaredFlash::default(),
            collider: Collider { size: TILE_SIZE / 2 },
            ghost_collider: GhostCollider,
        })
        .id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

pub fn send_collision_event(world: &mut World, pacman: Entity, ghost: Entity) {
    send_game_event(world, GameEvent::Collision(pacman, ghost));
}

pub fn audio_events(world: &World) -> Vec<AudioEvent> {
    world
        .resource::<Events<AudioEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn test_config(board: &[&str]) -> GameConfig {
    GameConfig {
        seed: Some(TEST_SEED),
        board: board.iter().map(|row| row.to_string()).collect(),
        ..GameConfig::default()
    }
}
