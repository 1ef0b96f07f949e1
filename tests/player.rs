use bevy_ecs::{entity::Entity, event::Events, system::RunSystemOnce, world::World};
use glam::IVec2;
use pacman_arcade::audio::Sound;
use pacman_arcade::constants::RAW_BOARD;
use pacman_arcade::error::GameError;
use pacman_arcade::events::{GameCommand, GameEvent};
use pacman_arcade::map::direction::Direction;
use pacman_arcade::map::tile_map::TileMap;
use pacman_arcade::systems::{
    combat_timer_system, pellet_system, player_control_system, player_movement_system, AudioEvent, AudioState, CombatState,
    GameStage, GlobalState, MadeFirstMove, Position, RequestedDirection, ScoreResource, Velocity,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::cell;

fn send_command(world: &mut World, command: GameCommand) {
    world.resource_mut::<Events<GameEvent>>().clear();
    common::send_game_event(world, GameEvent::Command(command));
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
}

fn set_direction(world: &mut World, player: Entity, direction: Option<Direction>) {
    world.get_mut::<Velocity>(player).expect("Player should exist").direction = direction;
}

fn step(world: &mut World) {
    world
        .run_system_once(player_movement_system)
        .expect("System should run successfully");
}

fn position(world: &World, player: Entity) -> IVec2 {
    world.get::<Position>(player).expect("Player should exist").0
}

#[test]
fn test_move_command_requests_direction_and_ends_first_move_wait() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));
    world.get_mut::<MadeFirstMove>(player).unwrap().0 = false;

    send_command(&mut world, GameCommand::MovePlayer(Direction::Right));

    assert_that(&world.get::<RequestedDirection>(player).unwrap().0).is_equal_to(Some(Direction::Right));
    assert_that(&world.get::<MadeFirstMove>(player).unwrap().0).is_true();
    // Turning itself is left to the movement system
    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_none();
}

#[test]
fn test_move_command_reverses_immediately() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1) + IVec2::new(6, 0));
    set_direction(&mut world, player, Some(Direction::Right));

    send_command(&mut world, GameCommand::MovePlayer(Direction::Left));

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Left));
}

#[test]
fn test_move_command_perpendicular_waits() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1) + IVec2::new(6, 0));
    set_direction(&mut world, player, Some(Direction::Right));

    send_command(&mut world, GameCommand::MovePlayer(Direction::Down));

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Right));
    assert_that(&world.get::<RequestedDirection>(player).unwrap().0).is_equal_to(Some(Direction::Down));
}

#[test]
fn test_move_command_ignored_after_round_ends() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));
    world.insert_resource(GameStage::GameOver);

    send_command(&mut world, GameCommand::MovePlayer(Direction::Right));

    assert_that(&world.get::<RequestedDirection>(player).unwrap().0).is_none();
}

#[test]
fn test_exit_command() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, cell(1, 1));

    send_command(&mut world, GameCommand::Exit);

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_mute_command_toggles() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, cell(1, 1));

    send_command(&mut world, GameCommand::MuteAudio);
    assert_that(&world.resource::<AudioState>().muted).is_true();

    send_command(&mut world, GameCommand::MuteAudio);
    assert_that(&world.resource::<AudioState>().muted).is_false();
}

#[test]
fn test_restart_only_after_round_ends() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, cell(1, 1));

    send_command(&mut world, GameCommand::Restart);
    assert_that(&world.resource::<GlobalState>().restart).is_false();

    for stage in [GameStage::GameOver, GameStage::Won] {
        world.insert_resource(GlobalState::default());
        world.insert_resource(stage);

        send_command(&mut world, GameCommand::Restart);
        assert_that(&world.resource::<GlobalState>().restart).is_true();
    }
}

#[test]
fn test_control_without_player_reports_error() {
    let mut world = common::create_test_world();

    send_command(&mut world, GameCommand::Exit);

    assert_that(&world.resource::<Events<GameError>>().len()).is_equal_to(1);
    assert_that(&world.resource::<GlobalState>().exit).is_false();
}

#[test]
fn test_movement_adopts_requested_direction() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));
    world.get_mut::<RequestedDirection>(player).unwrap().0 = Some(Direction::Right);

    step(&mut world);

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Right));
    assert_eq!(position(&world, player), cell(1, 1) + IVec2::new(2, 0));
}

#[test]
fn test_movement_turns_only_on_tile_boundary() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1) + IVec2::new(4, 0));
    set_direction(&mut world, player, Some(Direction::Left));
    world.get_mut::<RequestedDirection>(player).unwrap().0 = Some(Direction::Down);

    step(&mut world);
    step(&mut world);

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Left));
    assert_eq!(position(&world, player), cell(1, 1));

    step(&mut world);

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Down));
    assert_eq!(position(&world, player), cell(1, 1) + IVec2::new(0, 2));
}

#[test]
fn test_movement_keeps_heading_when_request_is_blocked() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(2, 1));
    set_direction(&mut world, player, Some(Direction::Right));
    world.get_mut::<RequestedDirection>(player).unwrap().0 = Some(Direction::Up);

    step(&mut world);

    assert_that(&world.get::<Velocity>(player).unwrap().direction).is_equal_to(Some(Direction::Right));
    assert_eq!(position(&world, player), cell(2, 1) + IVec2::new(2, 0));
}

#[test]
fn test_movement_stops_at_wall() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));
    set_direction(&mut world, player, Some(Direction::Left));

    for _ in 0..5 {
        step(&mut world);
    }

    assert_eq!(position(&world, player), cell(1, 1));
}

#[test]
fn test_movement_at_rest() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));

    step(&mut world);

    assert_eq!(position(&world, player), cell(1, 1));
}

#[test]
fn test_pellet_scoring() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, cell(2, 1));

    world.run_system_once(pellet_system).expect("System should run successfully");
    world.run_system_once(pellet_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(10);
    assert_that(&world.resource::<TileMap>().pellets_remaining()).is_equal_to(9);
    assert_eq!(common::audio_events(&world), vec![AudioEvent::PlaySound(Sound::Waka)]);
}

#[test]
fn test_pellet_not_eaten_between_tiles() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, cell(2, 1) + IVec2::new(2, 0));

    world.run_system_once(pellet_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&common::audio_events(&world)).is_empty();
}

#[test]
fn test_power_pellet_scoring() {
    let mut world = common::create_test_world_with_board(&RAW_BOARD);
    let player = common::spawn_test_player(&mut world, cell(1, 1));

    world.run_system_once(pellet_system).expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(50);
    assert_that(&world.get::<CombatState>(player).unwrap().is_powered()).is_true();
    assert_eq!(common::audio_events(&world), vec![AudioEvent::PlaySound(Sound::PowerPellet)]);
}

#[test]
fn test_combat_state_timing() {
    let mut combat = CombatState::default();
    assert_that(&combat.is_powered()).is_false();

    combat.activate(450, 225);
    assert_that(&combat.is_powered()).is_true();

    for _ in 0..224 {
        combat.tick_frame();
    }
    assert_that(&combat.is_about_to_expire()).is_false();

    combat.tick_frame();
    assert_that(&combat.is_about_to_expire()).is_true();

    for _ in 0..224 {
        combat.tick_frame();
    }
    assert_that(&combat.is_powered()).is_true();

    combat.tick_frame();
    assert_that(&combat).is_equal_to(CombatState::Normal);
}

#[test]
fn test_power_pellet_refreshes_duration() {
    let mut combat = CombatState::default();
    combat.activate(450, 225);
    for _ in 0..300 {
        combat.tick_frame();
    }
    assert_that(&combat.is_about_to_expire()).is_true();

    combat.activate(450, 225);
    assert_that(&combat.is_about_to_expire()).is_false();
    assert_that(&combat).is_equal_to(CombatState::Powered {
        remaining_ticks: 450,
        warning_countdown_ticks: 225,
    });
}

#[test]
fn test_combat_timer_system() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, cell(1, 1));
    world.get_mut::<CombatState>(player).unwrap().activate(2, 1);

    world
        .run_system_once(combat_timer_system)
        .expect("System should run successfully");
    assert_that(&world.get::<CombatState>(player).unwrap().is_about_to_expire()).is_true();

    world
        .run_system_once(combat_timer_system)
        .expect("System should run successfully");
    assert_that(&*world.get::<CombatState>(player).unwrap()).is_equal_to(CombatState::Normal);
}
