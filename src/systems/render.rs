use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{NonSendMut, Query, Res, ResMut},
};
use glam::IVec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::{
    constants::{CANVAS_SIZE, HUD_HEIGHT},
    error::GameError,
    map::{direction::Direction, render::MapRenderer, tile_map::TileMap},
    systems::{
        components::{Ghost, GhostState, PlayerControlled, Position, ScaredFlash, ScoreResource, Velocity},
        player::CombatState,
        stage::{GameStage, PauseState, PlayerLives},
    },
};

const PACMAN_COLOR: Color = Color::RGB(255, 255, 0);
const SCARED_COLOR: Color = Color::RGB(33, 33, 255);
const SCARED_ALTERNATE_COLOR: Color = Color::RGB(222, 222, 255);
const TEXT_COLOR: Color = Color::WHITE;
/// Width and height of a glyph in the built-in gfx font.
const GLYPH_SIZE: i32 = 8;

/// The board is drawn below the HUD strip.
const BOARD_OFFSET: IVec2 = IVec2::new(0, HUD_HEIGHT as i32);

/// Frames rendered so far, driving the mouth animation.
#[derive(Resource, Debug, Default)]
pub struct AnimationClock(pub u32);

fn sdl_error(e: String) -> GameError {
    GameError::Sdl(e)
}

/// Screen angle in degrees a direction points at (0 is east, growing clockwise).
fn facing_angle(direction: Direction) -> i16 {
    match direction {
        Direction::Right => 0,
        Direction::Down => 90,
        Direction::Left => 180,
        Direction::Up => 270,
    }
}

/// Clears the frame and draws the maze, Pac-Man and the ghosts.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    mut clock: ResMut<AnimationClock>,
    map: Res<TileMap>,
    pause_state: Res<PauseState>,
    stage: Res<GameStage>,
    players: Query<(&Position, &Velocity, &CombatState), With<PlayerControlled>>,
    ghosts: Query<(&Ghost, &Position, &GhostState, &ScaredFlash)>,
    mut errors: EventWriter<GameError>,
) {
    let frozen = pause_state.active() || stage.is_finished();
    if !frozen {
        clock.0 = clock.0.wrapping_add(1);
    }

    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    if let Err(e) = MapRenderer::render_tiles(&mut *canvas, &map, BOARD_OFFSET) {
        errors.write(sdl_error(e));
    }

    let tile_size = map.tile_size();
    let radius = (tile_size / 2) as i16;
    let mut powered = None;

    for (position, velocity, combat) in players.iter() {
        powered = Some(*combat);
        let center = BOARD_OFFSET + position.0 + IVec2::splat(tile_size / 2);

        // Mouth opening in degrees, cycling while moving
        let moving = velocity
            .direction
            .is_some_and(|direction| !map.did_collide_with_environment(position.0, direction));
        let mouth = if moving {
            [0, 20, 40, 60, 40, 20][(clock.0 / 4 % 6) as usize]
        } else {
            40
        };

        let result = if mouth == 0 {
            canvas.filled_circle(center.x as i16, center.y as i16, radius, PACMAN_COLOR)
        } else {
            let angle = facing_angle(velocity.direction.unwrap_or(Direction::Right));
            canvas.filled_pie(
                center.x as i16,
                center.y as i16,
                radius,
                angle + mouth / 2,
                angle + 360 - mouth / 2,
                PACMAN_COLOR,
            )
        };
        if let Err(e) = result {
            errors.write(sdl_error(e));
        }
    }

    for (ghost, position, state, flash) in ghosts.iter() {
        if state.is_eaten() {
            continue;
        }

        let color = match powered {
            Some(combat) if combat.is_powered() => {
                if combat.is_about_to_expire() && flash.alternate {
                    SCARED_ALTERNATE_COLOR
                } else {
                    SCARED_COLOR
                }
            }
            _ => {
                let (r, g, b) = ghost.color();
                Color::RGB(r, g, b)
            }
        };

        if let Err(e) = draw_ghost(&mut *canvas, BOARD_OFFSET + position.0, tile_size, color) {
            errors.write(sdl_error(e));
        }
    }
}

/// A rounded head over a square skirt, with two eyes.
fn draw_ghost(canvas: &mut Canvas<Window>, origin: IVec2, tile_size: i32, color: Color) -> Result<(), String> {
    let half = tile_size / 2;
    let center = origin + IVec2::splat(half);

    canvas.filled_circle(center.x as i16, center.y as i16, half as i16, color)?;
    canvas.box_(
        origin.x as i16,
        center.y as i16,
        (origin.x + tile_size - 1) as i16,
        (origin.y + tile_size - 1) as i16,
        color,
    )?;

    let eye_offset = tile_size / 5;
    for dx in [-eye_offset, eye_offset] {
        canvas.filled_circle(
            (center.x + dx) as i16,
            (center.y - eye_offset / 2) as i16,
            (tile_size / 8).max(1) as i16,
            Color::WHITE,
        )?;
    }

    Ok(())
}

fn draw_text(canvas: &mut Canvas<Window>, position: IVec2, text: &str, color: Color) -> Result<(), String> {
    canvas.string(position.x as i16, position.y as i16, text, color)
}

/// Draws text magnified by `scale`, horizontally centered on the canvas.
fn draw_centered_text(canvas: &mut Canvas<Window>, y: i32, text: &str, scale: i32, color: Color) -> Result<(), String> {
    let width = text.len() as i32 * GLYPH_SIZE * scale;
    let x = (CANVAS_SIZE.x as i32 - width) / 2;

    canvas.set_scale(scale as f32, scale as f32)?;
    let result = draw_text(canvas, IVec2::new(x / scale, y / scale), text, color);
    canvas.set_scale(1.0, 1.0)?;
    result
}

/// Renders the score and lives strip, plus the end-of-round banner.
pub fn hud_render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    score: Res<ScoreResource>,
    lives: Res<PlayerLives>,
    stage: Res<GameStage>,
    pause_state: Res<PauseState>,
    mut errors: EventWriter<GameError>,
) {
    let text_y = (HUD_HEIGHT as i32 - GLYPH_SIZE) / 2;
    let lives_text = format!("Lives: {}", lives.0);
    let lives_x = CANVAS_SIZE.x as i32 - GLYPH_SIZE - lives_text.len() as i32 * GLYPH_SIZE;

    let mut results = vec![
        draw_text(&mut *canvas, IVec2::new(GLYPH_SIZE, text_y), &format!("Score: {}", score.0), TEXT_COLOR),
        draw_text(&mut *canvas, IVec2::new(lives_x, text_y), &lives_text, TEXT_COLOR),
    ];

    let banner = match *stage {
        GameStage::Won => Some("You Win!"),
        GameStage::GameOver => Some("Game Over"),
        GameStage::Playing if pause_state.active() => Some("Paused"),
        GameStage::Playing => None,
    };

    if let Some(banner) = banner {
        let center_y = CANVAS_SIZE.y as i32 / 2;
        results.push(canvas.box_(
            0,
            (center_y - 48) as i16,
            (CANVAS_SIZE.x - 1) as i16,
            (center_y + 48) as i16,
            Color::RGBA(0, 0, 0, 220),
        ));
        results.push(draw_centered_text(&mut *canvas, center_y - 32, banner, 3, TEXT_COLOR));
        if stage.is_finished() {
            results.push(draw_centered_text(&mut *canvas, center_y + 16, "Press R to Restart", 2, TEXT_COLOR));
        }
    }

    for e in results.into_iter().filter_map(Result::err) {
        errors.write(sdl_error(e));
    }
}

pub fn present_system(mut canvas: NonSendMut<Canvas<Window>>) {
    canvas.present();
}
