#[cfg(not(target_os = "emscripten"))]
use std::time::Duration;
use std::time::Instant;

use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{AudioSubsystem, Sdl};
use tracing::{debug, info, trace};

use crate::audio::Audio;
use crate::config::GameConfig;
use crate::constants::CANVAS_SIZE;
#[cfg(not(target_os = "emscripten"))]
use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};
use crate::game::Game;
#[cfg(not(target_os = "emscripten"))]
use crate::platform;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not shut down
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()` during game state setup.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(width = CANVAS_SIZE.x, height = CANVAS_SIZE.y, "Creating game window");
        let window = video_subsystem
            .window("Pac-Man", CANVAS_SIZE.x, CANVAS_SIZE.y)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas: Canvas<Window> = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let mut game = Game::new(config)?;
        game.attach_frontend(canvas, event_pump, Audio::new());

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    #[cfg(not(target_os = "emscripten"))]
    fn focused(&self) -> bool {
        let focus_flag = sdl2::sys::SDL_WindowFlags::SDL_WINDOW_INPUT_FOCUS as u32;
        self.game
            .world
            .get_non_send_resource::<Canvas<Window>>()
            .is_some_and(|canvas| canvas.window().window_flags() & focus_flag != 0)
    }

    /// Executes a single frame of the game loop, then sleeps away the rest of the frame.
    ///
    /// Sleeping spins while the window is focused and yields to the OS otherwise. In the browser
    /// the main-loop callback already paces frames, so no sleep happens there.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        trace!(since_last = ?self.last_tick.elapsed(), "Frame start");
        self.last_tick = start;

        if self.game.tick() {
            info!("Exit requested");
            return false;
        }

        #[cfg(not(target_os = "emscripten"))]
        {
            let remaining = LOOP_TIME.saturating_sub(start.elapsed());
            if remaining != Duration::ZERO {
                platform::sleep(remaining, self.focused());
            }
        }

        true
    }
}
