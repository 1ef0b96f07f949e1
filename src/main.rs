use std::process::ExitCode;

use clap::Parser;
use pacman_arcade::{
    app::App,
    config::{Cli, GameConfig},
    constants::LOOP_TIME,
    platform,
};
use tracing::{error, info};

#[cfg(target_os = "emscripten")]
thread_local! {
    // emscripten_set_main_loop_arg needs the app to outlive main()
    static APP: std::cell::RefCell<Option<App>> = const { std::cell::RefCell::new(None) };
}

/// Emscripten main loop callback - runs once per frame
#[cfg(target_os = "emscripten")]
unsafe extern "C" fn main_loop_callback(_arg: *mut std::ffi::c_void) {
    let keep_running = APP.with_borrow_mut(|app| app.as_mut().is_some_and(App::run));
    if !keep_running {
        APP.with_borrow_mut(|app| *app = None);
        platform::emscripten_cancel_main_loop();
    }
}

/// The main entry point of the application.
///
/// Parses the command line, installs logging, builds the window and game, then runs the loop
/// until the player quits.
pub fn main() -> ExitCode {
    // Malformed flags and --help are reported by clap, which exits on its own
    let cli = Cli::parse();
    let force_console = cli.console;
    let config = GameConfig::from_cli(cli);

    // On Emscripten, this connects the subscriber to the browser console
    if let Err(e) = platform::init_console(force_console) {
        eprintln!("Could not initialize console: {e}");
        return ExitCode::FAILURE;
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Could not create app: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(loop_time = ?LOOP_TIME, "Starting game loop");

    #[cfg(target_os = "emscripten")]
    {
        use pacman_arcade::constants::TICKS_PER_SECOND;

        APP.with_borrow_mut(|slot| *slot = Some(app));
        // simulate_infinite_loop=1 means this call won't return
        unsafe {
            platform::emscripten_set_main_loop_arg(main_loop_callback, std::ptr::null_mut(), TICKS_PER_SECOND as i32, 1);
        }
    }

    #[cfg(not(target_os = "emscripten"))]
    {
        let mut app = app;
        while app.run() {}
    }

    ExitCode::SUCCESS
}
