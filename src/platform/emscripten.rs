//! Emscripten platform implementation.

use std::ffi::CString;
use std::io::{self, Write};

use rand::{rngs::SmallRng, SeedableRng};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::PlatformError;
use crate::formatter::FrameFormatter;

extern "C" {
    // Emscripten redirects stdout printf to the browser console
    fn printf(format: *const u8, ...) -> i32;
}

/// Callback type for the browser-driven main loop.
pub type MainLoopCallback = unsafe extern "C" fn(*mut std::ffi::c_void);

extern "C" {
    pub fn emscripten_set_main_loop_arg(
        func: MainLoopCallback,
        arg: *mut std::ffi::c_void,
        fps: i32,
        simulate_infinite_loop: i32,
    );
    pub fn emscripten_cancel_main_loop();
}

/// Installs a subscriber writing to the browser console. The flag is ignored in the browser.
pub fn init_console(_force_console: bool) -> Result<(), PlatformError> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| EmscriptenConsoleWriter)
                .with_ansi(false)
                .event_format(FrameFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))
}

/// Writes each formatted line to the browser console via `printf`.
struct EmscriptenConsoleWriter;

impl Write for EmscriptenConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(line) = std::str::from_utf8(buf) {
            if let Ok(line) = CString::new(line.trim_end_matches('\n')) {
                unsafe {
                    printf(c"%s\n".as_ptr().cast(), line.as_ptr());
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn os_rng() -> SmallRng {
    SmallRng::from_os_rng()
}
