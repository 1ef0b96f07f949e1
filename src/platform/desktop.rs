//! Desktop platform implementation.

use std::io::IsTerminal;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::PlatformError;
use crate::formatter::FrameFormatter;

/// Sleeps for the remainder of a frame. Spins while focused for accuracy.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Installs the global tracing subscriber.
///
/// Colors are used when stderr is a terminal, or always when `force_console` is set.
pub fn init_console(force_console: bool) -> Result<(), PlatformError> {
    let ansi = force_console || std::io::stderr().is_terminal();

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .event_format(FrameFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))
}

pub fn os_rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}
