//! Platform abstraction layer for cross-platform functionality.

#[cfg(not(target_os = "emscripten"))]
mod desktop;
#[cfg(not(target_os = "emscripten"))]
pub use desktop::*;

#[cfg(target_os = "emscripten")]
pub use emscripten::*;
#[cfg(target_os = "emscripten")]
mod emscripten;

use rand::{rngs::SmallRng, SeedableRng};

/// Builds the game's random number generator, seeded when a seed is given.
pub fn game_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => os_rng(),
    }
}
