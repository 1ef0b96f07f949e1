//! Pac-Man game library crate.
//!
//! The simulation is headless and always available; the SDL2 window, input, drawing and sound
//! are behind the `gui` feature.

#[cfg(feature = "gui")]
pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod platform;
pub mod systems;
