//! This module defines the game map and provides functions for interacting with it.

pub mod direction;
pub mod parser;
#[cfg(feature = "gui")]
pub mod render;
pub mod tile_map;
