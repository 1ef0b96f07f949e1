//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod audio;
pub mod collision;
pub mod components;
pub mod ghost;
#[cfg(feature = "gui")]
pub mod input;
pub mod movement;
pub mod player;
#[cfg(feature = "gui")]
pub mod render;
pub mod stage;

pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
#[cfg(feature = "gui")]
pub use self::input::*;
pub use self::movement::*;
pub use self::player::*;
#[cfg(feature = "gui")]
pub use self::render::*;
pub use self::stage::*;
