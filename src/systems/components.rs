use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;
use rand::rngs::SmallRng;
use strum_macros::{AsRefStr, EnumIter};

use crate::constants::ghost::SCARED_FLASH_TICKS;
use crate::map::direction::Direction;
use crate::systems::player::CombatState;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A ghost's identity, which also decides its color.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Ghost {
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// Identities handed out to ghost start cells, in reading order.
    pub const ROSTER: [Ghost; 3] = [Ghost::Pinky, Ghost::Inky, Ghost::Clyde];

    /// The ghost's body color as RGB.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            Ghost::Pinky => (255, 184, 255),
            Ghost::Inky => (0, 255, 255),
            Ghost::Clyde => (255, 184, 82),
        }
    }
}

/// Top-left corner of an entity's tile-sized box, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub IVec2);

/// Where an entity returns to after a life is lost or, for ghosts, after being eaten.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint(pub IVec2);

/// Current heading and per-tick speed. A `None` direction means standing still.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub direction: Option<Direction>,
    pub speed: i32,
}

/// The direction the player last asked for; applied once it becomes possible.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestedDirection(pub Option<Direction>);

/// Whether the player has pressed a movement key since spawning. Until then the game stays paused.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MadeFirstMove(pub bool);

/// Axis-aligned square hitbox anchored at the entity's position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub size: i32,
}

impl Collider {
    /// Whether this box at `position` overlaps `other` at `other_position`.
    ///
    /// Symmetric: swapping the two boxes never changes the answer.
    pub fn overlaps(&self, position: IVec2, other: &Collider, other_position: IVec2) -> bool {
        position.x < other_position.x + other.size
            && position.x + self.size > other_position.x
            && position.y < other_position.y + other.size
            && position.y + self.size > other_position.y
    }
}

/// Marker components for collision filtering
#[derive(Component)]
pub struct PacmanCollider;

#[derive(Component)]
pub struct GhostCollider;

/// Countdown until a ghost reconsiders its heading.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionTimer {
    pub remaining: u32,
    /// Value the countdown restarts from; drawn once per ghost.
    pub interval: u32,
}

impl DirectionTimer {
    pub fn new(interval: u32) -> Self {
        Self {
            remaining: interval,
            interval,
        }
    }
}

/// Whether a ghost is roaming the maze or waiting to reappear after being eaten.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GhostState {
    #[default]
    Active,
    Eaten {
        respawn_ticks: u32,
    },
}

impl GhostState {
    pub fn is_eaten(&self) -> bool {
        matches!(self, GhostState::Eaten { .. })
    }
}

/// Alternation between the two scared looks shown while a power-up is running out.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaredFlash {
    pub countdown: u32,
    pub alternate: bool,
}

impl Default for ScaredFlash {
    fn default() -> Self {
        Self {
            countdown: SCARED_FLASH_TICKS,
            alternate: false,
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub requested: RequestedDirection,
    pub first_move: MadeFirstMove,
    pub combat: CombatState,
    pub collider: Collider,
    pub pacman_collider: PacmanCollider,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub timer: DirectionTimer,
    pub state: GhostState,
    pub flash: ScaredFlash,
    pub collider: Collider,
    pub ghost_collider: GhostCollider,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    /// Set once a restart has been requested; the game rebuilds its world after the current tick.
    pub restart: bool,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Source of randomness for ghost headings and timers.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);
