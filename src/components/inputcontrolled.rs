//! Keyboard-controlled movement components.
//!
//! - [`InputControlled`] – per-frame displacement applied while a direction
//!   key is held
//! - [`BoundsClamp`] – rectangle the entity's position is kept inside
//!
//! [`crate::systems::shipcontroller`] reads both to move the ship.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Lower clamp as a fraction of the playfield bounds.
pub const CLAMP_MIN_FACTOR: f32 = 0.17;
/// Upper clamp as a fraction of the playfield bounds.
pub const CLAMP_MAX_FACTOR: f32 = 0.75;

/// Movement intent derived from player keyboard input.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Displacement per frame along each held axis.
    pub speed: f32,
    /// Facing angle in radians used to rotate the movement vector.
    pub heading: f32,
    /// Scale diagonal movement down to `speed`.
    pub normalize_diagonal: bool,
}

impl InputControlled {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            heading: 0.0,
            normalize_diagonal: false,
        }
    }

    pub fn with_normalized_diagonal(mut self, normalize: bool) -> Self {
        self.normalize_diagonal = normalize;
        self
    }
}

/// Componentwise position limits.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BoundsClamp {
    pub min: Vector2,
    pub max: Vector2,
}

impl BoundsClamp {
    /// Keep an entity between 17% and 75% of `bounds` on both axes.
    ///
    /// The margins are asymmetric: the ship stays well clear of the top and
    /// left edges but may approach the bottom and right ones.
    pub fn from_bounds(bounds: Vector2) -> Self {
        Self {
            min: Vector2 {
                x: bounds.x * CLAMP_MIN_FACTOR,
                y: bounds.y * CLAMP_MIN_FACTOR,
            },
            max: Vector2 {
                x: bounds.x * CLAMP_MAX_FACTOR,
                y: bounds.y * CLAMP_MAX_FACTOR,
            },
        }
    }
}
