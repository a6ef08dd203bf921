//! Sprite animation system.
//!
//! Advances every [`AnimatedSprite`] by the frame delta from [`WorldTime`].
use bevy_ecs::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::resources::worldtime::WorldTime;

pub fn animation(mut query: Query<&mut AnimatedSprite>, time: Res<WorldTime>) {
    for mut sprite in query.iter_mut() {
        sprite.update(time.delta);
    }
}
