//! Background scroll system.
//!
//! Moves every [`ScrollingBackground`] down by `scroll_speed * delta` pixels,
//! with the speed taken from [`GameConfig`].
use bevy_ecs::prelude::*;

use crate::components::scrollingbackground::ScrollingBackground;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

pub fn scroll_backgrounds(
    mut query: Query<&mut ScrollingBackground>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
) {
    let distance = config.scroll_speed * time.delta;
    for mut layer in query.iter_mut() {
        layer.update(distance);
    }
}
