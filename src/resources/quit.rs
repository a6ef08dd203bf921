use bevy_ecs::prelude::Resource;

/// Presence means the player asked to leave; the host loop stops after the
/// current frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct QuitRequested;
