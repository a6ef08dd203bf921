use bevy_ecs::prelude::Component;

/// Texture stretched over the whole screen, drawn behind every other layer.
#[derive(Component, Clone, Debug)]
pub struct Backdrop {
    pub tex_key: String,
}

impl Backdrop {
    pub fn new(tex_key: impl Into<String>) -> Self {
        Self {
            tex_key: tex_key.into(),
        }
    }
}
