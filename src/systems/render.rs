use bevy_ecs::prelude::*;
use raylib::prelude::Rectangle;

use crate::backend::{GraphicsDevice, SpriteBatch};
use crate::components::animatedsprite::AnimatedSprite;
use crate::components::backdrop::Backdrop;
use crate::components::mapposition::MapPosition;
use crate::components::scrollingbackground::ScrollingBackground;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

/// Draw the world into an open sprite batch, back to front:
/// backdrops, then scrolling layers, then animated sprites.
///
/// Entities whose texture is not in the [`TextureStore`] are skipped, which
/// is what happens between a device loss and the restore.
pub fn render_pass<D: GraphicsDevice + ?Sized>(world: &mut World, batch: &mut SpriteBatch<'_, D>) {
    let Some(screen) = world.get_resource::<ScreenSize>().copied() else {
        return;
    };
    if !world.contains_resource::<TextureStore>() {
        return;
    }

    let backdrops: Vec<Backdrop> = {
        let mut q = world.query::<&Backdrop>();
        q.iter(world).cloned().collect()
    };
    let layers: Vec<ScrollingBackground> = {
        let mut q = world.query::<&ScrollingBackground>();
        q.iter(world).cloned().collect()
    };
    let sprites: Vec<(AnimatedSprite, MapPosition)> = {
        let mut q = world.query::<(&AnimatedSprite, &MapPosition)>();
        q.iter(world).map(|(s, p)| (s.clone(), *p)).collect()
    };

    let textures = world.resource::<TextureStore>();

    for backdrop in &backdrops {
        if let Some(tex) = textures.get(&backdrop.tex_key) {
            let src = Rectangle {
                x: 0.0,
                y: 0.0,
                width: tex.width as f32,
                height: tex.height as f32,
            };
            batch.draw(tex.handle, src, screen.full_rect());
        }
    }

    for layer in &layers {
        if let Some(handle) = textures.handle(&layer.tex_key) {
            layer.draw(batch, handle);
        }
    }

    for (sprite, position) in &sprites {
        if let Some(handle) = textures.handle(&sprite.tex_key) {
            sprite.draw(batch, handle, position.pos);
        }
    }
}
