//! Vertically scrolling, tiled background layer.
//!
//! The texture is repeated across the viewport and shifted down by a scroll
//! offset that wraps at the texture height. One extra row is drawn above the
//! viewport so the wrap point never shows a gap.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

use crate::backend::{GraphicsDevice, SpriteBatch, TextureHandle};

#[derive(Component, Clone, Debug)]
pub struct ScrollingBackground {
    pub tex_key: String,
    tex_width: f32,
    tex_height: f32,
    screen_width: f32,
    screen_height: f32,
    offset: f32,
}

impl ScrollingBackground {
    /// Bind a texture of `texture_size` pixels and reset the scroll offset.
    pub fn load(tex_key: impl Into<String>, texture_size: (u32, u32)) -> Self {
        let mut layer = Self {
            tex_key: tex_key.into(),
            tex_width: 0.0,
            tex_height: 0.0,
            screen_width: 0.0,
            screen_height: 0.0,
            offset: 0.0,
        };
        layer.rebind(texture_size);
        layer
    }

    /// Take the size of a reloaded texture. The offset survives, re-wrapped
    /// into the new height.
    pub fn rebind(&mut self, texture_size: (u32, u32)) {
        self.tex_width = texture_size.0 as f32;
        self.tex_height = texture_size.1 as f32;
        self.offset = self.wrap(self.offset);
    }

    /// Record the viewport the layer must cover.
    pub fn set_window(&mut self, width: i32, height: i32) {
        self.screen_width = width.max(0) as f32;
        self.screen_height = height.max(0) as f32;
    }

    /// Scroll down by `distance` pixels.
    pub fn update(&mut self, distance: f32) {
        self.offset = self.wrap(self.offset + distance);
    }

    fn wrap(&self, offset: f32) -> f32 {
        if self.tex_height <= 0.0 || !offset.is_finite() {
            return 0.0;
        }
        let wrapped = offset.rem_euclid(self.tex_height);
        // rem_euclid can round up to the divisor itself for tiny negatives.
        if wrapped >= self.tex_height { 0.0 } else { wrapped }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn texture_height(&self) -> f32 {
        self.tex_height
    }

    /// Tile grid needed to cover the viewport: `(columns, rows)`, rows
    /// including the extra wraparound copy.
    pub fn tile_counts(&self) -> (usize, usize) {
        if self.tex_width <= 0.0 || self.tex_height <= 0.0 {
            return (0, 0);
        }
        let columns = (self.screen_width / self.tex_width).ceil() as usize;
        let rows = (self.screen_height / self.tex_height).ceil() as usize + 1;
        (columns.max(1), rows)
    }

    /// Top-left corner of every tile, row by row.
    pub fn tile_positions(&self) -> Vec<Vector2> {
        let (columns, rows) = self.tile_counts();
        let top = self.offset - self.tex_height;
        let mut positions = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            let y = top + row as f32 * self.tex_height;
            for column in 0..columns {
                positions.push(Vector2 {
                    x: column as f32 * self.tex_width,
                    y,
                });
            }
        }
        positions
    }

    /// Draw every tile of the layer.
    pub fn draw<D: GraphicsDevice + ?Sized>(
        &self,
        batch: &mut SpriteBatch<'_, D>,
        texture: TextureHandle,
    ) {
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.tex_width,
            height: self.tex_height,
        };
        for position in self.tile_positions() {
            batch.draw_at(texture, src, position);
        }
    }
}
