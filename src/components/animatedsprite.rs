//! Sprite-sheet animation component.
//!
//! A sheet is a single texture holding `frame_count` equally wide frames laid
//! out left to right. [`AnimatedSprite`] tracks which frame is visible and
//! advances it at a fixed frame rate.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

use crate::backend::{GraphicsDevice, SpriteBatch, TextureHandle};
use crate::error::GameError;

/// Animated sprite bound to a texture key in
/// [`TextureStore`](crate::resources::texturestore::TextureStore).
#[derive(Component, Clone, Debug)]
pub struct AnimatedSprite {
    pub tex_key: String,
    pub frame_width: f32,
    pub frame_height: f32,
    frame_count: usize,
    fps: f32,
    frame_index: usize,
    elapsed: f32,
    paused: bool,
}

impl AnimatedSprite {
    /// Bind a sprite sheet of `texture_size` pixels split into `frame_count`
    /// frames played at `fps`. Starts on frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSprite`] for zero frames, a non-positive
    /// frame rate, or a sheet narrower than one pixel per frame.
    pub fn load(
        tex_key: impl Into<String>,
        texture_size: (u32, u32),
        frame_count: usize,
        fps: f32,
    ) -> Result<Self, GameError> {
        let tex_key = tex_key.into();
        if frame_count == 0 {
            return Err(GameError::InvalidSprite(format!(
                "'{tex_key}' needs at least one frame"
            )));
        }
        if !fps.is_finite() || fps <= 0.0 {
            return Err(GameError::InvalidSprite(format!(
                "'{tex_key}' frame rate must be positive and finite, got {fps}"
            )));
        }
        let mut sprite = Self {
            tex_key,
            frame_width: 0.0,
            frame_height: 0.0,
            frame_count,
            fps,
            frame_index: 0,
            elapsed: 0.0,
            paused: false,
        };
        sprite.rebind(texture_size)?;
        Ok(sprite)
    }

    /// Recompute frame geometry for a reloaded texture, keeping playback state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSprite`] if the texture is narrower than
    /// `frame_count` pixels.
    pub fn rebind(&mut self, texture_size: (u32, u32)) -> Result<(), GameError> {
        let (width, height) = texture_size;
        let frame_width = width as usize / self.frame_count;
        if frame_width == 0 {
            return Err(GameError::InvalidSprite(format!(
                "'{}' is {} px wide, too narrow for {} frames",
                self.tex_key, width, self.frame_count
            )));
        }
        self.frame_width = frame_width as f32;
        self.frame_height = height as f32;
        Ok(())
    }

    /// Advance playback by `elapsed` seconds.
    ///
    /// Leftover time carries into the next frame, so after a total time `t`
    /// the visible frame is `floor(t * fps) % frame_count` regardless of how
    /// the time was split across calls.
    pub fn update(&mut self, elapsed: f32) {
        if self.paused {
            return;
        }
        self.elapsed += elapsed;
        let time_per_frame = 1.0 / self.fps;
        if self.elapsed < time_per_frame {
            return;
        }
        let steps = (self.elapsed / time_per_frame).floor();
        let advance = (steps as u64 % self.frame_count as u64) as usize;
        self.frame_index = (self.frame_index + advance) % self.frame_count;
        self.elapsed = (self.elapsed - steps * time_per_frame).max(0.0);
    }

    /// Region of the sheet holding the current frame.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: self.frame_index as f32 * self.frame_width,
            y: 0.0,
            width: self.frame_width,
            height: self.frame_height,
        }
    }

    /// Draw the current frame with its top-left corner at `position`.
    pub fn draw<D: GraphicsDevice + ?Sized>(
        &self,
        batch: &mut SpriteBatch<'_, D>,
        texture: TextureHandle,
        position: Vector2,
    ) {
        batch.draw_at(texture, self.source_rect(), position);
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn play(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> AnimatedSprite {
        AnimatedSprite::load("ship", (256, 64), 4, 4.0).unwrap()
    }

    #[test]
    fn load_splits_sheet_into_frames() {
        let s = ship();
        assert_eq!(s.frame_width, 64.0);
        assert_eq!(s.frame_height, 64.0);
        assert_eq!(s.frame_index(), 0);
        assert_eq!(s.frame_count(), 4);
    }

    #[test]
    fn load_rejects_bad_geometry() {
        assert!(AnimatedSprite::load("x", (64, 64), 0, 10.0).is_err());
        assert!(AnimatedSprite::load("x", (64, 64), 4, 0.0).is_err());
        assert!(AnimatedSprite::load("x", (64, 64), 4, f32::NAN).is_err());
        assert!(AnimatedSprite::load("x", (64, 64), 4, f32::INFINITY).is_err());
        assert!(AnimatedSprite::load("x", (3, 64), 4, 10.0).is_err());
    }

    #[test]
    fn frame_index_follows_total_time() {
        let mut s = ship();
        // 0.125 s steps at 4 fps: one frame every two updates.
        for n in 1..=20u32 {
            s.update(0.125);
            let t = n as f32 * 0.125;
            let expected = ((t * 4.0).floor() as usize) % 4;
            assert_eq!(s.frame_index(), expected, "after {n} updates");
        }
    }

    #[test]
    fn large_step_advances_several_frames() {
        let mut s = ship();
        s.update(1.5);
        assert_eq!(s.frame_index(), 2); // floor(6) % 4
    }

    #[test]
    fn zero_elapsed_changes_nothing() {
        let mut s = ship();
        for _ in 0..10 {
            s.update(0.0);
        }
        assert_eq!(s.frame_index(), 0);
    }

    #[test]
    fn source_rect_tracks_frame() {
        let mut s = ship();
        s.update(0.5);
        assert_eq!(s.frame_index(), 2);
        let r = s.source_rect();
        assert_eq!((r.x, r.y, r.width, r.height), (128.0, 0.0, 64.0, 64.0));
    }

    #[test]
    fn paused_sprite_holds_frame() {
        let mut s = ship();
        s.update(0.25);
        s.pause();
        s.update(10.0);
        assert_eq!(s.frame_index(), 1);
        s.play();
        s.update(0.25);
        assert_eq!(s.frame_index(), 2);
        assert!(!s.is_paused());
    }

    #[test]
    fn rebind_keeps_frame() {
        let mut s = ship();
        s.update(0.75);
        s.rebind((512, 128)).unwrap();
        assert_eq!(s.frame_index(), 3);
        assert_eq!(s.frame_width, 128.0);
        assert_eq!(s.frame_height, 128.0);
    }
}
