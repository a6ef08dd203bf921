//! Graphics and input collaborator traits.
//!
//! The game never talks to a window or GPU directly. It goes through:
//! - [`GraphicsDevice`] – texture loading, frame clear/present, sprite draws,
//!   and device (re)creation after a loss
//! - [`InputSource`] – per-frame keyboard snapshot
//!
//! [`SpriteBatch`] is the scoped draw session: it opens a batch on the device
//! when created and closes it when dropped, so every draw happens between a
//! matching `begin_batch`/`end_batch` pair.
//!
//! [`raylib_backend`] provides the window-backed implementation used by the
//! executable.

pub mod raylib_backend;

use std::num::NonZeroU64;
use std::path::Path;

use ::raylib::prelude::{Color, Rectangle, Vector2};

use crate::error::GameError;
use crate::resources::input::InputState;

/// Opaque id of a texture owned by a [`GraphicsDevice`].
///
/// Devices hand out a fresh id on every load and never reuse one, so a handle
/// obtained before a device loss can never alias a texture created after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(NonZeroU64);

impl TextureHandle {
    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    pub fn id(self) -> u64 {
        self.0.get()
    }
}

/// A texture freshly loaded by the device, with its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Outcome of presenting a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentStatus {
    Presented,
    /// Every texture handle is now invalid; resources must be rebuilt.
    DeviceLost,
}

/// Window, GPU and texture-loading collaborator.
pub trait GraphicsDevice {
    /// Current drawable size in pixels.
    fn output_size(&self) -> (i32, i32);

    /// Load a texture from an image file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TextureLoad`] when the file cannot be read or decoded.
    fn load_texture(&mut self, path: &Path) -> Result<LoadedTexture, GameError>;

    /// Drop every texture owned by the device. Existing handles become dangling.
    fn release_textures(&mut self);

    /// Clear the back buffer for a new frame.
    fn clear(&mut self, color: Color);

    fn begin_batch(&mut self);

    /// Draw `src` of `texture` into `dest`. Only valid between
    /// `begin_batch` and `end_batch`.
    fn draw(&mut self, texture: TextureHandle, src: Rectangle, dest: Rectangle);

    fn end_batch(&mut self);

    /// Show the frame built since the last `clear`.
    fn present(&mut self) -> PresentStatus;

    /// Rebuild the device after a loss.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DeviceCreation`] if the device cannot be restored.
    fn recreate(&mut self) -> Result<(), GameError>;

    /// Process window events without presenting a frame. Called on ticks that
    /// skip rendering so minimize, restore and close still get noticed.
    fn pump_events(&mut self);

    fn is_minimized(&self) -> bool {
        false
    }

    fn is_focused(&self) -> bool {
        true
    }

    /// Whether the host asked the window to close.
    fn should_close(&self) -> bool {
        false
    }
}

/// Keyboard collaborator.
pub trait InputSource {
    /// Refresh `input` with the current key states.
    fn poll_input(&mut self, input: &mut InputState);
}

/// Scoped sprite draw session on a [`GraphicsDevice`].
///
/// The batch is open for the lifetime of the value; dropping it ends the batch.
pub struct SpriteBatch<'a, D: GraphicsDevice + ?Sized> {
    device: &'a mut D,
    draw_calls: usize,
}

impl<'a, D: GraphicsDevice + ?Sized> SpriteBatch<'a, D> {
    /// Open a batch on `device`.
    pub fn begin(device: &'a mut D) -> Self {
        device.begin_batch();
        Self {
            device,
            draw_calls: 0,
        }
    }

    /// Queue one textured quad.
    pub fn draw(&mut self, texture: TextureHandle, src: Rectangle, dest: Rectangle) {
        self.device.draw(texture, src, dest);
        self.draw_calls += 1;
    }

    /// Draw `src` unscaled with its top-left corner at `position`.
    pub fn draw_at(&mut self, texture: TextureHandle, src: Rectangle, position: Vector2) {
        let dest = Rectangle {
            x: position.x,
            y: position.y,
            width: src.width,
            height: src.height,
        };
        self.draw(texture, src, dest);
    }

    /// Number of draws issued through this batch so far.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}

impl<D: GraphicsDevice + ?Sized> Drop for SpriteBatch<'_, D> {
    fn drop(&mut self) {
        self.device.end_batch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        begins: usize,
        ends: usize,
        draws: usize,
    }

    impl GraphicsDevice for Counting {
        fn output_size(&self) -> (i32, i32) {
            (800, 600)
        }
        fn load_texture(&mut self, path: &Path) -> Result<LoadedTexture, GameError> {
            Err(GameError::TextureLoad {
                path: path.to_path_buf(),
                reason: "not supported".into(),
            })
        }
        fn release_textures(&mut self) {}
        fn clear(&mut self, _color: Color) {}
        fn begin_batch(&mut self) {
            self.begins += 1;
        }
        fn draw(&mut self, _texture: TextureHandle, _src: Rectangle, _dest: Rectangle) {
            assert_eq!(self.begins, self.ends + 1, "draw outside of a batch");
            self.draws += 1;
        }
        fn end_batch(&mut self) {
            self.ends += 1;
        }
        fn present(&mut self) -> PresentStatus {
            PresentStatus::Presented
        }
        fn recreate(&mut self) -> Result<(), GameError> {
            Ok(())
        }
        fn pump_events(&mut self) {}
    }

    #[test]
    fn texture_handle_rejects_zero() {
        assert!(TextureHandle::new(0).is_none());
        assert_eq!(TextureHandle::new(7).map(TextureHandle::id), Some(7));
    }

    #[test]
    fn sprite_batch_brackets_draws() {
        let mut device = Counting::default();
        let tex = TextureHandle::new(1).unwrap();
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 16.0,
            height: 8.0,
        };
        {
            let mut batch = SpriteBatch::begin(&mut device);
            batch.draw_at(tex, src, Vector2 { x: 3.0, y: 4.0 });
            batch.draw_at(tex, src, Vector2 { x: 5.0, y: 6.0 });
            assert_eq!(batch.draw_calls(), 2);
        }
        assert_eq!(device.begins, 1);
        assert_eq!(device.ends, 1);
        assert_eq!(device.draws, 2);
    }
}
