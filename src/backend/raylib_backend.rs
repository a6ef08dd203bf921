//! Raylib implementation of the graphics and input collaborators.
//!
//! Raylib only lets us draw inside a `RaylibDrawHandle` scope, which borrows
//! the handle for its whole lifetime. The sprite batch is therefore deferred:
//! draws are queued between `begin_batch` and `end_batch`, and `present`
//! opens the drawing scope, clears, and replays the queue in order.
//!
//! Raylib owns its OpenGL context for the life of the window, so `present`
//! never reports a device loss.

use std::path::Path;

use log::{debug, info};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::backend::{GraphicsDevice, InputSource, LoadedTexture, PresentStatus, TextureHandle};
use crate::error::GameError;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

/// Smallest window the host allows.
pub const MIN_WINDOW_WIDTH: i32 = 320;
pub const MIN_WINDOW_HEIGHT: i32 = 200;

#[derive(Debug, Clone, Copy)]
struct QueuedDraw {
    texture: TextureHandle,
    src: Rectangle,
    dest: Rectangle,
}

/// Window, textures and keyboard backed by raylib.
///
/// Not `Send`: the raylib handle must stay on the thread that created it.
pub struct RaylibBackend {
    rl: RaylibHandle,
    thread: RaylibThread,
    textures: FxHashMap<TextureHandle, Texture2D>,
    next_texture_id: u64,
    clear_color: Color,
    queue: Vec<QueuedDraw>,
    batch_open: bool,
}

impl RaylibBackend {
    /// Open the game window described by `config`.
    pub fn open(config: &GameConfig) -> Self {
        let mut builder = raylib::init();
        builder
            .size(config.window_width as i32, config.window_height as i32)
            .resizable()
            .title(&config.title);
        if config.vsync {
            builder.vsync();
        }
        let (mut rl, thread) = builder.build();
        rl.set_target_fps(config.target_fps);
        rl.set_window_min_size(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
        // Escape is a game action, not raylib's built-in close key.
        rl.set_exit_key(None);
        info!(
            "Window opened: {}x{} \"{}\"",
            config.window_width, config.window_height, config.title
        );

        Self {
            rl,
            thread,
            textures: FxHashMap::default(),
            next_texture_id: 1,
            clear_color: Color::BLACK,
            queue: Vec::new(),
            batch_open: false,
        }
    }

    fn issue_handle(&mut self) -> Result<TextureHandle, GameError> {
        let handle = TextureHandle::new(self.next_texture_id)
            .ok_or_else(|| GameError::DeviceCreation("texture id space exhausted".into()))?;
        self.next_texture_id += 1;
        Ok(handle)
    }
}

impl GraphicsDevice for RaylibBackend {
    fn output_size(&self) -> (i32, i32) {
        (self.rl.get_screen_width(), self.rl.get_screen_height())
    }

    fn load_texture(&mut self, path: &Path) -> Result<LoadedTexture, GameError> {
        let path_str = path.to_str().ok_or_else(|| GameError::TextureLoad {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".into(),
        })?;
        let texture = self
            .rl
            .load_texture(&self.thread, path_str)
            .map_err(|e| GameError::TextureLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let handle = self.issue_handle()?;
        let loaded = LoadedTexture {
            handle,
            width: texture.width.max(0) as u32,
            height: texture.height.max(0) as u32,
        };
        debug!(
            "Loaded texture {:?} as #{} ({}x{})",
            path,
            handle.id(),
            loaded.width,
            loaded.height
        );
        self.textures.insert(handle, texture);
        Ok(loaded)
    }

    fn release_textures(&mut self) {
        debug!("Releasing {} textures", self.textures.len());
        self.queue.clear();
        self.textures.clear();
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.queue.clear();
    }

    fn begin_batch(&mut self) {
        self.batch_open = true;
    }

    fn draw(&mut self, texture: TextureHandle, src: Rectangle, dest: Rectangle) {
        if self.batch_open {
            self.queue.push(QueuedDraw { texture, src, dest });
        }
    }

    fn end_batch(&mut self) {
        self.batch_open = false;
    }

    fn present(&mut self) -> PresentStatus {
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(self.clear_color);
        for cmd in self.queue.drain(..) {
            if let Some(tex) = self.textures.get(&cmd.texture) {
                d.draw_texture_pro(
                    tex,
                    cmd.src,
                    cmd.dest,
                    Vector2 { x: 0.0, y: 0.0 },
                    0.0,
                    Color::WHITE,
                );
            }
        }
        PresentStatus::Presented
    }

    fn recreate(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn pump_events(&mut self) {
        // EndDrawing is where raylib polls window events and waits out the
        // target frame time.
        self.queue.clear();
        let _d = self.rl.begin_drawing(&self.thread);
    }

    fn is_minimized(&self) -> bool {
        self.rl.is_window_minimized()
    }

    fn is_focused(&self) -> bool {
        self.rl.is_window_focused()
    }

    fn should_close(&self) -> bool {
        self.rl.window_should_close()
    }
}

impl InputSource for RaylibBackend {
    fn poll_input(&mut self, input: &mut InputState) {
        for action in input.actions_mut() {
            let down = self.rl.is_key_down(action.key_binding);
            action.set_down(down);
        }
    }
}
