//! Device-owned textures keyed by name.
//!
//! This is the only GPU state in the world. Components refer to textures by
//! key, so dropping the store on a device loss and reloading it on restore
//! leaves every entity untouched.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::backend::{GraphicsDevice, LoadedTexture, TextureHandle};
use crate::error::GameError;

#[derive(Resource, Debug, Default, Clone)]
pub struct TextureStore {
    pub map: FxHashMap<String, LoadedTexture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` through `device` and register it under `key`, replacing any
    /// previous entry.
    ///
    /// # Errors
    ///
    /// Propagates the device's [`GameError::TextureLoad`].
    pub fn load<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        key: impl Into<String>,
        path: &Path,
    ) -> Result<LoadedTexture, GameError> {
        let key = key.into();
        let loaded = device.load_texture(path)?;
        info!(
            "Texture '{}' loaded from {:?} ({}x{})",
            key, path, loaded.width, loaded.height
        );
        self.map.insert(key, loaded);
        Ok(loaded)
    }

    pub fn get(&self, key: &str) -> Option<&LoadedTexture> {
        self.map.get(key)
    }

    pub fn handle(&self, key: &str) -> Option<TextureHandle> {
        self.map.get(key).map(|t| t.handle)
    }

    /// `(width, height)` of the texture under `key`.
    pub fn size(&self, key: &str) -> Option<(u32, u32)> {
        self.map.get(key).map(|t| (t.width, t.height))
    }
}
