//! Error types shared across the game.
//!
//! Texture loading and device creation are fatal for the executable: they
//! bubble up to `main` as a [`GameError`]. Script lookups return a
//! [`ScriptError`] so callers can decide between falling back to a default and
//! aborting.

use std::path::PathBuf;

/// Errors raised while reading globals from the Lua state.
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    /// The global is nil.
    #[error("script global '{name}' is not defined")]
    Missing { name: String },

    /// The global exists but holds a value of another Lua type.
    #[error("script global '{name}' is a {found}, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The interpreter itself failed (syntax error, runtime error, conversion).
    #[error("lua error: {0}")]
    Lua(#[from] mlua::Error),
}

/// Errors that stop the game from starting or rendering.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A texture file could not be loaded by the device.
    #[error("failed to load texture {path:?}: {reason}")]
    TextureLoad { path: PathBuf, reason: String },

    /// Sprite-sheet geometry that cannot be animated.
    #[error("invalid sprite: {0}")]
    InvalidSprite(String),

    /// The graphics device could not be (re)created.
    #[error("failed to create graphics device: {0}")]
    DeviceCreation(String),

    /// A frame was requested before `initialize` ran.
    #[error("frame controller used before initialization")]
    NotInitialized,

    /// Configuration file present but unreadable.
    #[error("config error: {0}")]
    Config(String),
}
