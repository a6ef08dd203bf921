//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup so a missing file is never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! title = Starscroller
//! target_fps = 60
//! vsync = true
//!
//! [gameplay]
//! scroll_speed = 500
//! ship_speed = 2
//! ship_frames = 4
//! ship_fps = 20
//! normalize_diagonal = false
//!
//! [assets]
//! background = assets/textures/starfield.png
//! ship = assets/textures/shipanimated.png
//! script = assets/scripts/game.lua
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

use crate::error::GameError;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TITLE: &str = "Starscroller";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_SCROLL_SPEED: f32 = 500.0;
const DEFAULT_SHIP_SPEED: f32 = 2.0;
const DEFAULT_SHIP_FRAMES: usize = 4;
const DEFAULT_SHIP_FPS: f32 = 20.0;
const DEFAULT_NORMALIZE_DIAGONAL: bool = false;
const DEFAULT_BACKGROUND_TEXTURE: &str = "assets/textures/starfield.png";
const DEFAULT_SHIP_TEXTURE: &str = "assets/textures/shipanimated.png";
const DEFAULT_SCRIPT: &str = "assets/scripts/game.lua";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels; also the playfield bounds for the ship clamp.
    pub window_width: u32,
    /// Window height in pixels; also the playfield bounds for the ship clamp.
    pub window_height: u32,
    pub title: String,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Star layer scroll speed in pixels per second.
    pub scroll_speed: f32,
    /// Ship displacement per frame along each held axis.
    pub ship_speed: f32,
    /// Frames in the ship sprite sheet.
    pub ship_frames: usize,
    /// Ship animation frame rate.
    pub ship_fps: f32,
    /// Scale diagonal ship movement down to `ship_speed`.
    pub normalize_diagonal: bool,
    pub background_texture: PathBuf,
    pub ship_texture: PathBuf,
    /// Lua settings script.
    pub script_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            ship_speed: DEFAULT_SHIP_SPEED,
            ship_frames: DEFAULT_SHIP_FRAMES,
            ship_fps: DEFAULT_SHIP_FPS,
            normalize_diagonal: DEFAULT_NORMALIZE_DIAGONAL,
            background_texture: PathBuf::from(DEFAULT_BACKGROUND_TEXTURE),
            ship_texture: PathBuf::from(DEFAULT_SHIP_TEXTURE),
            script_path: PathBuf::from(DEFAULT_SCRIPT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| GameError::Config(format!("failed to load {:?}: {}", self.config_path, e)))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the text is not valid INI.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| GameError::Config(format!("failed to parse config: {}", e)))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [gameplay] section
        if let Some(speed) = config.getfloat("gameplay", "scroll_speed").ok().flatten() {
            self.scroll_speed = speed as f32;
        }
        if let Some(speed) = config.getfloat("gameplay", "ship_speed").ok().flatten() {
            self.ship_speed = speed as f32;
        }
        if let Some(frames) = config.getuint("gameplay", "ship_frames").ok().flatten() {
            self.ship_frames = frames as usize;
        }
        if let Some(fps) = config.getfloat("gameplay", "ship_fps").ok().flatten() {
            self.ship_fps = fps as f32;
        }
        if let Some(normalize) = config
            .getbool("gameplay", "normalize_diagonal")
            .ok()
            .flatten()
        {
            self.normalize_diagonal = normalize;
        }

        // [assets] section
        if let Some(path) = config.get("assets", "background") {
            self.background_texture = PathBuf::from(path);
        }
        if let Some(path) = config.get("assets", "ship") {
            self.ship_texture = PathBuf::from(path);
        }
        if let Some(path) = config.get("assets", "script") {
            self.script_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: {}x{} window \"{}\", fps={}, vsync={}, scroll={}, ship speed={} frames={}@{}",
            self.window_width,
            self.window_height,
            self.title,
            self.target_fps,
            self.vsync,
            self.scroll_speed,
            self.ship_speed,
            self.ship_frames,
            self.ship_fps
        );
    }

    /// Replace the settings script path.
    pub fn set_script_path(&mut self, path: impl AsRef<Path>) {
        self.script_path = path.as_ref().to_path_buf();
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_800x600_window() {
        let cfg = GameConfig::new();
        assert_eq!(cfg.window_size(), (800, 600));
        assert_eq!(cfg.scroll_speed, 500.0);
        assert_eq!(cfg.ship_speed, 2.0);
        assert_eq!(cfg.ship_frames, 4);
        assert_eq!(cfg.ship_fps, 20.0);
        assert!(!cfg.normalize_diagonal);
    }

    #[test]
    fn ini_overrides_only_present_keys() {
        let mut cfg = GameConfig::new();
        cfg.load_from_str(
            "[window]\nwidth = 1024\ntitle = Nebula\n\n[gameplay]\nscroll_speed = 250.5\nnormalize_diagonal = true\n\n[assets]\nship = ships/red.png\n",
        )
        .unwrap();
        assert_eq!(cfg.window_width, 1024);
        assert_eq!(cfg.window_height, 600);
        assert_eq!(cfg.title, "Nebula");
        assert_eq!(cfg.scroll_speed, 250.5);
        assert!(cfg.normalize_diagonal);
        assert_eq!(cfg.ship_texture, PathBuf::from("ships/red.png"));
        assert_eq!(cfg.background_texture, PathBuf::from(DEFAULT_BACKGROUND_TEXTURE));
    }

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let mut cfg = GameConfig::with_path("/definitely/not/here/config.ini");
        assert!(cfg.load_from_file().is_err());
        assert_eq!(cfg.window_size(), (800, 600));
    }
}
