//! Scene setup and resource (re)creation.
//!
//! The scene is three entities drawn back to front:
//! - a full-screen [`Backdrop`] of the starfield texture
//! - a [`ScrollingBackground`] of the same texture, scrolling down
//! - the player ship: an [`AnimatedSprite`] moved by the keyboard
//!
//! Resources are split the way a device loss needs them split:
//! - device-dependent: the [`TextureStore`], rebuilt from files on restore
//! - window-size-dependent: [`ScreenSize`] and the layer viewports
//! - CPU state: entity positions, scroll offsets, animation frames; never
//!   touched by either rebuild

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use raylib::prelude::Vector2;
use serde::Deserialize;

use crate::backend::GraphicsDevice;
use crate::components::animatedsprite::AnimatedSprite;
use crate::components::backdrop::Backdrop;
use crate::components::inputcontrolled::{BoundsClamp, InputControlled};
use crate::components::mapposition::MapPosition;
use crate::components::scrollingbackground::ScrollingBackground;
use crate::error::{GameError, ScriptError};
use crate::resources::gameconfig::GameConfig;
use crate::resources::lua_runtime::LuaRuntime;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

pub const BACKGROUND_TEX: &str = "background";
pub const SHIP_TEX: &str = "ship";

/// Load every texture the scene uses and insert a fresh [`TextureStore`].
///
/// # Errors
///
/// Returns the first [`GameError::TextureLoad`]; the world is left without a
/// store in that case.
pub fn create_device_dependent_resources<D: GraphicsDevice + ?Sized>(
    world: &mut World,
    device: &mut D,
) -> Result<(), GameError> {
    let config = world.resource::<GameConfig>().clone();
    let mut store = TextureStore::new();
    store.load(device, BACKGROUND_TEX, &config.background_texture)?;
    store.load(device, SHIP_TEX, &config.ship_texture)?;
    world.insert_resource(store);
    Ok(())
}

fn texture_size(store: &TextureStore, key: &str) -> Result<(u32, u32), GameError> {
    store
        .size(key)
        .ok_or_else(|| GameError::InvalidSprite(format!("texture '{key}' is not loaded")))
}

/// Spawn the backdrop, the star layer and the ship. Needs the textures loaded.
///
/// # Errors
///
/// Returns [`GameError::InvalidSprite`] when the ship sheet cannot be split
/// into the configured frames.
pub fn spawn_scene(world: &mut World) -> Result<(), GameError> {
    let config = world.resource::<GameConfig>().clone();
    let (background_size, ship_size) = {
        let store = world.resource::<TextureStore>();
        (
            texture_size(store, BACKGROUND_TEX)?,
            texture_size(store, SHIP_TEX)?,
        )
    };

    let ship = AnimatedSprite::load(SHIP_TEX, ship_size, config.ship_frames, config.ship_fps)?;
    let bounds = Vector2 {
        x: config.window_width as f32,
        y: config.window_height as f32,
    };

    world.spawn(Backdrop::new(BACKGROUND_TEX));
    world.spawn(ScrollingBackground::load(BACKGROUND_TEX, background_size));
    world.spawn((
        ship,
        MapPosition::new(0.0, 0.0),
        InputControlled::new(config.ship_speed).with_normalized_diagonal(config.normalize_diagonal),
        BoundsClamp::from_bounds(bounds),
    ));
    info!(
        "Scene spawned: ship {} frames @ {} fps, playfield {}x{}",
        config.ship_frames, config.ship_fps, config.window_width, config.window_height
    );
    Ok(())
}

/// Point existing entities at the textures of a freshly rebuilt store.
///
/// Frame geometry is refreshed; frame indices and scroll offsets are kept.
///
/// # Errors
///
/// Returns [`GameError::InvalidSprite`] if a reloaded sheet no longer fits its
/// frame count.
pub fn rebind_textures(world: &mut World) -> Result<(), GameError> {
    let store = world.resource::<TextureStore>().clone();

    let mut sprites = world.query::<&mut AnimatedSprite>();
    for mut sprite in sprites.iter_mut(world) {
        let size = texture_size(&store, &sprite.tex_key)?;
        sprite.rebind(size)?;
    }

    let mut layers = world.query::<&mut ScrollingBackground>();
    for mut layer in layers.iter_mut(world) {
        let size = texture_size(&store, &layer.tex_key)?;
        layer.rebind(size);
    }
    Ok(())
}

/// Record the output size and resize every layer's viewport.
pub fn create_window_size_dependent_resources(world: &mut World, width: i32, height: i32) {
    world.insert_resource(ScreenSize {
        w: width,
        h: height,
    });
    let mut layers = world.query::<&mut ScrollingBackground>();
    for mut layer in layers.iter_mut(world) {
        layer.set_window(width, height);
    }
    debug!("Window-size resources rebuilt for {}x{}", width, height);
}

/// Put the ship at its start position: horizontally centred, three quarters
/// of the way down.
pub fn place_ship(world: &mut World, width: i32, height: i32) {
    let start = Vector2 {
        x: (width / 2) as f32,
        y: (height / 2 + height / 4) as f32,
    };
    let mut ships = world.query_filtered::<&mut MapPosition, With<InputControlled>>();
    for mut position in ships.iter_mut(world) {
        position.pos = start;
    }
}

#[derive(Debug, Default, Deserialize)]
struct ShipSettings {
    frames: Option<usize>,
    fps: Option<f32>,
    speed: Option<f32>,
}

/// Keep a script value, or log why the config default stays.
fn script_value<T>(name: &str, result: Result<T, ScriptError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ScriptError::Missing { .. }) => {
            debug!("Script does not set '{}', keeping default", name);
            None
        }
        Err(e) => {
            warn!("Ignoring script setting '{}': {}", name, e);
            None
        }
    }
}

/// Override config values with the globals of a settings script.
///
/// Reads `title` (string), `scroll_speed` (integer) and an optional `ship`
/// table `{ frames, fps, speed }`. Absent or mistyped values leave the
/// current setting alone.
pub fn apply_script_settings(config: &mut GameConfig, runtime: &LuaRuntime) {
    if let Some(title) = script_value("title", runtime.read_string("title")) {
        config.title = title;
    }
    if let Some(speed) = script_value("scroll_speed", runtime.read_int("scroll_speed")) {
        config.scroll_speed = speed as f32;
    }
    if let Some(ship) = script_value("ship", runtime.read_table::<ShipSettings>("ship")) {
        if let Some(frames) = ship.frames {
            config.ship_frames = frames;
        }
        if let Some(fps) = ship.fps {
            config.ship_fps = fps;
        }
        if let Some(speed) = ship.speed {
            config.ship_speed = speed;
        }
    }
}

/// Run the settings script named in `config` and apply its values.
///
/// Returns `false` when the script failed to run; the error has been logged
/// and the config is unchanged.
pub fn load_settings_script(config: &mut GameConfig, runtime: &LuaRuntime) -> bool {
    let path = config.script_path.to_string_lossy().into_owned();
    let result = runtime.run_script(&path);
    if !runtime.check_status(&result) {
        return false;
    }
    apply_script_settings(config, runtime);
    info!("Applied settings from {}", path);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(source: &str) -> LuaRuntime {
        let rt = LuaRuntime::new().unwrap();
        rt.exec(source, "settings").unwrap();
        rt
    }

    #[test]
    fn script_overrides_config() {
        let rt = runtime(
            r#"
            title = "Nebula Run"
            scroll_speed = 320
            ship = { frames = 6, fps = 12, speed = 3 }
            "#,
        );
        let mut config = GameConfig::new();
        apply_script_settings(&mut config, &rt);
        assert_eq!(config.title, "Nebula Run");
        assert_eq!(config.scroll_speed, 320.0);
        assert_eq!(config.ship_frames, 6);
        assert_eq!(config.ship_fps, 12.0);
        assert_eq!(config.ship_speed, 3.0);
    }

    #[test]
    fn wrong_types_keep_defaults() {
        let rt = runtime(
            r#"
            title = {}
            scroll_speed = "fast"
            ship = 5
            "#,
        );
        let mut config = GameConfig::new();
        apply_script_settings(&mut config, &rt);
        let defaults = GameConfig::new();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.scroll_speed, defaults.scroll_speed);
        assert_eq!(config.ship_frames, defaults.ship_frames);
    }

    #[test]
    fn partial_ship_table_overrides_only_given_fields() {
        let rt = runtime("ship = { fps = 30 }");
        let mut config = GameConfig::new();
        apply_script_settings(&mut config, &rt);
        assert_eq!(config.ship_fps, 30.0);
        assert_eq!(config.ship_frames, 4);
    }

    #[test]
    fn missing_script_is_reported_not_fatal() {
        let rt = LuaRuntime::new().unwrap();
        let mut config = GameConfig::new();
        config.set_script_path("/no/such/settings.lua");
        assert!(!load_settings_script(&mut config, &rt));
        assert_eq!(config.title, GameConfig::new().title);
    }
}
