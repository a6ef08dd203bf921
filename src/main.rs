//! Starscroller main entry point.
//!
//! A small 2D demo written in Rust using:
//! - **raylib** for the window, textures and keyboard
//! - **bevy_ecs** for the entity-component-system world
//! - **mlua + Lua 5.4** for an optional settings script
//!
//! # Startup
//!
//! 1. Read `config.ini` (defaults when missing)
//! 2. Run the settings script, which may override title, scroll speed and
//!    ship animation
//! 3. Open the window and hand it to the [`FrameController`]
//! 4. Tick until Escape is pressed or the window is closed
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --config config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use starscroller::backend::raylib_backend::RaylibBackend;
use starscroller::framecontroller::FrameController;
use starscroller::game;
use starscroller::resources::gameconfig::GameConfig;
use starscroller::resources::lua_runtime::LuaRuntime;

/// Starscroller
#[derive(Parser)]
#[command(version, about = "Fly a ship over a scrolling starfield.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Lua settings script, overriding the one named in the config file.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(script) = cli.script {
        config.set_script_path(script);
    }

    match LuaRuntime::new() {
        Ok(runtime) => {
            game::load_settings_script(&mut config, &runtime);
        }
        Err(e) => error!("Failed to create Lua runtime: {}", e),
    }

    let backend = RaylibBackend::open(&config);
    let mut frames = FrameController::new(backend, config);
    if let Err(e) = frames.initialize() {
        error!("Failed to start: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !frames.exit_requested() {
        if let Err(e) = frames.tick() {
            error!("Frame failed: {}", e);
            std::process::exit(1);
        }
    }
    info!("Bye");
}
