//! ECS resources made available to systems.
//!
//! Overview
//! - `gameconfig` – settings loaded from `config.ini` and the settings script
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `lua_runtime` – the Lua interpreter and typed global lookups
//! - `quit` – marker inserted when the player asks to leave
//! - `screensize` – current framebuffer dimensions in pixels
//! - `texturestore` – device textures keyed by string IDs
//! - `worldtime` – simulation time, delta and update counter
pub mod gameconfig;
pub mod input;
pub mod lua_runtime;
pub mod quit;
pub mod screensize;
pub mod texturestore;
pub mod worldtime;
