//! Starscroller library.
//!
//! A vertically scrolling starfield with a keyboard-driven, animated ship.
//! The library holds everything but the window loop so the frame logic can be
//! driven by any [`backend::GraphicsDevice`] in integration tests.

pub mod backend;
pub mod components;
pub mod error;
pub mod framecontroller;
pub mod game;
pub mod resources;
pub mod steptimer;
pub mod systems;
