//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animatedsprite`] – sprite-sheet playback state and source rectangle
//! - [`backdrop`] – full-screen background texture
//! - [`inputcontrolled`] – keyboard-driven movement and position clamp
//! - [`mapposition`] – world-space position of an entity
//! - [`scrollingbackground`] – tiled layer scrolling with wraparound

pub mod animatedsprite;
pub mod backdrop;
pub mod inputcontrolled;
pub mod mapposition;
pub mod scrollingbackground;
