//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite-sheet animations
//! - [`render`] – draw the world into a sprite batch in layer order
//! - [`scrolling`] – scroll background layers by speed × delta
//! - [`shipcontroller`] – map keyboard input to clamped ship motion and quit requests
//! - [`time`] – update simulation time, delta and the update counter

pub mod animation;
pub mod render;
pub mod scrolling;
pub mod shipcontroller;
pub mod time;
