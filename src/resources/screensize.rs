//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. Refreshed whenever the
//! window-size-dependent resources are rebuilt.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Rectangle;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    /// Rectangle covering the whole screen.
    pub fn full_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.w as f32,
            height: self.h as f32,
        }
    }
}
