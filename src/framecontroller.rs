//! Per-frame driver and window/device lifecycle.
//!
//! [`FrameController`] owns the ECS world, the update schedule, the step
//! timer and the graphics device. The host loop only calls [`tick`] and
//! forwards window events; everything else happens here.
//!
//! ```text
//! Uninitialized --initialize--> Ready --update--> Running
//!                                 |                 |  ^
//!                                 |                 v  | on_suspending / on_resuming
//!                                 |             Suspended
//!                                 +---> DeviceLost <---+
//!                                          | on_device_restored
//!                                          v
//!                                     Ready / Running
//! ```
//!
//! [`tick`]: FrameController::tick

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use raylib::prelude::Color;

use crate::backend::{GraphicsDevice, InputSource, PresentStatus, SpriteBatch};
use crate::components::animatedsprite::AnimatedSprite;
use crate::error::GameError;
use crate::game;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::quit::QuitRequested;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::steptimer::StepTimer;
use crate::systems::animation::animation;
use crate::systems::render::render_pass;
use crate::systems::scrolling::scroll_backgrounds;
use crate::systems::shipcontroller::{exit_on_back, ship_controller};
use crate::systems::time::update_world_time;

/// Window size used when the host has no better idea.
pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 600;

/// Frame clear colour (cornflower blue).
pub const CLEAR_COLOR: Color = Color {
    r: 100,
    g: 149,
    b: 237,
    a: 255,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Uninitialized,
    /// Initialized, no update has run yet.
    Ready,
    Running,
    Suspended,
    DeviceLost,
}

pub struct FrameController<D: GraphicsDevice + InputSource> {
    world: World,
    update: Schedule,
    timer: StepTimer,
    device: D,
    state: FrameState,
    focused: bool,
}

impl<D: GraphicsDevice + InputSource> FrameController<D> {
    pub fn new(device: D, config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(InputState::default());
        world.insert_resource(config);

        let mut update = Schedule::default();
        update.add_systems((animation, scroll_backgrounds, ship_controller, exit_on_back).chain());

        Self {
            world,
            update,
            timer: StepTimer::new(),
            device,
            state: FrameState::Uninitialized,
            focused: true,
        }
    }

    /// Preferred window size before a config has been read.
    pub fn default_size() -> (i32, i32) {
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Load textures, spawn the scene and place the ship.
    ///
    /// # Errors
    ///
    /// Texture and sprite errors from scene creation. The controller stays
    /// `Uninitialized` on failure.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        game::create_device_dependent_resources(&mut self.world, &mut self.device)?;
        game::spawn_scene(&mut self.world)?;
        let (w, h) = self.device.output_size();
        game::create_window_size_dependent_resources(&mut self.world, w, h);
        game::place_ship(&mut self.world, w, h);
        self.timer.reset_elapsed_time();
        self.state = FrameState::Ready;
        info!("Frame controller ready ({}x{})", w, h);
        Ok(())
    }

    /// One pass of the host loop: react to window changes, measure the frame
    /// time, then update and render.
    ///
    /// # Errors
    ///
    /// [`GameError::NotInitialized`] before [`initialize`](Self::initialize);
    /// device and texture errors when a lost device cannot be restored. The
    /// host treats both as fatal.
    pub fn tick(&mut self) -> Result<(), GameError> {
        if self.state == FrameState::Uninitialized {
            return Err(GameError::NotInitialized);
        }
        self.poll_window()?;
        if !self.is_active() {
            self.device.pump_events();
            return Ok(());
        }
        let elapsed = self.timer.tick();
        self.step(elapsed)
    }

    fn poll_window(&mut self) -> Result<(), GameError> {
        let focused = self.device.is_focused();
        if focused != self.focused {
            if focused {
                self.on_activated();
            } else {
                self.on_deactivated();
            }
        }

        let minimized = self.device.is_minimized();
        match self.state {
            FrameState::Suspended if !minimized => self.on_resuming(),
            FrameState::Ready | FrameState::Running if minimized => self.on_suspending(),
            FrameState::DeviceLost => {
                self.device.recreate()?;
                self.on_device_restored()?;
            }
            _ => {}
        }

        let (w, h) = self.device.output_size();
        self.on_window_size_changed(w, h);
        Ok(())
    }

    fn is_active(&self) -> bool {
        matches!(self.state, FrameState::Ready | FrameState::Running)
    }

    /// Update then render with an explicit elapsed time in seconds.
    ///
    /// # Errors
    ///
    /// Same as [`tick`](Self::tick).
    pub fn step(&mut self, elapsed: f32) -> Result<(), GameError> {
        match self.state {
            FrameState::Uninitialized => Err(GameError::NotInitialized),
            FrameState::Suspended | FrameState::DeviceLost => Ok(()),
            FrameState::Ready | FrameState::Running => {
                self.update(elapsed);
                self.render()
            }
        }
    }

    /// Advance the simulation by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        {
            let mut input = self.world.resource_mut::<InputState>();
            self.device.poll_input(&mut input);
        }
        update_world_time(&mut self.world, elapsed);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
        if self.state == FrameState::Ready {
            self.state = FrameState::Running;
        }
    }

    /// Draw the current frame. Does nothing until the first update.
    ///
    /// # Errors
    ///
    /// Texture errors if a device loss reported by `present` cannot be
    /// recovered.
    pub fn render(&mut self) -> Result<(), GameError> {
        if self.world.resource::<WorldTime>().frame_count == 0 {
            return Ok(());
        }
        if matches!(
            self.state,
            FrameState::Uninitialized | FrameState::DeviceLost
        ) {
            return Ok(());
        }

        self.device.clear(CLEAR_COLOR);
        {
            let mut batch = SpriteBatch::begin(&mut self.device);
            render_pass(&mut self.world, &mut batch);
        }
        match self.device.present() {
            PresentStatus::Presented => Ok(()),
            PresentStatus::DeviceLost => self.handle_device_lost(),
        }
    }

    fn handle_device_lost(&mut self) -> Result<(), GameError> {
        warn!("Graphics device lost, recreating");
        self.on_device_lost();
        self.device.recreate()?;
        self.on_device_restored()
    }

    /// Drop every device resource. Entity state is kept.
    pub fn on_device_lost(&mut self) {
        self.world.remove_resource::<TextureStore>();
        self.device.release_textures();
        if self.state != FrameState::Uninitialized {
            self.state = FrameState::DeviceLost;
        }
    }

    /// Reload textures into a fresh store and rebind the scene to them.
    ///
    /// # Errors
    ///
    /// Texture load or sprite geometry errors. The controller stays in
    /// `DeviceLost` and the error reaches the host through
    /// [`tick`](Self::tick), which ends the game.
    pub fn on_device_restored(&mut self) -> Result<(), GameError> {
        game::create_device_dependent_resources(&mut self.world, &mut self.device)?;
        game::rebind_textures(&mut self.world)?;
        let (w, h) = self.device.output_size();
        game::create_window_size_dependent_resources(&mut self.world, w, h);
        self.state = self.resumed_state();
        info!("Graphics device restored");
        Ok(())
    }

    fn resumed_state(&self) -> FrameState {
        if self.world.resource::<WorldTime>().frame_count == 0 {
            FrameState::Ready
        } else {
            FrameState::Running
        }
    }

    /// Resume sprite animations paused by [`on_deactivated`](Self::on_deactivated).
    pub fn on_activated(&mut self) {
        self.focused = true;
        let mut sprites = self.world.query::<&mut AnimatedSprite>();
        for mut sprite in sprites.iter_mut(&mut self.world) {
            sprite.play();
        }
        debug!("Window activated");
    }

    /// Freeze sprite animations while the window is in the background.
    pub fn on_deactivated(&mut self) {
        self.focused = false;
        let mut sprites = self.world.query::<&mut AnimatedSprite>();
        for mut sprite in sprites.iter_mut(&mut self.world) {
            sprite.pause();
        }
        debug!("Window deactivated");
    }

    pub fn on_suspending(&mut self) {
        if self.is_active() {
            self.state = FrameState::Suspended;
            info!(
                "Suspended after {} frames ({:.1}s)",
                self.timer.frame_count(),
                self.timer.total_seconds()
            );
        }
    }

    pub fn on_resuming(&mut self) {
        if self.state == FrameState::Suspended {
            self.timer.reset_elapsed_time();
            self.state = self.resumed_state();
            info!("Resumed");
        }
    }

    /// Rebuild size-dependent state if the output size changed. Returns
    /// whether anything was rebuilt.
    pub fn on_window_size_changed(&mut self, width: i32, height: i32) -> bool {
        let current = self.world.get_resource::<ScreenSize>().copied();
        if current.is_some_and(|s| s.w == width && s.h == height) {
            return false;
        }
        game::create_window_size_dependent_resources(&mut self.world, width, height);
        info!("Window resized to {}x{}", width, height);
        true
    }

    /// True once the player asked to leave or the window is closing.
    pub fn exit_requested(&self) -> bool {
        self.world.contains_resource::<QuitRequested>() || self.device.should_close()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
