//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Defaults use WASD for movement
//! and Escape to quit. The snapshot is rewritten every frame by the
//! [`InputSource`](crate::backend::InputSource) and never carries intent from
//! one frame into the next.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Record this frame's key-down flag, deriving the edge flags from the
    /// previous frame.
    pub fn set_down(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    pub action_back: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound_to(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound_to(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound_to(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound_to(KeyboardKey::KEY_D),
            action_back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
        }
    }
}

impl InputState {
    /// Mutable access to every bound action, for sources that poll by binding.
    pub fn actions_mut(&mut self) -> [&mut BoolState; 5] {
        [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.action_back,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.maindirection_left.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.maindirection_down.key_binding, KeyboardKey::KEY_S);
        assert_eq!(input.maindirection_right.key_binding, KeyboardKey::KEY_D);
        assert_eq!(input.action_back.key_binding, KeyboardKey::KEY_ESCAPE);
    }

    #[test]
    fn test_set_down_tracks_edges() {
        let mut bs = BoolState::bound_to(KeyboardKey::KEY_D);
        bs.set_down(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.set_down(true);
        assert!(bs.active && !bs.just_pressed);
        bs.set_down(false);
        assert!(!bs.active && bs.just_released);
        bs.set_down(false);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_actions_mut_covers_all_bindings() {
        let mut input = InputState::default();
        for action in input.actions_mut() {
            action.set_down(true);
        }
        assert!(input.maindirection_up.active);
        assert!(input.maindirection_left.active);
        assert!(input.maindirection_down.active);
        assert!(input.maindirection_right.active);
        assert!(input.action_back.active);
    }
}
