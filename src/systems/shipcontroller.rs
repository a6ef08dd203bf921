//! Keyboard-to-motion mapping for the player ship.
//!
//! The mapping is split into small pure functions so each step can be checked
//! on its own:
//! 1. [`compute_movement`] – held direction keys to a displacement vector
//! 2. [`apply_rotation`] – rotate the vector by the ship's heading
//! 3. [`clamp_position`] – keep the result inside a [`BoundsClamp`]
//!
//! [`ship_controller`] chains them for every [`InputControlled`] entity, and
//! [`exit_on_back`] turns the back key into a [`QuitRequested`] marker.
//!
//! Movement is a fixed displacement per update, not scaled by elapsed time.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::inputcontrolled::{BoundsClamp, InputControlled};
use crate::components::mapposition::MapPosition;
use crate::resources::input::InputState;
use crate::resources::quit::QuitRequested;

/// Displacement for the held direction keys, `speed` per active axis.
///
/// Opposite keys cancel out. Diagonals are not normalized here.
pub fn compute_movement(input: &InputState, speed: f32) -> Vector2 {
    let mut movement = Vector2 { x: 0.0, y: 0.0 };
    if input.maindirection_up.active {
        movement.y -= speed;
    }
    if input.maindirection_right.active {
        movement.x += speed;
    }
    if input.maindirection_left.active {
        movement.x -= speed;
    }
    if input.maindirection_down.active {
        movement.y += speed;
    }
    movement
}

/// Rotate `vector` by `angle` radians. An angle of zero returns it unchanged.
pub fn apply_rotation(vector: Vector2, angle: f32) -> Vector2 {
    if angle == 0.0 {
        return vector;
    }
    let (sin, cos) = angle.sin_cos();
    Vector2 {
        x: vector.x * cos - vector.y * sin,
        y: vector.x * sin + vector.y * cos,
    }
}

/// Clamp `position` componentwise into `clamp`.
///
/// The upper bound is applied first, then the lower one, so a degenerate
/// clamp with `min > max` resolves to `min`.
pub fn clamp_position(position: Vector2, clamp: &BoundsClamp) -> Vector2 {
    Vector2 {
        x: position.x.min(clamp.max.x).max(clamp.min.x),
        y: position.y.min(clamp.max.y).max(clamp.min.y),
    }
}

/// Whether the player is holding the back key.
pub fn is_exit_requested(input: &InputState) -> bool {
    input.action_back.active
}

/// Move every input-controlled entity and keep it inside its clamp.
pub fn ship_controller(
    mut query: Query<(&InputControlled, &mut MapPosition, Option<&BoundsClamp>)>,
    input: Res<InputState>,
) {
    for (control, mut position, clamp) in query.iter_mut() {
        let mut movement = compute_movement(&input, control.speed);
        if control.normalize_diagonal && movement.x != 0.0 && movement.y != 0.0 {
            movement.x *= std::f32::consts::FRAC_1_SQRT_2;
            movement.y *= std::f32::consts::FRAC_1_SQRT_2;
        }
        let movement = apply_rotation(movement, control.heading);

        let mut next = Vector2 {
            x: position.pos.x + movement.x,
            y: position.pos.y + movement.y,
        };
        if let Some(clamp) = clamp {
            next = clamp_position(next, clamp);
        }
        position.pos = next;
    }
}

/// Request shutdown while the back key is held.
pub fn exit_on_back(input: Res<InputState>, mut commands: Commands) {
    if is_exit_requested(&input) {
        commands.insert_resource(QuitRequested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &str) -> InputState {
        let mut input = InputState::default();
        for key in keys.chars() {
            match key {
                'w' => input.maindirection_up.active = true,
                'a' => input.maindirection_left.active = true,
                's' => input.maindirection_down.active = true,
                'd' => input.maindirection_right.active = true,
                _ => {}
            }
        }
        input
    }

    #[test]
    fn single_keys_map_to_axes() {
        assert_eq!(compute_movement(&held("w"), 2.0), Vector2 { x: 0.0, y: -2.0 });
        assert_eq!(compute_movement(&held("s"), 2.0), Vector2 { x: 0.0, y: 2.0 });
        assert_eq!(compute_movement(&held("a"), 2.0), Vector2 { x: -2.0, y: 0.0 });
        assert_eq!(compute_movement(&held("d"), 2.0), Vector2 { x: 2.0, y: 0.0 });
        assert_eq!(compute_movement(&held(""), 2.0), Vector2 { x: 0.0, y: 0.0 });
    }

    #[test]
    fn diagonal_is_not_normalized() {
        assert_eq!(compute_movement(&held("wd"), 2.0), Vector2 { x: 2.0, y: -2.0 });
    }

    #[test]
    fn opposite_keys_cancel() {
        assert_eq!(compute_movement(&held("ad"), 2.0), Vector2 { x: 0.0, y: 0.0 });
        assert_eq!(compute_movement(&held("ws"), 2.0), Vector2 { x: 0.0, y: 0.0 });
    }

    #[test]
    fn zero_rotation_is_identity() {
        let v = Vector2 { x: 2.0, y: -2.0 };
        assert_eq!(apply_rotation(v, 0.0), v);
    }

    #[test]
    fn quarter_turn_rotates_axes() {
        let r = apply_rotation(Vector2 { x: 2.0, y: 0.0 }, std::f32::consts::FRAC_PI_2);
        assert!(r.x.abs() < 1e-5);
        assert!((r.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_keeps_position_inside() {
        let clamp = BoundsClamp::from_bounds(Vector2 { x: 800.0, y: 600.0 });
        let low = clamp_position(Vector2 { x: -50.0, y: 0.0 }, &clamp);
        assert_eq!(low, clamp.min);
        let high = clamp_position(Vector2 { x: 5000.0, y: 5000.0 }, &clamp);
        assert_eq!(high, clamp.max);
        let inside = Vector2 { x: 400.0, y: 300.0 };
        assert_eq!(clamp_position(inside, &clamp), inside);
    }

    #[test]
    fn exit_follows_back_key() {
        let mut input = InputState::default();
        assert!(!is_exit_requested(&input));
        input.action_back.active = true;
        assert!(is_exit_requested(&input));
    }

    #[test]
    fn system_normalizes_when_asked() {
        let mut world = World::new();
        world.insert_resource(held("wd"));
        let ship = world
            .spawn((
                InputControlled::new(2.0).with_normalized_diagonal(true),
                MapPosition::new(100.0, 100.0),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(ship_controller);
        schedule.run(&mut world);

        let pos = world.get::<MapPosition>(ship).unwrap().pos;
        let step = 2.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((pos.x - (100.0 + step)).abs() < 1e-4);
        assert!((pos.y - (100.0 - step)).abs() < 1e-4);
    }

    #[test]
    fn back_key_inserts_quit_marker() {
        let mut world = World::new();
        let mut input = InputState::default();
        input.action_back.active = true;
        world.insert_resource(input);
        let mut schedule = Schedule::default();
        schedule.add_systems(exit_on_back);
        schedule.run(&mut world);
        assert!(world.contains_resource::<QuitRequested>());
    }
}
