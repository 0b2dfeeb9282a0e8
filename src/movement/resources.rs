//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub sprint_speed: f32,
    /// Yaw slerp rate toward the move direction
    pub rotation_speed: f32,
    /// Degrees; steeper ground makes the character slide
    pub max_slope_angle: f32,
    pub slide_speed: f32,
    /// Magnitude of world gravity (applied downward)
    pub gravity: f32,
    /// Gravity scale while ascending
    pub gravity_multiplier: f32,
    /// Gravity scale while descending
    pub fall_gravity_multiplier: f32,
    /// Exponential decay rate of horizontal air velocity
    pub air_resistance: f32,
    pub coyote_time: f32,
    /// Vertical velocity held while grounded to keep contact stable
    pub grounded_stick_velocity: f32,
    pub ground_check_distance: f32,
    pub ground_check_radius: f32,

    // Charge jump
    pub max_jump_charge_time: f32,
    pub min_jump_force: f32,
    pub max_jump_force: f32,
    pub min_jump_stamina: f32,
    pub max_jump_stamina: f32,

    // Wall jump
    pub wall_jump_force: f32,
    /// Degrees; camera-forward beyond this angle from the wall normal is blended back
    pub wall_jump_max_angle: f32,
    pub wall_check_radius: f32,
    /// Wall normals within this many degrees of straight up/down are not walls
    pub wall_min_tilt: f32,
    pub wall_slow_time: f32,
    pub wall_slow_fall_speed: f32,

    pub glide_fall_speed: f32,
    pub slide_jump_force: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_speed: 8.0,
            rotation_speed: 10.0,
            max_slope_angle: 45.0,
            slide_speed: 5.0,
            gravity: 9.81,
            gravity_multiplier: 1.0,
            fall_gravity_multiplier: 1.5,
            air_resistance: 0.5,
            coyote_time: 0.1,
            grounded_stick_velocity: -2.0,
            ground_check_distance: 0.4,
            ground_check_radius: 0.4,
            max_jump_charge_time: 1.0,
            min_jump_force: 8.0,
            max_jump_force: 16.0,
            min_jump_stamina: 20.0,
            max_jump_stamina: 40.0,
            wall_jump_force: 10.0,
            wall_jump_max_angle: 60.0,
            wall_check_radius: 1.0,
            wall_min_tilt: 10.0,
            wall_slow_time: 0.5,
            wall_slow_fall_speed: 1.0,
            glide_fall_speed: 2.0,
            slide_jump_force: 10.0,
        }
    }
}

/// Raw per-frame locomotion input, sampled before the movement tick.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// Local stick axis: x = strafe right, y = forward
    pub axis: Vec2,
    pub sprint_held: bool,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub jump_just_released: bool,
}
