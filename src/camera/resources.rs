//! Camera domain: tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CameraTuning {
    /// Radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees
    pub pitch_limit: f32,
    pub distance: f32,
    pub spell_focus_distance: f32,
    /// Seconds to ease between mode distances
    pub transition_time: f32,
    /// Sideways offset over the shoulder
    pub shoulder_offset_x: f32,
    pub shoulder_offset_y: f32,
    pub offset_smooth_time: f32,
    /// Gap kept between the camera and an obstacle on the boom
    pub collision_offset: f32,
    /// Focus point height above the player origin
    pub focus_height: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            pitch_limit: 80.0,
            distance: 4.0,
            spell_focus_distance: 2.0,
            transition_time: 0.3,
            shoulder_offset_x: 1.0,
            shoulder_offset_y: 1.0,
            offset_smooth_time: 0.2,
            collision_offset: 0.3,
            focus_height: 0.6,
        }
    }
}
