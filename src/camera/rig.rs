//! Camera domain: orbit rig math.
//!
//! The rig orbits a focus point above the player. Casting pulls it in over
//! the shoulder; a held directional cast moves it to the player's eyes.

use bevy::prelude::*;

use crate::camera::resources::CameraTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    /// Casting session open
    SpellFocus,
    /// Holding a directional cast
    FirstPersonAim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shoulder {
    #[default]
    Left,
    Right,
}

impl Shoulder {
    pub fn swapped(self) -> Self {
        match self {
            Shoulder::Left => Shoulder::Right,
            Shoulder::Right => Shoulder::Left,
        }
    }

    fn sign(self) -> f32 {
        match self {
            Shoulder::Left => -1.0,
            Shoulder::Right => 1.0,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Radians around world up
    pub yaw: f32,
    /// Radians; negative looks down
    pub pitch: f32,
    pub mode: CameraMode,
    pub shoulder: Shoulder,
    /// Smoothed orbit distance
    pub distance: f32,
    /// Smoothed offset from the focus, in rig space
    pub offset: Vec3,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        let shoulder = Shoulder::default();
        Self {
            yaw: 0.0,
            pitch: -0.2,
            mode: CameraMode::ThirdPerson,
            shoulder,
            distance: tuning.distance,
            offset: Self::shoulder_offset(shoulder, CameraMode::ThirdPerson, tuning),
        }
    }

    pub fn rotate(&mut self, delta: Vec2, tuning: &CameraTuning) {
        let limit = tuning.pitch_limit.to_radians();
        self.yaw -= delta.x * tuning.mouse_sensitivity;
        self.pitch = (self.pitch - delta.y * tuning.mouse_sensitivity).clamp(-limit, limit);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn target_distance(&self, tuning: &CameraTuning) -> f32 {
        match self.mode {
            CameraMode::ThirdPerson => tuning.distance,
            CameraMode::SpellFocus => tuning.spell_focus_distance,
            CameraMode::FirstPersonAim => 0.0,
        }
    }

    fn shoulder_offset(shoulder: Shoulder, mode: CameraMode, tuning: &CameraTuning) -> Vec3 {
        match mode {
            CameraMode::FirstPersonAim => Vec3::ZERO,
            _ => Vec3::new(
                shoulder.sign() * tuning.shoulder_offset_x,
                tuning.shoulder_offset_y,
                0.0,
            ),
        }
    }

    /// Eases distance and shoulder offset toward the current mode's targets.
    pub fn settle(&mut self, dt: f32, tuning: &CameraTuning) {
        let distance_t = smoothing(dt, tuning.transition_time);
        let offset_t = smoothing(dt, tuning.offset_smooth_time);

        self.distance = self.distance.lerp(self.target_distance(tuning), distance_t);
        let target_offset = Self::shoulder_offset(self.shoulder, self.mode, tuning);
        self.offset = self.offset.lerp(target_offset, offset_t);
    }

    /// Unobstructed camera position for `focus`.
    pub fn desired_position(&self, focus: Vec3) -> Vec3 {
        focus + self.rotation() * (Vec3::Z * self.distance + self.offset)
    }
}

/// Frame-rate independent lerp factor reaching ~95% after `time` seconds.
fn smoothing(dt: f32, time: f32) -> f32 {
    if time <= 0.0 {
        return 1.0;
    }
    1.0 - (-3.0 * dt / time).exp()
}

/// Pulls the camera in front of an obstacle hit `hit_distance` along the boom.
pub fn resolve_collision(
    focus: Vec3,
    desired: Vec3,
    hit_distance: Option<f32>,
    collision_offset: f32,
) -> Vec3 {
    let boom = desired - focus;
    let Some(hit) = hit_distance else {
        return desired;
    };
    let length = boom.length();
    if length <= f32::EPSILON || hit >= length {
        return desired;
    }
    let direction = boom / length;
    focus + direction * (hit - collision_offset).max(0.0)
}
