//! Movement domain: position status and jump sub-state, plus the pure
//! status transition function.

use bevy::prelude::*;

use crate::movement::resources::MovementTuning;

/// Where the character is relative to walkable ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PositionStatus {
    #[default]
    Grounded,
    /// Ground contact was lost recently; jumping is still allowed
    CoyoteTime,
    Midair,
    /// Standing on a surface steeper than the max slope
    Sliding,
}

impl PositionStatus {
    /// Statuses from which a charge jump may start.
    pub fn can_charge_jump(self) -> bool {
        matches!(self, PositionStatus::Grounded | PositionStatus::CoyoteTime)
    }
}

/// Jump sub-behavior. At most one is active, and each variant is only valid
/// under specific position statuses (see `JumpState::allowed_in`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JumpState {
    #[default]
    None,
    /// Jump key held on the ground, accumulating charge seconds
    Charging { charge: f32 },
    /// Airborne next to a wall, jump pressed
    WallReady { normal: Vec3 },
    /// Jump held against a wall; descent is slowed for a short window
    WallSlow { normal: Vec3, elapsed: f32 },
    Glide,
}

impl JumpState {
    pub fn allowed_in(&self, status: PositionStatus) -> bool {
        match self {
            JumpState::None => true,
            JumpState::Charging { .. } => status.can_charge_jump(),
            JumpState::WallReady { .. } | JumpState::WallSlow { .. } | JumpState::Glide => {
                status == PositionStatus::Midair
            }
        }
    }

    pub fn wall_normal(&self) -> Option<Vec3> {
        match self {
            JumpState::WallReady { normal } | JumpState::WallSlow { normal, .. } => Some(*normal),
            _ => None,
        }
    }
}

/// Ground probe result for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub normal: Vec3,
    /// Angle between the surface normal and world up, in degrees
    pub slope_angle: f32,
}

impl GroundContact {
    pub fn from_normal(normal: Vec3) -> Self {
        let normal = normal.normalize_or(Vec3::Y);
        Self {
            normal,
            slope_angle: slope_angle(normal),
        }
    }
}

/// Result of resolving the position status for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusUpdate {
    pub status: PositionStatus,
    pub coyote_counter: f32,
    pub slide_direction: Vec3,
}

pub fn slope_angle(normal: Vec3) -> f32 {
    normal.angle_between(Vec3::Y).to_degrees()
}

/// Downhill direction along a surface: world down projected onto the surface plane.
pub fn downslope_direction(normal: Vec3) -> Vec3 {
    Vec3::NEG_Y.reject_from(normal).normalize_or_zero()
}

/// Computes the next position status from this tick's ground contact.
///
/// Pure: identical inputs always give identical outputs.
pub fn resolve_status(
    previous: PositionStatus,
    ground: Option<GroundContact>,
    vertical_velocity: f32,
    coyote_counter: f32,
    dt: f32,
    tuning: &MovementTuning,
) -> StatusUpdate {
    let airborne = |coyote_counter| StatusUpdate {
        status: PositionStatus::Midair,
        coyote_counter,
        slide_direction: Vec3::ZERO,
    };

    if let Some(contact) = ground {
        // Still touching ground on the launch tick of a jump
        if vertical_velocity > 0.0 {
            return airborne(0.0);
        }
        if contact.slope_angle > tuning.max_slope_angle {
            return StatusUpdate {
                status: PositionStatus::Sliding,
                coyote_counter: 0.0,
                slide_direction: downslope_direction(contact.normal),
            };
        }
        return StatusUpdate {
            status: PositionStatus::Grounded,
            coyote_counter: 0.0,
            slide_direction: Vec3::ZERO,
        };
    }

    // Left the ground by jumping: no grace window
    if vertical_velocity > 0.0 {
        return airborne(0.0);
    }

    match previous {
        PositionStatus::Grounded => StatusUpdate {
            status: PositionStatus::CoyoteTime,
            coyote_counter: 0.0,
            slide_direction: Vec3::ZERO,
        },
        PositionStatus::CoyoteTime if coyote_counter > tuning.coyote_time => airborne(0.0),
        PositionStatus::CoyoteTime => StatusUpdate {
            status: PositionStatus::CoyoteTime,
            coyote_counter: coyote_counter + dt,
            slide_direction: Vec3::ZERO,
        },
        PositionStatus::Midair | PositionStatus::Sliding => airborne(0.0),
    }
}
