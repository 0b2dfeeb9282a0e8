//! Movement domain: the per-tick locomotion state machine.
//!
//! `Locomotion::tick` is engine-free: the caller samples input, probes the
//! ground and wall, and hands over the stamina pool. The returned velocity is
//! what the physics body should move with this tick.

use bevy::prelude::*;

use crate::movement::resources::MovementTuning;
use crate::movement::state::{GroundContact, JumpState, PositionStatus, resolve_status};
use crate::stamina::{StaminaPool, StaminaTuning};

/// Locomotion input for one tick, already resolved to world space.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionInput {
    /// Desired horizontal direction (unit length or zero)
    pub move_direction: Vec3,
    pub sprint: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    /// Camera forward used to aim wall jumps
    pub camera_forward: Vec3,
}

/// Physics probe results for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceProbe {
    pub ground: Option<GroundContact>,
    /// Outward normal of a qualifying wall ahead of the character
    pub wall: Option<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    Charged,
    Wall,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEvent {
    StatusChanged {
        from: PositionStatus,
        to: PositionStatus,
    },
    Launched {
        kind: LaunchKind,
        velocity: Vec3,
    },
    /// Charge released without enough stamina; nothing happened
    JumpRefused { cost: f32 },
    /// Wall lost mid wall-slow; fell back to ordinary airborne physics
    WallLost,
    GlideStarted,
    GlideEnded,
}

#[derive(Debug, Clone, Default)]
pub struct LocomotionStep {
    pub velocity: Vec3,
    pub events: Vec<LocomotionEvent>,
}

/// Force and cost of a released charge jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeRelease {
    /// Normalized charge fraction
    pub t: f32,
    pub force: f32,
    pub cost: f32,
}

pub fn charge_release(charge: f32, tuning: &MovementTuning) -> ChargeRelease {
    let t = if tuning.max_jump_charge_time > 0.0 {
        (charge / tuning.max_jump_charge_time).clamp(0.0, 1.0)
    } else {
        1.0
    };
    ChargeRelease {
        t,
        force: tuning.min_jump_force.lerp(tuning.max_jump_force, t),
        cost: tuning.min_jump_stamina.lerp(tuning.max_jump_stamina, t),
    }
}

/// Launch direction off a wall.
///
/// Camera-forward is used as-is when it is within `max_angle` degrees of the
/// wall normal; otherwise the direction is rotated from the normal toward
/// camera-forward by `max_angle / angle` of the arc.
pub fn wall_jump_direction(camera_forward: Vec3, wall_normal: Vec3, max_angle: f32) -> Vec3 {
    let normal = wall_normal.normalize_or(Vec3::Y);
    let Some(forward) = camera_forward.try_normalize() else {
        return normal;
    };

    let angle = forward.angle_between(normal).to_degrees();
    if angle < max_angle {
        return forward;
    }

    let arc = Quat::from_rotation_arc(normal, forward);
    let blended = Quat::IDENTITY.slerp(arc, max_angle / angle) * normal;
    blended.normalize_or(normal)
}

/// Splits a launch impulse into (horizontal air velocity, vertical velocity).
fn split_launch(direction: Vec3, force: f32) -> (Vec3, f32) {
    let launch = direction * force;
    (Vec3::new(launch.x, 0.0, launch.z), launch.y)
}

/// Locomotion state owned by the character: position status, jump sub-state,
/// and the velocities integrated across ticks.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct Locomotion {
    pub status: PositionStatus,
    pub jump: JumpState,
    pub vertical_velocity: f32,
    /// Horizontal carry-over from launches, damped by air resistance
    pub air_velocity: Vec3,
    pub coyote_counter: f32,
    pub slide_direction: Vec3,
    /// Ground movement suppressed (e.g. while casting)
    pub locked: bool,
}

impl Locomotion {
    pub fn new() -> Self {
        Self {
            vertical_velocity: -1.0,
            ..default()
        }
    }

    /// Runs one tick: status, ground movement, sliding, jump, gravity.
    pub fn tick(
        &mut self,
        input: &LocomotionInput,
        probe: &SurfaceProbe,
        mut stamina: Option<&mut StaminaPool>,
        tuning: &MovementTuning,
        costs: &StaminaTuning,
        dt: f32,
    ) -> LocomotionStep {
        let mut events = Vec::new();

        self.update_status(probe, tuning, dt, &mut events);
        let mut velocity = self.ground_velocity(input, stamina.as_deref_mut(), tuning, costs, dt);
        if self.status == PositionStatus::Sliding {
            velocity += self.slide_direction * tuning.slide_speed;
        }
        self.handle_jump(input, probe, stamina, tuning, dt, &mut events);
        self.integrate_gravity(tuning, dt);

        velocity += self.air_velocity + Vec3::Y * self.vertical_velocity;
        LocomotionStep { velocity, events }
    }

    fn update_status(
        &mut self,
        probe: &SurfaceProbe,
        tuning: &MovementTuning,
        dt: f32,
        events: &mut Vec<LocomotionEvent>,
    ) {
        let previous = self.status;
        let update = resolve_status(
            previous,
            probe.ground,
            self.vertical_velocity,
            self.coyote_counter,
            dt,
            tuning,
        );
        self.status = update.status;
        self.coyote_counter = update.coyote_counter;
        self.slide_direction = update.slide_direction;

        if previous != self.status {
            events.push(LocomotionEvent::StatusChanged {
                from: previous,
                to: self.status,
            });
        }

        // Sub-states that do not belong to the new status end here
        if !self.jump.allowed_in(self.status) {
            if self.jump == JumpState::Glide {
                events.push(LocomotionEvent::GlideEnded);
            }
            self.jump = JumpState::None;
        }
    }

    fn ground_velocity(
        &self,
        input: &LocomotionInput,
        stamina: Option<&mut StaminaPool>,
        tuning: &MovementTuning,
        costs: &StaminaTuning,
        dt: f32,
    ) -> Vec3 {
        if self.locked || input.move_direction.length_squared() < 0.01 {
            return Vec3::ZERO;
        }

        let direction = input.move_direction.normalize_or_zero();
        let mut speed = tuning.move_speed;
        if input.sprint {
            if let Some(pool) = stamina {
                if pool.can_use(costs.sprint_gate) && pool.try_use(costs.sprint_cost * dt) {
                    speed = tuning.sprint_speed;
                }
            }
        }
        direction * speed
    }

    fn handle_jump(
        &mut self,
        input: &LocomotionInput,
        probe: &SurfaceProbe,
        stamina: Option<&mut StaminaPool>,
        tuning: &MovementTuning,
        dt: f32,
        events: &mut Vec<LocomotionEvent>,
    ) {
        match self.status {
            PositionStatus::Grounded | PositionStatus::CoyoteTime => {
                self.handle_charge(input, probe, stamina, tuning, dt, events)
            }
            PositionStatus::Midair => self.handle_airborne(input, probe, tuning, dt, events),
            PositionStatus::Sliding => {
                if input.jump_released {
                    let normal = probe.ground.map(|g| g.normal).unwrap_or(Vec3::Y);
                    let (air, vertical) = split_launch(normal, tuning.slide_jump_force);
                    self.launch(air, vertical, LaunchKind::Slide, events);
                }
                self.jump = JumpState::None;
            }
        }
    }

    fn handle_charge(
        &mut self,
        input: &LocomotionInput,
        probe: &SurfaceProbe,
        stamina: Option<&mut StaminaPool>,
        tuning: &MovementTuning,
        dt: f32,
        events: &mut Vec<LocomotionEvent>,
    ) {
        // Without a stamina pool there is nothing to pay with
        let Some(pool) = stamina else {
            self.jump = JumpState::None;
            return;
        };

        if input.jump_pressed && pool.can_use(tuning.min_jump_stamina) {
            self.jump = JumpState::Charging { charge: 0.0 };
        }

        let JumpState::Charging { charge } = self.jump else {
            return;
        };

        let charge = if input.jump_held {
            (charge + dt).min(tuning.max_jump_charge_time)
        } else {
            charge
        };
        self.jump = JumpState::Charging { charge };

        if !input.jump_released {
            return;
        }

        let release = charge_release(charge, tuning);
        if pool.try_use(release.cost) {
            let normal = probe.ground.map(|g| g.normal).unwrap_or(Vec3::Y);
            let (air, vertical) = split_launch(normal, release.force);
            self.launch(air, vertical, LaunchKind::Charged, events);
        } else {
            events.push(LocomotionEvent::JumpRefused { cost: release.cost });
        }
        // Charge is spent whether or not the jump happened
        self.jump = JumpState::None;
    }

    fn handle_airborne(
        &mut self,
        input: &LocomotionInput,
        probe: &SurfaceProbe,
        tuning: &MovementTuning,
        dt: f32,
        events: &mut Vec<LocomotionEvent>,
    ) {
        if input.jump_pressed {
            self.jump = match (self.jump, probe.wall) {
                (JumpState::WallReady { .. } | JumpState::WallSlow { .. }, _) => self.jump,
                (_, Some(normal)) => {
                    if self.jump == JumpState::Glide {
                        events.push(LocomotionEvent::GlideEnded);
                    }
                    JumpState::WallReady { normal }
                }
                (JumpState::Glide, None) => {
                    events.push(LocomotionEvent::GlideEnded);
                    JumpState::None
                }
                (_, None) => {
                    events.push(LocomotionEvent::GlideStarted);
                    JumpState::Glide
                }
            };
        }

        if self.jump.wall_normal().is_none() {
            return;
        }
        let Some(normal) = probe.wall else {
            events.push(LocomotionEvent::WallLost);
            self.jump = JumpState::None;
            return;
        };

        if input.jump_released {
            let direction =
                wall_jump_direction(input.camera_forward, normal, tuning.wall_jump_max_angle);
            let air = Vec3::new(direction.x, 0.0, direction.z) * tuning.wall_jump_force;
            self.launch(air, tuning.wall_jump_force, LaunchKind::Wall, events);
            self.jump = JumpState::None;
            return;
        }

        self.jump = match self.jump {
            JumpState::WallReady { .. } if input.jump_held => JumpState::WallSlow {
                normal,
                elapsed: dt,
            },
            JumpState::WallSlow { elapsed, .. } if input.jump_held => JumpState::WallSlow {
                normal,
                elapsed: elapsed + dt,
            },
            _ => JumpState::WallReady { normal },
        };
    }

    fn launch(
        &mut self,
        air_velocity: Vec3,
        vertical_velocity: f32,
        kind: LaunchKind,
        events: &mut Vec<LocomotionEvent>,
    ) {
        self.air_velocity = air_velocity;
        self.vertical_velocity = vertical_velocity;
        events.push(LocomotionEvent::Launched {
            kind,
            velocity: air_velocity + Vec3::Y * vertical_velocity,
        });
    }

    fn integrate_gravity(&mut self, tuning: &MovementTuning, dt: f32) {
        let multiplier = if self.vertical_velocity > 0.0 {
            tuning.gravity_multiplier
        } else {
            tuning.fall_gravity_multiplier
        };
        self.vertical_velocity -= tuning.gravity * multiplier * dt;

        match self.jump {
            JumpState::Glide => {
                self.vertical_velocity = self.vertical_velocity.max(-tuning.glide_fall_speed);
            }
            JumpState::WallSlow { elapsed, .. } if elapsed <= tuning.wall_slow_time => {
                self.vertical_velocity = self.vertical_velocity.max(-tuning.wall_slow_fall_speed);
            }
            _ => {}
        }

        self.air_velocity *= (-tuning.air_resistance * dt).exp();

        let on_surface = matches!(
            self.status,
            PositionStatus::Grounded | PositionStatus::Sliding
        );
        if on_surface && self.vertical_velocity < 0.0 {
            self.vertical_velocity = tuning.grounded_stick_velocity;
            self.air_velocity = Vec3::ZERO;
        }
    }
}
