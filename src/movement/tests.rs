//! Movement domain: unit tests for status transitions and jump mechanics.

use bevy::prelude::*;

use super::{
    GroundContact, JumpState, LaunchKind, Locomotion, LocomotionEvent, LocomotionInput,
    MovementTuning, PositionStatus, SurfaceProbe, charge_release, is_wall_normal, resolve_status,
    wall_jump_direction,
};
use crate::stamina::{StaminaPool, StaminaTuning};

const EPS: f32 = 1e-4;

fn flat() -> SurfaceProbe {
    SurfaceProbe {
        ground: Some(GroundContact::from_normal(Vec3::Y)),
        wall: None,
    }
}

fn airborne() -> SurfaceProbe {
    SurfaceProbe::default()
}

fn steep(degrees: f32) -> GroundContact {
    let radians = degrees.to_radians();
    GroundContact::from_normal(Vec3::new(radians.sin(), radians.cos(), 0.0))
}

fn tilted(degrees: f32) -> SurfaceProbe {
    SurfaceProbe {
        ground: Some(steep(degrees)),
        wall: None,
    }
}

fn pool() -> StaminaPool {
    StaminaPool::new(100.0, 10.0, 1.0)
}

fn midair() -> Locomotion {
    Locomotion {
        status: PositionStatus::Midair,
        vertical_velocity: -1.0,
        ..Locomotion::new()
    }
}

fn press() -> LocomotionInput {
    LocomotionInput {
        jump_pressed: true,
        jump_held: true,
        ..default()
    }
}

fn hold() -> LocomotionInput {
    LocomotionInput {
        jump_held: true,
        ..default()
    }
}

fn release() -> LocomotionInput {
    LocomotionInput {
        jump_released: true,
        ..default()
    }
}

fn launched(events: &[LocomotionEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, LocomotionEvent::Launched { .. }))
}

#[test]
fn test_resolve_status_is_deterministic() {
    let tuning = MovementTuning::default();
    let cases = [
        (PositionStatus::Grounded, None, -2.0, 0.0),
        (PositionStatus::CoyoteTime, None, -1.0, 0.05),
        (PositionStatus::Midair, Some(steep(60.0)), -3.0, 0.0),
        (PositionStatus::Sliding, Some(steep(10.0)), 4.0, 0.0),
    ];
    for (previous, ground, vv, counter) in cases {
        let first = resolve_status(previous, ground, vv, counter, 0.016, &tuning);
        let second = resolve_status(previous, ground, vv, counter, 0.016, &tuning);
        assert_eq!(first, second);
    }
}

#[test]
fn test_losing_ground_enters_coyote_time() {
    let tuning = MovementTuning::default();
    let update = resolve_status(PositionStatus::Grounded, None, -2.0, 0.0, 0.016, &tuning);
    assert_eq!(update.status, PositionStatus::CoyoteTime);
    assert_eq!(update.coyote_counter, 0.0);

    let update = resolve_status(PositionStatus::CoyoteTime, None, -2.0, 0.05, 0.02, &tuning);
    assert_eq!(update.status, PositionStatus::CoyoteTime);
    assert!((update.coyote_counter - 0.07).abs() < EPS);
}

#[test]
fn test_coyote_time_expires_into_midair() {
    let tuning = MovementTuning::default();
    let update = resolve_status(PositionStatus::CoyoteTime, None, -2.0, 0.15, 0.016, &tuning);
    assert_eq!(update.status, PositionStatus::Midair);
    assert_eq!(update.coyote_counter, 0.0);
}

#[test]
fn test_coyote_time_regains_ground() {
    let tuning = MovementTuning::default();
    let ground = Some(GroundContact::from_normal(Vec3::Y));
    let update = resolve_status(PositionStatus::CoyoteTime, ground, -2.0, 0.05, 0.016, &tuning);
    assert_eq!(update.status, PositionStatus::Grounded);
    assert_eq!(update.coyote_counter, 0.0);
}

#[test]
fn test_launch_with_contact_is_midair() {
    let tuning = MovementTuning::default();
    let ground = Some(GroundContact::from_normal(Vec3::Y));
    let update = resolve_status(PositionStatus::Grounded, ground, 12.0, 0.0, 0.016, &tuning);
    assert_eq!(update.status, PositionStatus::Midair);
}

#[test]
fn test_steep_ground_slides_downhill() {
    let tuning = MovementTuning::default();
    let contact = steep(60.0);
    let update = resolve_status(PositionStatus::Grounded, Some(contact), -2.0, 0.0, 0.016, &tuning);

    assert_eq!(update.status, PositionStatus::Sliding);
    let direction = update.slide_direction;
    assert!((direction.length() - 1.0).abs() < EPS);
    assert!(direction.y < 0.0);
    assert!(direction.x > 0.0);
    assert!(direction.dot(contact.normal).abs() < EPS);
}

#[test]
fn test_sliding_adds_downhill_velocity() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let probe = SurfaceProbe {
        ground: Some(steep(60.0)),
        wall: None,
    };

    let step = locomotion.tick(&LocomotionInput::default(), &probe, None, &tuning, &costs, 0.016);
    assert_eq!(locomotion.status, PositionStatus::Sliding);
    assert!(step.velocity.x > 0.0);
    assert_eq!(locomotion.vertical_velocity, tuning.grounded_stick_velocity);
}

#[test]
fn test_charge_release_interpolates_force_and_cost() {
    let tuning = MovementTuning::default();
    let release = charge_release(0.5, &tuning);
    assert!((release.t - 0.5).abs() < EPS);
    assert!((release.force - 12.0).abs() < EPS);
    assert!((release.cost - 30.0).abs() < EPS);

    let overcharged = charge_release(5.0, &tuning);
    assert_eq!(overcharged.t, 1.0);
    assert_eq!(overcharged.force, tuning.max_jump_force);
}

#[test]
fn test_half_charge_jump_launches_and_pays() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();

    locomotion.tick(&press(), &flat(), Some(&mut stamina), &tuning, &costs, 0.0);
    assert_eq!(locomotion.jump, JumpState::Charging { charge: 0.0 });

    for _ in 0..2 {
        locomotion.tick(&hold(), &flat(), Some(&mut stamina), &tuning, &costs, 0.25);
    }
    assert_eq!(locomotion.jump, JumpState::Charging { charge: 0.5 });

    let step = locomotion.tick(&release(), &flat(), Some(&mut stamina), &tuning, &costs, 0.0);
    assert!((step.velocity.y - 12.0).abs() < EPS);
    assert!((stamina.current() - 70.0).abs() < EPS);
    assert_eq!(locomotion.jump, JumpState::None);
    assert!(step.events.contains(&LocomotionEvent::Launched {
        kind: LaunchKind::Charged,
        velocity: Vec3::new(0.0, 12.0, 0.0),
    }));
}

#[test]
fn test_charge_jump_on_slope_launches_along_surface_normal() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();
    let ground = tilted(30.0);

    locomotion.tick(&press(), &ground, Some(&mut stamina), &tuning, &costs, 0.0);
    assert_eq!(locomotion.status, PositionStatus::Grounded);
    for _ in 0..2 {
        locomotion.tick(&hold(), &ground, Some(&mut stamina), &tuning, &costs, 0.25);
    }
    let step = locomotion.tick(&release(), &ground, Some(&mut stamina), &tuning, &costs, 0.0);

    let normal = Vec3::new(30f32.to_radians().sin(), 30f32.to_radians().cos(), 0.0);
    let expected = normal * 12.0;
    let launched = step
        .events
        .iter()
        .find_map(|event| match event {
            LocomotionEvent::Launched {
                kind: LaunchKind::Charged,
                velocity,
            } => Some(*velocity),
            _ => None,
        })
        .expect("charged launch");
    assert!((launched - expected).length() < EPS);
    assert!((locomotion.air_velocity - Vec3::new(expected.x, 0.0, expected.z)).length() < EPS);
    assert!((locomotion.vertical_velocity - 12.0 * 30f32.to_radians().cos()).abs() < EPS);
    assert!(locomotion.air_velocity.x > 0.0);
}

#[test]
fn test_unaffordable_charge_jump_does_nothing() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();
    assert!(stamina.try_use(75.0));

    locomotion.tick(&press(), &flat(), Some(&mut stamina), &tuning, &costs, 0.0);
    for _ in 0..2 {
        locomotion.tick(&hold(), &flat(), Some(&mut stamina), &tuning, &costs, 0.25);
    }
    let step = locomotion.tick(&release(), &flat(), Some(&mut stamina), &tuning, &costs, 0.0);

    assert!(!launched(&step.events));
    assert!(step.events.contains(&LocomotionEvent::JumpRefused { cost: 30.0 }));
    assert_eq!(locomotion.jump, JumpState::None);
    assert_eq!(locomotion.status, PositionStatus::Grounded);
    assert_eq!(step.velocity.y, tuning.grounded_stick_velocity);
    assert_eq!(stamina.current(), 25.0);
}

#[test]
fn test_charge_needs_minimum_stamina_to_start() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();
    assert!(stamina.try_use(90.0));

    locomotion.tick(&press(), &flat(), Some(&mut stamina), &tuning, &costs, 0.1);
    assert_eq!(locomotion.jump, JumpState::None);
}

#[test]
fn test_coyote_jump_launches_straight_up() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();

    locomotion.tick(&press(), &airborne(), Some(&mut stamina), &tuning, &costs, 0.0);
    assert_eq!(locomotion.status, PositionStatus::CoyoteTime);
    assert!(matches!(locomotion.jump, JumpState::Charging { .. }));

    let step = locomotion.tick(&release(), &airborne(), Some(&mut stamina), &tuning, &costs, 0.0);
    assert!((step.velocity.y - tuning.min_jump_force).abs() < EPS);
    assert_eq!(step.velocity.x, 0.0);
    assert_eq!(step.velocity.z, 0.0);
}

#[test]
fn test_falling_off_discards_charge() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut stamina = pool();
    let mut locomotion = Locomotion {
        status: PositionStatus::CoyoteTime,
        coyote_counter: 0.2,
        jump: JumpState::Charging { charge: 0.3 },
        ..Locomotion::new()
    };

    locomotion.tick(&hold(), &airborne(), Some(&mut stamina), &tuning, &costs, 0.016);
    assert_eq!(locomotion.status, PositionStatus::Midair);
    assert_eq!(locomotion.jump, JumpState::None);
    assert_eq!(stamina.current(), 100.0);
}

#[test]
fn test_glide_caps_fall_speed() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion {
        vertical_velocity: -5.0,
        ..midair()
    };

    let step = locomotion.tick(&press(), &airborne(), None, &tuning, &costs, 0.1);
    assert_eq!(locomotion.jump, JumpState::Glide);
    assert!(step.events.contains(&LocomotionEvent::GlideStarted));
    assert_eq!(step.velocity.y, -tuning.glide_fall_speed);

    for _ in 0..10 {
        let step = locomotion.tick(&hold(), &airborne(), None, &tuning, &costs, 0.1);
        assert!(step.velocity.y >= -tuning.glide_fall_speed);
    }

    let step = locomotion.tick(&press(), &airborne(), None, &tuning, &costs, 0.1);
    assert_eq!(locomotion.jump, JumpState::None);
    assert!(step.events.contains(&LocomotionEvent::GlideEnded));
}

#[test]
fn test_landing_ends_glide() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion {
        jump: JumpState::Glide,
        vertical_velocity: -2.0,
        ..midair()
    };

    let step = locomotion.tick(&LocomotionInput::default(), &flat(), None, &tuning, &costs, 0.016);
    assert_eq!(locomotion.status, PositionStatus::Grounded);
    assert_eq!(locomotion.jump, JumpState::None);
    assert!(step.events.contains(&LocomotionEvent::GlideEnded));
}

#[test]
fn test_wall_press_enters_wall_states() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = midair();
    let wall = SurfaceProbe {
        ground: None,
        wall: Some(Vec3::X),
    };

    let tap = LocomotionInput {
        jump_pressed: true,
        ..default()
    };
    locomotion.tick(&tap, &wall, None, &tuning, &costs, 0.016);
    assert_eq!(locomotion.jump, JumpState::WallReady { normal: Vec3::X });

    locomotion.tick(&hold(), &wall, None, &tuning, &costs, 0.1);
    assert!(matches!(locomotion.jump, JumpState::WallSlow { .. }));
    assert!(locomotion.vertical_velocity >= -tuning.wall_slow_fall_speed);
}

#[test]
fn test_losing_wall_cancels_without_impulse() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion {
        jump: JumpState::WallReady { normal: Vec3::X },
        ..midair()
    };

    let step = locomotion.tick(&release(), &airborne(), None, &tuning, &costs, 0.016);
    assert_eq!(locomotion.jump, JumpState::None);
    assert!(step.events.contains(&LocomotionEvent::WallLost));
    assert!(!launched(&step.events));
    assert_eq!(locomotion.air_velocity, Vec3::ZERO);
    assert!(step.velocity.y < 0.0);
}

#[test]
fn test_wall_jump_uses_camera_forward_within_limit() {
    let forward = Vec3::new(1.0, 0.0, 1.0).normalize();
    let direction = wall_jump_direction(forward, Vec3::X, 60.0);
    assert!(direction.distance(forward) < EPS);
}

#[test]
fn test_wall_jump_blends_steep_camera_angle() {
    let direction = wall_jump_direction(Vec3::Z, Vec3::X, 60.0);
    let angle = direction.angle_between(Vec3::X).to_degrees();
    assert!((angle - 60.0).abs() < 0.01);
    assert!(direction.z > 0.0);
    assert!(direction.y.abs() < EPS);
}

#[test]
fn test_wall_jump_release_launches_off_wall() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion {
        jump: JumpState::WallReady { normal: Vec3::X },
        ..midair()
    };
    let wall = SurfaceProbe {
        ground: None,
        wall: Some(Vec3::X),
    };
    let input = LocomotionInput {
        jump_released: true,
        camera_forward: Vec3::Z,
        ..default()
    };

    let step = locomotion.tick(&input, &wall, None, &tuning, &costs, 0.0);
    assert_eq!(locomotion.jump, JumpState::None);
    assert!((step.velocity.y - tuning.wall_jump_force).abs() < EPS);
    assert!((step.velocity.x - 5.0).abs() < 1e-3);
    assert!((step.velocity.z - 10.0 * 60f32.to_radians().sin()).abs() < 1e-3);
}

#[test]
fn test_sprint_drains_stamina_and_speeds_up() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();
    let input = LocomotionInput {
        move_direction: Vec3::NEG_Z,
        sprint: true,
        ..default()
    };

    let step = locomotion.tick(&input, &flat(), Some(&mut stamina), &tuning, &costs, 0.5);
    assert!((step.velocity.z + tuning.sprint_speed).abs() < EPS);
    assert!((stamina.current() - 95.0).abs() < EPS);
}

#[test]
fn test_sprint_below_gate_walks() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion::new();
    let mut stamina = pool();
    assert!(stamina.try_use(95.0));
    let input = LocomotionInput {
        move_direction: Vec3::X,
        sprint: true,
        ..default()
    };

    let step = locomotion.tick(&input, &flat(), Some(&mut stamina), &tuning, &costs, 0.5);
    assert!((step.velocity.x - tuning.move_speed).abs() < EPS);
    assert!((stamina.current() - 5.0).abs() < EPS);
}

#[test]
fn test_locked_character_ignores_move_input() {
    let tuning = MovementTuning::default();
    let costs = StaminaTuning::default();
    let mut locomotion = Locomotion {
        locked: true,
        ..Locomotion::new()
    };
    let input = LocomotionInput {
        move_direction: Vec3::X,
        ..default()
    };

    let step = locomotion.tick(&input, &flat(), None, &tuning, &costs, 0.1);
    assert_eq!(step.velocity.x, 0.0);
    assert_eq!(step.velocity.z, 0.0);
}

#[test]
fn test_wall_normal_tilt_filter() {
    assert!(is_wall_normal(Vec3::X, 10.0));
    assert!(is_wall_normal(Vec3::new(1.0, 0.5, 0.0).normalize(), 10.0));
    assert!(!is_wall_normal(Vec3::Y, 10.0));
    assert!(!is_wall_normal(Vec3::NEG_Y, 10.0));
}
