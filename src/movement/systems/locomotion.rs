//! Movement domain: drives the locomotion state machine from ECS data.

use std::collections::HashSet;

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::combat::Dead;
use crate::magic::{CastingEndedEvent, CastingStartedEvent};
use crate::movement::{
    GroundContact, LocomotionEvent, LocomotionInput, Locomotion, MovementInput, MovementTuning,
    Player, SurfaceContacts, SurfaceProbe,
};
use crate::stamina::{StaminaPool, StaminaTuning};

/// Flattened camera basis used to turn stick input into a world direction.
fn camera_basis(camera: Option<&Transform>, fallback: &Transform) -> (Vec3, Vec3) {
    let source = camera.unwrap_or(fallback);
    let forward = source.forward().with_y(0.0).normalize_or(Vec3::NEG_Z);
    let right = source.right().with_y(0.0).normalize_or(Vec3::X);
    (forward, right)
}

#[allow(clippy::type_complexity)]
pub(crate) fn apply_locomotion(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    stamina_tuning: Res<StaminaTuning>,
    camera_query: Query<&Transform, (With<CameraRig>, Without<Player>)>,
    mut query: Query<
        (
            Entity,
            &mut Transform,
            &mut Locomotion,
            &SurfaceContacts,
            Option<&mut StaminaPool>,
            &mut LinearVelocity,
            Has<Dead>,
        ),
        With<Player>,
    >,
    mut missing_stamina: Local<HashSet<Entity>>,
) {
    let dt = time.delta_secs();
    let camera = camera_query.single().ok();

    for (entity, mut transform, mut locomotion, contacts, stamina, mut velocity, dead) in
        &mut query
    {
        let (forward, right) = camera_basis(camera, &transform);

        let mut frame = LocomotionInput {
            camera_forward: camera.map(|c| *c.forward()).unwrap_or(forward),
            ..default()
        };
        if !dead {
            frame.move_direction =
                (right * input.axis.x + forward * input.axis.y).clamp_length_max(1.0);
            frame.sprint = input.sprint_held;
            frame.jump_pressed = input.jump_just_pressed;
            frame.jump_held = input.jump_held;
            frame.jump_released = input.jump_just_released;
        }

        if stamina.is_none() && missing_stamina.insert(entity) {
            warn!("{entity:?} has no StaminaPool; sprint and charge jumps are disabled");
        }

        let probe = SurfaceProbe {
            ground: contacts.ground_normal.map(GroundContact::from_normal),
            wall: contacts.wall_normal,
        };

        let step = locomotion.tick(
            &frame,
            &probe,
            stamina.map(|pool| pool.into_inner()),
            &tuning,
            &stamina_tuning,
            dt,
        );
        velocity.0 = step.velocity;

        for event in &step.events {
            log_locomotion_event(entity, event);
        }

        // Turn toward the move direction
        let heading = frame.move_direction.with_y(0.0);
        if !locomotion.locked && heading.length_squared() > 0.01 {
            let target = Transform::default().looking_to(heading, Vec3::Y).rotation;
            let blend = (tuning.rotation_speed * dt).min(1.0);
            transform.rotation = transform.rotation.slerp(target, blend);
        }
    }
}

fn log_locomotion_event(entity: Entity, event: &LocomotionEvent) {
    match event {
        LocomotionEvent::StatusChanged { from, to } => {
            debug!("{entity:?} position status {from:?} -> {to:?}");
        }
        LocomotionEvent::Launched { kind, velocity } => {
            debug!("{entity:?} {kind:?} jump launched at {velocity}");
        }
        LocomotionEvent::JumpRefused { cost } => {
            debug!("{entity:?} charge jump refused: needs {cost:.1} stamina");
        }
        LocomotionEvent::WallLost => debug!("{entity:?} lost wall contact"),
        LocomotionEvent::GlideStarted => debug!("{entity:?} glide started"),
        LocomotionEvent::GlideEnded => debug!("{entity:?} glide ended"),
    }
}

/// Locks ground movement for the duration of a casting session.
pub(crate) fn lock_while_casting(
    mut started: MessageReader<CastingStartedEvent>,
    mut ended: MessageReader<CastingEndedEvent>,
    mut query: Query<&mut Locomotion>,
) {
    for event in started.read() {
        if let Ok(mut locomotion) = query.get_mut(event.caster) {
            locomotion.locked = true;
        }
    }
    for event in ended.read() {
        if let Ok(mut locomotion) = query.get_mut(event.caster) {
            locomotion.locked = false;
        }
    }
}
