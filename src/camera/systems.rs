//! Camera domain: spawning, mouse look, casting modes, and boom collision.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::camera::resources::CameraTuning;
use crate::camera::rig::{CameraMode, CameraRig, resolve_collision};
use crate::magic::{
    CastingEndedEvent, CastingMode, CastingModeEnteredEvent, CastingModeExitedEvent,
    CastingStartedEvent,
};
use crate::movement::{GameLayer, Player};

pub(crate) const SHOULDER_SWAP_KEY: KeyCode = KeyCode::CapsLock;

pub(crate) fn spawn_camera(mut commands: Commands, tuning: Res<CameraTuning>) {
    let rig = CameraRig::new(&tuning);
    let transform = Transform::from_translation(rig.desired_position(Vec3::Y * tuning.focus_height))
        .with_rotation(rig.rotation());
    commands.spawn((Name::new("Camera"), Camera3d::default(), rig, transform));
}

pub(crate) fn grab_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursors.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

pub(crate) fn release_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursors.single_mut() {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

pub(crate) fn rotate_camera(
    motion: Res<AccumulatedMouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<CameraTuning>,
    mut rigs: Query<&mut CameraRig>,
) {
    for mut rig in &mut rigs {
        if motion.delta != Vec2::ZERO {
            rig.rotate(motion.delta, &tuning);
        }
        if keyboard.just_pressed(SHOULDER_SWAP_KEY) {
            rig.shoulder = rig.shoulder.swapped();
        }
    }
}

/// Follows the player's casting session: spell focus while casting, first-person
/// aim while a directional cast is held.
pub(crate) fn follow_casting_modes(
    mut started: MessageReader<CastingStartedEvent>,
    mut ended: MessageReader<CastingEndedEvent>,
    mut entered: MessageReader<CastingModeEnteredEvent>,
    mut exited: MessageReader<CastingModeExitedEvent>,
    players: Query<(), With<Player>>,
    mut rigs: Query<&mut CameraRig>,
) {
    let mut next = None;
    for event in started.read() {
        if players.contains(event.caster) {
            next = Some(CameraMode::SpellFocus);
        }
    }
    for event in entered.read() {
        if players.contains(event.caster) && event.mode == CastingMode::Directional {
            next = Some(CameraMode::FirstPersonAim);
        }
    }
    for event in exited.read() {
        if players.contains(event.caster) && event.mode == CastingMode::Directional {
            next = Some(CameraMode::SpellFocus);
        }
    }
    for event in ended.read() {
        if players.contains(event.caster) {
            next = Some(CameraMode::ThirdPerson);
        }
    }

    let Some(mode) = next else {
        return;
    };
    for mut rig in &mut rigs {
        if rig.mode != mode {
            debug!("Camera mode {:?} -> {mode:?}", rig.mode);
            rig.mode = mode;
        }
    }
}

pub(crate) fn update_camera_transform(
    time: Res<Time>,
    tuning: Res<CameraTuning>,
    spatial_query: SpatialQuery,
    players: Query<(Entity, &Transform), (With<Player>, Without<CameraRig>)>,
    mut rigs: Query<(&mut CameraRig, &mut Transform)>,
) {
    let Ok((player, player_transform)) = players.single() else {
        return;
    };
    let focus = player_transform.translation + Vec3::Y * tuning.focus_height;

    for (mut rig, mut transform) in &mut rigs {
        rig.settle(time.delta_secs(), &tuning);

        let desired = rig.desired_position(focus);
        let boom = desired - focus;
        let hit_distance = Dir3::new(boom).ok().and_then(|direction| {
            let filter =
                SpatialQueryFilter::from_mask(GameLayer::Ground).with_excluded_entities([player]);
            spatial_query
                .cast_ray(focus, direction, boom.length(), true, &filter)
                .map(|hit| hit.distance)
        });

        transform.translation =
            resolve_collision(focus, desired, hit_distance, tuning.collision_offset);
        transform.rotation = rig.rotation();
    }
}
