//! Camera domain: third-person orbit rig that reacts to spellcasting.

mod resources;
mod rig;
mod systems;

pub use resources::CameraTuning;
pub use rig::{CameraMode, CameraRig, Shoulder, resolve_collision};

use bevy::prelude::*;

use crate::camera::systems::{
    follow_casting_modes, grab_cursor, release_cursor, rotate_camera, spawn_camera,
    update_camera_transform,
};
use crate::core::GameState;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTuning>()
            .register_type::<CameraTuning>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameState::Playing), grab_cursor)
            .add_systems(OnExit(GameState::Playing), release_cursor)
            .add_systems(
                Update,
                (
                    rotate_camera.run_if(in_state(GameState::Playing)),
                    follow_casting_modes,
                    update_camera_transform,
                )
                    .chain(),
            );
    }
}
