//! Movement domain: character locomotion, jump sub-states, and surface probes.

mod components;
mod controller;
mod resources;
mod state;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{CharacterBody, GameLayer, Player, SurfaceContacts};
pub use controller::{
    ChargeRelease, LaunchKind, Locomotion, LocomotionEvent, LocomotionInput, LocomotionStep,
    SurfaceProbe, charge_release, wall_jump_direction,
};
pub use resources::{MovementInput, MovementTuning};
pub use state::{
    GroundContact, JumpState, PositionStatus, StatusUpdate, downslope_direction, resolve_status,
    slope_angle,
};
pub use systems::is_wall_normal;

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::systems::{
    apply_locomotion, detect_ground, detect_walls, lock_while_casting, read_input,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .register_type::<MovementTuning>()
            .add_systems(
                Update,
                (
                    read_input,
                    lock_while_casting,
                    detect_ground,
                    detect_walls,
                    apply_locomotion,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
