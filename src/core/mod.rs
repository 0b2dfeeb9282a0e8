//! Core domain: app state, shared action recovery, and lighting.

mod resources;
mod state;
mod systems;

pub use resources::ActionRecovery;
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{setup_lighting, tick_action_recovery, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(GlobalAmbientLight {
                brightness: 300.0,
                ..default()
            })
            .add_systems(Startup, setup_lighting)
            .add_systems(Update, toggle_pause)
            .add_systems(
                Update,
                tick_action_recovery.run_if(in_state(GameState::Playing)),
            );
    }
}
