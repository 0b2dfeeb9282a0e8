//! Arena domain: the seeded test level the other domains play out in.

mod layout;
mod spawn;

pub use layout::{ArenaConfig, ScatterKind, scatter_points};
pub use spawn::{ArenaGeometry, Gate};

use bevy::prelude::*;

use crate::arena::spawn::{operate_gates, spawn_arena};
use crate::core::GameState;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaConfig>()
            .add_systems(OnEnter(GameState::Playing), spawn_arena)
            .add_systems(
                Update,
                operate_gates.run_if(in_state(GameState::Playing)),
            );
    }
}
