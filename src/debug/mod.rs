//! Debug domain: dev-tools hotkeys and a player state overlay.
//!
//! Hotkeys (hold Ctrl):
//! - I: toggle invincibility
//! - O: toggle the info overlay
//! - L: full heal
//! - K: remove all enemies

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{
    apply_invincibility, handle_debug_hotkeys, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_status_message,
                apply_invincibility,
                update_debug_info_overlay,
            )
                .chain(),
        );
    }
}
