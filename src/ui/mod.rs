//! UI domain: HUD bars, casting panel, prompts, and death/pause overlays.

mod death;
mod hud_casting;
mod hud_combat;
mod hud_interaction;
mod hud_player;
mod pause;

pub use death::PlayerDeathState;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::death::{detect_player_death, handle_retry_button};
use crate::ui::hud_casting::{
    spawn_casting_panel_ui, toggle_casting_panel, update_casting_progress,
    update_rune_sequence_text,
};
use crate::ui::hud_combat::{spawn_swing_direction_ui, update_swing_direction};
use crate::ui::hud_interaction::{
    show_dialogue_lines, spawn_interaction_ui, update_interaction_prompt,
};
use crate::ui::hud_player::{
    spawn_player_bars_ui, update_player_healthbar, update_player_staminabar,
};
use crate::ui::pause::{despawn_pause_overlay, spawn_pause_overlay};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerDeathState>()
            .add_systems(
                Startup,
                (
                    spawn_player_bars_ui,
                    spawn_casting_panel_ui,
                    spawn_interaction_ui,
                    spawn_swing_direction_ui,
                ),
            )
            .add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
            .add_systems(OnExit(GameState::Paused), despawn_pause_overlay)
            .add_systems(
                Update,
                (
                    update_player_healthbar,
                    update_player_staminabar,
                    toggle_casting_panel,
                    update_rune_sequence_text,
                    update_casting_progress,
                    update_interaction_prompt,
                    show_dialogue_lines,
                    update_swing_direction,
                    detect_player_death,
                    handle_retry_button,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
