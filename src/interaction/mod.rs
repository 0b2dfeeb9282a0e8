//! Interaction domain: nearby interactable detection, focus cycling, prompts, and
//! per-kind interaction handlers.

mod components;
mod events;
mod focus;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    Dialogue, DialogueStep, Highlighted, Interactable, Interactor, Inventory, Lever, Pickup,
};
pub use events::{
    DialogueLineEvent, FocusChangedEvent, InteractEvent, InteractionRangeEnteredEvent,
    InteractionRangeExitedEvent, LeverToggledEvent,
};
pub use focus::{Candidate, FocusDiff, FocusList, ScrollDirection, rank};
pub use resources::InteractionTuning;

use bevy::prelude::*;

use crate::core::GameState;
use crate::interaction::systems::{
    cycle_focus, detect_interactables, handle_dialogue, handle_levers, handle_pickups,
    request_interaction, tint_highlighted,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionTuning>()
            .register_type::<InteractionTuning>()
            .add_message::<FocusChangedEvent>()
            .add_message::<InteractionRangeEnteredEvent>()
            .add_message::<InteractionRangeExitedEvent>()
            .add_message::<InteractEvent>()
            .add_message::<DialogueLineEvent>()
            .add_message::<LeverToggledEvent>()
            .add_systems(
                Update,
                (
                    detect_interactables,
                    cycle_focus,
                    request_interaction,
                    (handle_pickups, handle_dialogue, handle_levers),
                    tint_highlighted,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
