//! Stamina domain: resource pool gating sprint, jump, and block actions.

mod events;
mod pool;
mod systems;
#[cfg(test)]
mod tests;

pub use events::{StaminaChangedEvent, StaminaDepletedEvent};
pub use pool::{StaminaPool, StaminaTuning};
pub use systems::ReportedStamina;

use bevy::prelude::*;

use crate::stamina::systems::{apply_stamina_tuning, regenerate_stamina, report_stamina_changes};

pub struct StaminaPlugin;

impl Plugin for StaminaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StaminaTuning>()
            .add_message::<StaminaChangedEvent>()
            .add_message::<StaminaDepletedEvent>()
            .add_systems(
                Update,
                (apply_stamina_tuning, regenerate_stamina, report_stamina_changes).chain(),
            );
    }
}
