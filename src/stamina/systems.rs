//! Stamina domain: regen ticking and change reporting.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::stamina::events::{StaminaChangedEvent, StaminaDepletedEvent};
use crate::stamina::pool::{StaminaPool, StaminaTuning};

/// Last fraction reported for an entity, so notifications fire only on change.
#[derive(Component, Debug, Default)]
pub struct ReportedStamina(pub Option<f32>);

pub(crate) fn regenerate_stamina(time: Res<Time>, mut query: Query<&mut StaminaPool>) {
    let dt = time.delta_secs();
    for mut pool in &mut query {
        // Skip the write when nothing would change so `Changed` stays meaningful
        if pool.is_regenerating() || pool.current() < pool.max() {
            pool.tick(dt);
        }
    }
}

pub(crate) fn report_stamina_changes(
    mut query: Query<(Entity, &mut StaminaPool, &mut ReportedStamina), Changed<StaminaPool>>,
    mut changed: MessageWriter<StaminaChangedEvent>,
    mut depleted: MessageWriter<StaminaDepletedEvent>,
) {
    for (entity, mut pool, mut reported) in &mut query {
        let fraction = pool.fraction();
        if reported.0 != Some(fraction) {
            reported.0 = Some(fraction);
            changed.write(StaminaChangedEvent { entity, fraction });
        }

        if pool.bypass_change_detection().take_depleted() {
            debug!("Stamina depleted on {:?}", entity);
            depleted.write(StaminaDepletedEvent { entity });
        }
    }
}

/// Pushes reloaded tuning into every live pool.
pub(crate) fn apply_stamina_tuning(
    tuning: Res<StaminaTuning>,
    mut query: Query<&mut StaminaPool>,
) {
    if !tuning.is_changed() || tuning.is_added() {
        return;
    }
    for mut pool in &mut query {
        pool.retune(&tuning);
    }
}
