//! Combat domain: melee swings, guarding, enemy strikes, and damage application.

mod components;
mod damage;
mod events;
mod resources;
mod systems;

pub use components::{
    Damageable, Dead, DespawnTimer, DirectionalWeakness, Enemy, EnemyBrain, EnemyIntent,
    EnemyMode, Guard, Health, Invulnerable, MeleeState, SwingDirection,
};
pub use damage::{HitContext, HitOutcome, deliver, final_damage, guard_covers};
pub use events::{DamageEvent, DeathEvent, HealthChangedEvent, SwingDirectionChangedEvent};
pub use resources::{CombatInput, CombatTuning};

use bevy::prelude::*;

use crate::combat::systems::{
    apply_damage, despawn_corpses, perform_player_swings, process_deaths, read_combat_input,
    tick_invulnerability, toggle_swing_direction, update_enemies, update_guard,
};
use crate::core::GameState;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<CombatInput>()
            .register_type::<CombatTuning>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<HealthChangedEvent>()
            .add_message::<SwingDirectionChangedEvent>()
            .add_systems(
                Update,
                (
                    read_combat_input,
                    toggle_swing_direction,
                    update_guard,
                    perform_player_swings,
                    update_enemies,
                    tick_invulnerability,
                    apply_damage,
                    process_deaths,
                    despawn_corpses,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
