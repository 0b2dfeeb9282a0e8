//! Combat domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::components::SwingDirection;

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CombatTuning {
    pub base_damage: f32,
    pub horizontal_multiplier: f32,
    pub vertical_multiplier: f32,
    /// Seconds between player swings
    pub attack_cooldown: f32,
    /// Sweep length in front of the attacker
    pub attack_range: f32,
    pub sweep_radius: f32,
    /// Action recovery started by a swing; blocks casting meanwhile
    pub basic_attack_recovery: f32,

    /// Degrees from facing within which a raised guard catches a hit
    pub block_angle: f32,
    /// Damage scale for blocked hits
    pub block_damage_multiplier: f32,

    pub player_max_health: f32,
    /// Seconds of invulnerability after the player is hit
    pub invincibility_time: f32,
    pub weakness_multiplier: f32,
    /// Seconds a dead enemy lingers before despawning
    pub corpse_lifetime: f32,

    // Enemies
    pub enemy_max_health: f32,
    pub enemy_move_speed: f32,
    pub enemy_detection_range: f32,
    pub enemy_attack_range: f32,
    pub enemy_attack_cooldown: f32,
    pub enemy_damage: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            base_damage: 10.0,
            horizontal_multiplier: 1.2,
            vertical_multiplier: 0.8,
            attack_cooldown: 0.5,
            attack_range: 2.0,
            sweep_radius: 0.5,
            basic_attack_recovery: 0.5,

            block_angle: 45.0,
            block_damage_multiplier: 0.0,

            player_max_health: 100.0,
            invincibility_time: 0.5,
            weakness_multiplier: 1.5,
            corpse_lifetime: 3.0,

            enemy_max_health: 50.0,
            enemy_move_speed: 3.0,
            enemy_detection_range: 10.0,
            enemy_attack_range: 2.0,
            enemy_attack_cooldown: 2.0,
            enemy_damage: 10.0,
        }
    }
}

impl CombatTuning {
    pub fn direction_multiplier(&self, direction: SwingDirection) -> f32 {
        match direction {
            SwingDirection::Horizontal => self.horizontal_multiplier,
            SwingDirection::Vertical => self.vertical_multiplier,
        }
    }

    pub fn swing_damage(&self, direction: SwingDirection) -> f32 {
        self.base_damage * self.direction_multiplier(direction)
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack_pressed: bool,
    pub toggle_direction_pressed: bool,
    pub block_pressed: bool,
    pub block_held: bool,
}
