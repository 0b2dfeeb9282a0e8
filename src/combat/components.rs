//! Combat domain: components and combat-related state types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Anything that can absorb damage and die from it.
pub trait Damageable {
    /// Removes up to `amount` and returns what was actually taken.
    fn receive_damage(&mut self, amount: f32) -> f32;
    fn health_fraction(&self) -> f32;
    fn is_dead(&self) -> bool;
}

/// Health component for damageable entities
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

impl Damageable for Health {
    fn receive_damage(&mut self, amount: f32) -> f32 {
        self.take_damage(amount)
    }

    fn health_fraction(&self) -> f32 {
        self.fraction()
    }

    fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Invulnerability window after being hit. Only entities carrying this get one.
#[derive(Component, Debug, Default)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, Reflect,
)]
pub enum SwingDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl SwingDirection {
    pub fn toggled(self) -> Self {
        match self {
            SwingDirection::Horizontal => SwingDirection::Vertical,
            SwingDirection::Vertical => SwingDirection::Horizontal,
        }
    }
}

/// Extra damage taken from swings in this direction
#[derive(Component, Debug, Clone, Copy)]
pub struct DirectionalWeakness(pub SwingDirection);

#[derive(Component, Debug)]
pub struct Enemy;

/// Set once health reaches zero; dead entities ignore input and further damage.
#[derive(Component, Debug)]
pub struct Dead;

/// Corpse removal countdown
#[derive(Component, Debug)]
pub struct DespawnTimer(pub f32);

/// Melee swing cadence and the currently selected swing direction.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MeleeState {
    pub last_swing: Option<f32>,
    pub cooldown: f32,
    pub direction: SwingDirection,
}

impl MeleeState {
    pub fn new(cooldown: f32) -> Self {
        Self {
            last_swing: None,
            cooldown,
            direction: SwingDirection::default(),
        }
    }

    pub fn can_swing(&self, now: f32) -> bool {
        self.last_swing.is_none_or(|last| now >= last + self.cooldown)
    }

    /// Records the swing and returns true if the cooldown has elapsed.
    pub fn try_swing(&mut self, now: f32) -> bool {
        if !self.can_swing(now) {
            return false;
        }
        self.last_swing = Some(now);
        true
    }

    pub fn toggle_direction(&mut self) -> SwingDirection {
        self.direction = self.direction.toggled();
        self.direction
    }
}

/// Raised guard; set while the block button is held and paid for.
#[derive(Component, Debug, Default)]
pub struct Guard {
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyMode {
    #[default]
    Idle,
    Chase,
    Attack,
}

/// What an enemy wants to do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyIntent {
    Hold,
    /// Walk straight at the player
    Approach,
    Strike,
}

/// Straight-line chaser: approaches inside `detection_range`, strikes inside
/// `attack_range` once per `attack_cooldown`.
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub mode: EnemyMode,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub cooldown_timer: f32,
}

impl EnemyBrain {
    pub fn new(detection_range: f32, attack_range: f32, attack_cooldown: f32) -> Self {
        Self {
            mode: EnemyMode::Idle,
            detection_range,
            attack_range,
            attack_cooldown,
            cooldown_timer: 0.0,
        }
    }

    pub fn think(&mut self, distance: f32, dt: f32) -> EnemyIntent {
        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);

        self.mode = if distance <= self.attack_range {
            EnemyMode::Attack
        } else if distance <= self.detection_range {
            EnemyMode::Chase
        } else {
            EnemyMode::Idle
        };

        match self.mode {
            EnemyMode::Idle => EnemyIntent::Hold,
            EnemyMode::Chase => EnemyIntent::Approach,
            EnemyMode::Attack if self.cooldown_timer <= 0.0 => {
                self.cooldown_timer = self.attack_cooldown;
                EnemyIntent::Strike
            }
            EnemyMode::Attack => EnemyIntent::Hold,
        }
    }
}
