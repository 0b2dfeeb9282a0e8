//! Combat domain: damage math shared by melee, spells, and enemy strikes.

use bevy::prelude::*;

use crate::combat::components::{Damageable, SwingDirection};
use crate::combat::resources::CombatTuning;

/// Everything about the defender that can change an incoming hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitContext {
    pub amount: f32,
    pub swing: Option<SwingDirection>,
    pub weakness: Option<SwingDirection>,
    pub invulnerable: bool,
    pub blocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub dealt: f32,
    pub fraction: f32,
    /// True only on the hit that took health to zero
    pub killed: bool,
}

/// Damage left after invulnerability, weakness, and guard; `None` if ignored.
pub fn final_damage(hit: &HitContext, tuning: &CombatTuning) -> Option<f32> {
    if hit.invulnerable {
        return None;
    }

    let mut amount = hit.amount.max(0.0);
    if let (Some(swing), Some(weakness)) = (hit.swing, hit.weakness) {
        if swing == weakness {
            amount *= tuning.weakness_multiplier;
        }
    }
    if hit.blocked {
        amount *= tuning.block_damage_multiplier.max(0.0);
    }
    Some(amount)
}

/// Whether a hit from `origin` lands inside the defender's guard arc.
pub fn guard_covers(facing: Vec3, defender: Vec3, origin: Vec3, block_angle: f32) -> bool {
    let facing = Vec3::new(facing.x, 0.0, facing.z).normalize_or_zero();
    let toward = Vec3::new(origin.x - defender.x, 0.0, origin.z - defender.z).normalize_or_zero();
    if facing == Vec3::ZERO || toward == Vec3::ZERO {
        return true;
    }
    facing.angle_between(toward) <= block_angle.to_radians()
}

pub fn deliver<D: Damageable>(target: &mut D, amount: f32) -> HitOutcome {
    let was_dead = target.is_dead();
    let dealt = target.receive_damage(amount);
    HitOutcome {
        dealt,
        fraction: target.health_fraction(),
        killed: !was_dead && target.is_dead(),
    }
}
