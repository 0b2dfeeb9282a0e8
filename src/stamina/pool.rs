//! Stamina domain: the bounded stamina pool and its regen rules.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning for a stamina pool and the discrete action costs drawn from it.
#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct StaminaTuning {
    pub max_stamina: f32,
    /// Units regenerated per second once regen is active
    pub regen_rate: f32,
    /// Seconds after the last successful deduction before regen resumes
    pub regen_delay: f32,
    /// Drain per second while sprinting
    pub sprint_cost: f32,
    /// Minimum pool required to start or keep sprinting
    pub sprint_gate: f32,
    pub block_cost: f32,
}

impl Default for StaminaTuning {
    fn default() -> Self {
        Self {
            max_stamina: 100.0,
            regen_rate: 10.0,
            regen_delay: 1.0,
            sprint_cost: 10.0,
            sprint_gate: 10.0,
            block_cost: 15.0,
        }
    }
}

/// Stamina resource pool, clamped to `[0, max]`.
///
/// Deductions are all-or-nothing: `try_use` either removes the full amount or
/// leaves the pool untouched. Regeneration is time driven through `tick`.
#[derive(Component, Debug, Clone)]
pub struct StaminaPool {
    current: f32,
    max: f32,
    regen_rate: f32,
    regen_delay: f32,
    since_last_use: f32,
    regenerating: bool,
    depleted: bool,
}

impl StaminaPool {
    pub fn new(max: f32, regen_rate: f32, regen_delay: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            regen_rate,
            regen_delay,
            since_last_use: regen_delay,
            regenerating: true,
            depleted: false,
        }
    }

    pub fn from_tuning(tuning: &StaminaTuning) -> Self {
        Self::new(tuning.max_stamina, tuning.regen_rate, tuning.regen_delay)
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Normalized fill level in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_regenerating(&self) -> bool {
        self.regenerating
    }

    /// Negative amounts are never usable.
    pub fn can_use(&self, amount: f32) -> bool {
        amount >= 0.0 && self.current >= amount
    }

    /// Deducts `amount` if the pool can cover it.
    ///
    /// Returns `false` without side effects otherwise. A successful deduction
    /// restarts the regen delay.
    pub fn try_use(&mut self, amount: f32) -> bool {
        if !self.can_use(amount) {
            return false;
        }

        self.current = (self.current - amount).max(0.0);
        self.since_last_use = 0.0;
        self.regenerating = false;

        if self.current <= 0.0 {
            self.depleted = true;
        }
        true
    }

    /// Advances the regen clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let regen_time = if self.regenerating {
            dt
        } else {
            self.since_last_use += dt;
            if self.since_last_use < self.regen_delay || self.current >= self.max {
                return;
            }
            self.regenerating = true;
            // Only the part of this tick past the delay regenerates
            self.since_last_use - self.regen_delay
        };

        if self.current < self.max {
            self.current = (self.current + self.regen_rate * regen_time).min(self.max);
        } else {
            self.regenerating = false;
        }
    }

    /// Returns and clears the depletion flag raised by the last draining deduction.
    pub fn take_depleted(&mut self) -> bool {
        std::mem::take(&mut self.depleted)
    }

    /// Re-applies tuning, keeping the current fill ratio.
    pub fn retune(&mut self, tuning: &StaminaTuning) {
        let fraction = self.fraction();
        self.max = tuning.max_stamina.max(0.0);
        self.current = self.max * fraction;
        self.regen_rate = tuning.regen_rate;
        self.regen_delay = tuning.regen_delay;
    }
}

impl Default for StaminaPool {
    fn default() -> Self {
        Self::from_tuning(&StaminaTuning::default())
    }
}
