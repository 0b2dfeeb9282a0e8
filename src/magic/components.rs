//! Magic domain: caster state and spawned spell effects.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::magic::gesture::CastGestureController;
use crate::magic::resolver::SpellProperties;
use crate::magic::resources::CastingTuning;
use crate::magic::runes::Rune;

/// An entity that can open casting sessions.
#[derive(Component, Debug, Clone)]
pub struct Caster {
    pub gesture: CastGestureController,
}

impl Caster {
    pub fn from_tuning(tuning: &CastingTuning) -> Self {
        Self {
            gesture: CastGestureController::new(tuning.max_casting_time, tuning.hold_threshold),
        }
    }

    pub fn sequence(&self) -> &[Rune] {
        self.gesture.runes()
    }

    pub fn progress(&self) -> f32 {
        self.gesture.progress()
    }
}

impl Default for Caster {
    fn default() -> Self {
        Self::from_tuning(&CastingTuning::default())
    }
}

/// Candidate for `LockOnFriendly` spells.
#[derive(Component, Debug)]
pub struct Friendly;

/// A spawned spell in flight (or stationary at its target).
#[derive(Component, Debug)]
pub struct SpellEffect {
    pub caster: Entity,
    pub skill_id: String,
    pub properties: SpellProperties,
    pub direction: Vec3,
    pub travels: bool,
    pub piercing: bool,
    /// Steers toward the nearest enemy in range
    pub homing: bool,
    pub age: f32,
    pub traveled: f32,
    /// Targets already struck, so piercing spells hit each once
    pub struck: HashSet<Entity>,
}

impl SpellEffect {
    pub fn expired(&self) -> bool {
        self.age >= self.properties.duration || self.traveled > self.properties.range
    }
}

/// Short-lived flash spawned where a spell hit.
#[derive(Component, Debug)]
pub struct ImpactFlash {
    pub remaining: f32,
    pub lifetime: f32,
}
