//! Magic domain: casting tuning and rune key bindings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::magic::runes::{Rune, RuneDef, parse_key};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CastingTuning {
    /// Seconds from opening a session until it is cancelled
    pub max_casting_time: f32,
    /// Seconds the cast key must stay down to turn a tap into a hold
    pub hold_threshold: f32,
    /// Distance ahead of the caster where projectiles appear
    pub spawn_distance: f32,
    pub lock_on_range: f32,
    /// Max length of the camera ray used for point targeting
    pub aim_distance: f32,
    /// Radius of the hit sphere around a travelling effect, before size scaling
    pub hit_radius: f32,
    pub impact_flash_time: f32,
}

impl Default for CastingTuning {
    fn default() -> Self {
        Self {
            max_casting_time: 10.0,
            hold_threshold: 0.3,
            spawn_distance: 2.0,
            lock_on_range: 20.0,
            aim_distance: 50.0,
            hit_radius: 0.5,
            impact_flash_time: 0.2,
        }
    }
}

/// Key-to-rune lookup built from the rune catalog.
#[derive(Resource, Debug, Default, Clone)]
pub struct RuneBindings {
    bindings: Vec<(KeyCode, Rune)>,
}

impl RuneBindings {
    /// Builds bindings, returning the ids of runes whose key name is unknown.
    pub fn from_defs(defs: &[RuneDef]) -> (Self, Vec<String>) {
        let mut bindings = Vec::with_capacity(defs.len());
        let mut unknown = Vec::new();
        for def in defs {
            match parse_key(&def.key) {
                Some(key) => bindings.push((key, def.rune)),
                None => unknown.push(def.id.clone()),
            }
        }
        (Self { bindings }, unknown)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Runes whose key went down this frame, in binding order.
    pub fn just_pressed(&self, keyboard: &ButtonInput<KeyCode>) -> Vec<Rune> {
        self.bindings
            .iter()
            .filter(|(key, _)| keyboard.just_pressed(*key))
            .map(|(_, rune)| *rune)
            .collect()
    }
}
