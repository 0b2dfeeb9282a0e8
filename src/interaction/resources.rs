//! Interaction domain: tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct InteractionTuning {
    /// Overlap sphere radius around the interactor
    pub detection_radius: f32,
    /// Seconds between accepted scroll steps
    pub scroll_cooldown: f32,
    /// Minimum scroll delta that counts as a step
    pub scroll_threshold: f32,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            detection_radius: 3.0,
            scroll_cooldown: 0.1,
            scroll_threshold: 0.1,
        }
    }
}
