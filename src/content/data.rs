//! Data definitions for the RON content files.
//!
//! Catalog entries (`RuneDef`, `SkillDef`) live in the magic domain; this
//! module holds the file wrapper and the tuning overrides.

use serde::{Deserialize, Serialize};

use crate::camera::CameraTuning;
use crate::combat::CombatTuning;
use crate::interaction::InteractionTuning;
use crate::magic::CastingTuning;
use crate::movement::MovementTuning;
use crate::stamina::StaminaTuning;

/// Wrapper for list files: `(schema_version: 1, items: [...])`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// Every tuning resource, as loaded from gameplay_defaults.ron.
/// Sections left out of the file keep their code defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub stamina: StaminaTuning,
    #[serde(default)]
    pub casting: CastingTuning,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub interaction: InteractionTuning,
    #[serde(default)]
    pub camera: CameraTuning,
}
