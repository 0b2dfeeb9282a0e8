//! ContentRegistry resource holding the loaded rune and skill catalogs.

use bevy::prelude::*;

use crate::magic::{RuneDef, SkillDef};

/// Loaded catalogs. Skill order is match order, so both stay `Vec`s.
#[derive(Resource, Debug, Default, Clone)]
pub struct ContentRegistry {
    pub runes: Vec<RuneDef>,
    pub skills: Vec<SkillDef>,
}

impl ContentRegistry {
    pub fn rune(&self, id: &str) -> Option<&RuneDef> {
        self.runes.iter().find(|r| r.id == id)
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded: {} runes, {} skills",
            self.runes.len(),
            self.skills.len()
        )
    }

    pub fn total_count(&self) -> usize {
        self.runes.len() + self.skills.len()
    }
}
