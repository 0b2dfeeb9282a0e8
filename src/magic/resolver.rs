//! Magic domain: skill catalog types and rune-sequence resolution.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::magic::grammar::{GrammarError, classify};
use crate::magic::runes::{BehaviorType, ElementType, ModifierRune, ModifierType, Rune, TraitType};

/// How a matched skill picks where its effect goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Reflect)]
pub enum CastingMode {
    /// Spawned a short distance ahead of the caster
    #[default]
    None,
    /// Centered on the caster
    SelfTarget,
    /// Fired along the camera aim
    Directional,
    /// Placed where the camera ray meets the ground
    TargetPoint,
    LockOnEnemy,
    LockOnFriendly,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Reflect)]
pub struct SpellProperties {
    pub power: f32,
    pub duration: f32,
    pub range: f32,
    pub speed: f32,
    pub size: f32,
}

impl Default for SpellProperties {
    fn default() -> Self {
        Self {
            power: 10.0,
            duration: 1.0,
            range: 5.0,
            speed: 10.0,
            size: 1.0,
        }
    }
}

impl SpellProperties {
    pub fn get(&self, kind: ModifierType) -> f32 {
        match kind {
            ModifierType::Power => self.power,
            ModifierType::Duration => self.duration,
            ModifierType::Range => self.range,
            ModifierType::Speed => self.speed,
            ModifierType::Size => self.size,
        }
    }

    fn get_mut(&mut self, kind: ModifierType) -> &mut f32 {
        match kind {
            ModifierType::Power => &mut self.power,
            ModifierType::Duration => &mut self.duration,
            ModifierType::Range => &mut self.range,
            ModifierType::Speed => &mut self.speed,
            ModifierType::Size => &mut self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Reflect)]
pub enum EffectShape {
    #[default]
    Sphere,
    Cube,
}

/// Visual descriptor for a spawned spell effect.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct EffectDef {
    pub shape: EffectShape,
    /// Linear RGB
    pub color: (f32, f32, f32),
    /// Base radius before the size property is applied
    pub radius: f32,
}

impl Default for EffectDef {
    fn default() -> Self {
        Self {
            shape: EffectShape::Sphere,
            color: (1.0, 1.0, 1.0),
            radius: 0.25,
        }
    }
}

/// Catalog template matched by a rune sequence.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub elements: Vec<ElementType>,
    pub behaviors: Vec<BehaviorType>,
    #[serde(default)]
    pub accepted_modifiers: Vec<ModifierType>,
    #[serde(default)]
    pub casting_mode: CastingMode,
    #[serde(default)]
    pub base: SpellProperties,
    #[serde(default)]
    pub effect: EffectDef,
    /// Seconds the caster cannot act after casting
    #[serde(default = "default_recovery_time")]
    pub recovery_time: f32,
}

fn default_recovery_time() -> f32 {
    1.0
}

impl SkillDef {
    pub fn accepts(&self, kind: ModifierType) -> bool {
        self.accepted_modifiers.contains(&kind)
    }
}

/// A fully resolved cast, ready to spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpell {
    pub skill_id: String,
    pub skill_name: String,
    pub casting_mode: CastingMode,
    pub properties: SpellProperties,
    pub traits: Vec<TraitType>,
    pub effect: EffectDef,
    pub recovery_time: f32,
}

impl ResolvedSpell {
    pub fn has_trait(&self, trait_type: TraitType) -> bool {
        self.traits.contains(&trait_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CastError {
    Grammar(GrammarError),
    NoMatch {
        elements: Vec<ElementType>,
        behaviors: Vec<BehaviorType>,
    },
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastError::Grammar(err) => write!(f, "invalid rune sequence: {err}"),
            CastError::NoMatch {
                elements,
                behaviors,
            } => write!(
                f,
                "no skill matches elements {elements:?} with behaviors {behaviors:?}"
            ),
        }
    }
}

impl std::error::Error for CastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CastError::Grammar(err) => Some(err),
            CastError::NoMatch { .. } => None,
        }
    }
}

impl From<GrammarError> for CastError {
    fn from(err: GrammarError) -> Self {
        CastError::Grammar(err)
    }
}

/// First catalog entry whose element and behavior lists equal the inputs,
/// element for element and in order.
pub fn match_skill<'a>(
    elements: &[ElementType],
    behaviors: &[BehaviorType],
    catalog: &'a [SkillDef],
) -> Option<&'a SkillDef> {
    catalog
        .iter()
        .find(|skill| skill.elements == elements && skill.behaviors == behaviors)
}

/// Applies each accepted modifier as a `(1 + value)` multiplier on its
/// property. Modifiers the skill does not accept are skipped.
pub fn compute_properties(skill: &SkillDef, modifiers: &[ModifierRune]) -> SpellProperties {
    let mut properties = skill.base;
    for modifier in modifiers {
        if !skill.accepts(modifier.kind) {
            warn!(
                "Skill '{}' ignores {:?} modifier ({:+.2})",
                skill.id, modifier.kind, modifier.value
            );
            continue;
        }
        *properties.get_mut(modifier.kind) *= 1.0 + modifier.value;
    }
    properties
}

/// Classifies, matches and computes properties for a rune sequence.
pub fn resolve(sequence: &[Rune], catalog: &[SkillDef]) -> Result<ResolvedSpell, CastError> {
    let classified = classify(sequence)?;

    let Some(skill) = match_skill(&classified.elements, &classified.behaviors, catalog) else {
        return Err(CastError::NoMatch {
            elements: classified.elements,
            behaviors: classified.behaviors,
        });
    };

    Ok(ResolvedSpell {
        skill_id: skill.id.clone(),
        skill_name: skill.name.clone(),
        casting_mode: skill.casting_mode,
        properties: compute_properties(skill, &classified.modifiers),
        traits: classified.traits,
        effect: skill.effect.clone(),
        recovery_time: skill.recovery_time,
    })
}
