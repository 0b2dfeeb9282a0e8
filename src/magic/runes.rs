//! Magic domain: rune vocabulary and the rune catalog entry type.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum ElementType {
    Fire,
    Water,
    Wind,
    Earth,
    Wood,
    Ice,
    Lightning,
    Poison,
    Dark,
    Holy,
    Chrono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum BehaviorType {
    Projectile,
    Explosion,
    Create,
    Sustain,
    Summon,
    Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum ModifierType {
    Power,
    Duration,
    Range,
    Speed,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum TraitType {
    Tension,
    Lightweight,
    Piercing,
    Homing,
    Chain,
}

/// A modifier rune: scales one spell property by `1 + value`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Reflect)]
pub struct ModifierRune {
    pub kind: ModifierType,
    pub value: f32,
}

/// Atomic casting input token.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Reflect)]
pub enum Rune {
    Element(ElementType),
    Behavior(BehaviorType),
    Modifier(ModifierRune),
    Trait(TraitType),
}

/// Grammar phase of a rune. Phases must appear in non-decreasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunePhase {
    Element,
    Behavior,
    Modifier,
    Trait,
}

impl Rune {
    pub fn phase(&self) -> RunePhase {
        match self {
            Rune::Element(_) => RunePhase::Element,
            Rune::Behavior(_) => RunePhase::Behavior,
            Rune::Modifier(_) => RunePhase::Modifier,
            Rune::Trait(_) => RunePhase::Trait,
        }
    }

    /// Short label for HUD display.
    pub fn label(&self) -> String {
        match self {
            Rune::Element(element) => format!("{element:?}"),
            Rune::Behavior(behavior) => format!("{behavior:?}"),
            Rune::Modifier(modifier) => format!("{:?}+{:.0}%", modifier.kind, modifier.value * 100.0),
            Rune::Trait(trait_type) => format!("{trait_type:?}"),
        }
    }
}

/// Catalog entry for a rune the player can input.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct RuneDef {
    pub id: String,
    pub name: String,
    pub rune: Rune,
    /// Key binding by `KeyCode` name, e.g. "Digit1" or "KeyF"
    pub key: String,
}

/// Resolves a key binding name from content data to a `KeyCode`.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name {
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyT" => KeyCode::KeyT,
        "KeyV" => KeyCode::KeyV,
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "Numpad0" => KeyCode::Numpad0,
        "Numpad1" => KeyCode::Numpad1,
        "Numpad2" => KeyCode::Numpad2,
        "Numpad3" => KeyCode::Numpad3,
        "Numpad4" => KeyCode::Numpad4,
        "Numpad5" => KeyCode::Numpad5,
        "Numpad6" => KeyCode::Numpad6,
        "Numpad7" => KeyCode::Numpad7,
        "Numpad8" => KeyCode::Numpad8,
        "Numpad9" => KeyCode::Numpad9,
        _ => return None,
    };
    Some(key)
}
