//! Magic domain: rune input, sequence resolution, cast gestures, and spell effects.

mod components;
mod events;
mod gesture;
mod grammar;
mod resolver;
mod resources;
mod runes;
mod systems;
mod targeting;
#[cfg(test)]
mod tests;

pub use components::{Caster, Friendly, ImpactFlash, SpellEffect};
pub use events::{
    CastingEndedEvent, CastingModeEnteredEvent, CastingModeExitedEvent, CastingStartedEvent,
    RuneSequenceChangedEvent, SpellCastEvent,
};
pub use gesture::{
    CancelReason, CastGesture, CastGestureController, CastSignal, GestureInput, GesturePhase,
};
pub use grammar::{ClassifiedRunes, GrammarError, classify};
pub use resolver::{
    CastError, CastingMode, EffectDef, EffectShape, ResolvedSpell, SkillDef, SpellProperties,
    compute_properties, match_skill, resolve,
};
pub use resources::{CastingTuning, RuneBindings};
pub use runes::{
    BehaviorType, ElementType, ModifierRune, ModifierType, Rune, RuneDef, RunePhase, TraitType,
    parse_key,
};
pub use targeting::{SpawnPlan, TargetingContext, nearest_within, plan_spawn};

use bevy::prelude::*;

use crate::core::GameState;
use crate::magic::systems::{
    advance_spell_effects, apply_casting_tuning, fade_impact_flashes, process_cast_input,
    spawn_spell_effects,
};

pub struct MagicPlugin;

impl Plugin for MagicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CastingTuning>()
            .init_resource::<RuneBindings>()
            .register_type::<CastingTuning>()
            .register_type::<RuneDef>()
            .register_type::<SkillDef>()
            .add_message::<CastingStartedEvent>()
            .add_message::<CastingEndedEvent>()
            .add_message::<RuneSequenceChangedEvent>()
            .add_message::<CastingModeEnteredEvent>()
            .add_message::<CastingModeExitedEvent>()
            .add_message::<SpellCastEvent>()
            .add_systems(
                Update,
                (
                    apply_casting_tuning,
                    process_cast_input,
                    spawn_spell_effects,
                    advance_spell_effects,
                    fade_impact_flashes,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
