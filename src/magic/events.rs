//! Magic domain: casting session notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::magic::gesture::CastGesture;
use crate::magic::resolver::{CastingMode, ResolvedSpell};
use crate::magic::runes::Rune;

#[derive(Debug)]
pub struct CastingStartedEvent {
    pub caster: Entity,
}

impl Message for CastingStartedEvent {}

/// Fired when a casting session closes, cast or not
#[derive(Debug)]
pub struct CastingEndedEvent {
    pub caster: Entity,
    pub completed: bool,
}

impl Message for CastingEndedEvent {}

#[derive(Debug)]
pub struct RuneSequenceChangedEvent {
    pub caster: Entity,
    pub runes: Vec<Rune>,
}

impl Message for RuneSequenceChangedEvent {}

#[derive(Debug)]
pub struct CastingModeEnteredEvent {
    pub caster: Entity,
    pub mode: CastingMode,
}

impl Message for CastingModeEnteredEvent {}

#[derive(Debug)]
pub struct CastingModeExitedEvent {
    pub caster: Entity,
    pub mode: CastingMode,
}

impl Message for CastingModeExitedEvent {}

/// A resolved spell ready to be spawned into the world
#[derive(Debug)]
pub struct SpellCastEvent {
    pub caster: Entity,
    pub spell: ResolvedSpell,
    pub gesture: CastGesture,
}

impl Message for SpellCastEvent {}
