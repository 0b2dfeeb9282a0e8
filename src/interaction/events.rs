//! Interaction domain: focus, range, and interaction events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusChangedEvent {
    pub interactor: Entity,
    pub focused: Option<Entity>,
}

impl Message for FocusChangedEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRangeEnteredEvent {
    pub interactor: Entity,
    pub target: Entity,
}

impl Message for InteractionRangeEnteredEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRangeExitedEvent {
    pub interactor: Entity,
    pub target: Entity,
}

impl Message for InteractionRangeExitedEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractEvent {
    pub interactor: Entity,
    pub target: Entity,
}

impl Message for InteractEvent {}

#[derive(Debug, Clone)]
pub struct DialogueLineEvent {
    pub speaker: Entity,
    pub speaker_name: String,
    pub index: usize,
    pub line: String,
}

impl Message for DialogueLineEvent {}

#[derive(Debug, Clone, Copy)]
pub struct LeverToggledEvent {
    pub lever: Entity,
    pub on: bool,
}

impl Message for LeverToggledEvent {}
