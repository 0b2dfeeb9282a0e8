//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::SwingDirection;

#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    /// Melee swing direction; `None` for spells
    pub swing: Option<SwingDirection>,
    /// World position the hit came from, used for guard arcs
    pub origin: Vec3,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChangedEvent {
    pub entity: Entity,
    pub fraction: f32,
}

impl Message for HealthChangedEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingDirectionChangedEvent {
    pub entity: Entity,
    pub direction: SwingDirection,
}

impl Message for SwingDirectionChangedEvent {}
