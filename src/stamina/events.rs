//! Stamina domain: level-change notifications for UI collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired when an entity's stamina level changes
#[derive(Debug)]
pub struct StaminaChangedEvent {
    pub entity: Entity,
    /// Normalized level in [0, 1]
    pub fraction: f32,
}

impl Message for StaminaChangedEvent {}

/// Fired when a deduction empties the pool
#[derive(Debug)]
pub struct StaminaDepletedEvent {
    pub entity: Entity,
}

impl Message for StaminaDepletedEvent {}
