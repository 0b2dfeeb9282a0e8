//! Core domain: timers shared across gameplay domains.

use bevy::prelude::*;

/// Lockout after an action (a swing or a cast) during which new actions can't start.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct ActionRecovery {
    pub remaining: f32,
}

impl ActionRecovery {
    pub fn is_recovering(&self) -> bool {
        self.remaining > 0.0
    }

    /// Starts a recovery; never shortens one already running.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = self.remaining.max(seconds);
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}
