//! Core domain: top-level app states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content loading; gameplay systems are idle
    #[default]
    Boot,
    Playing,
    Paused,
}
