//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static level geometry: floors, slopes and walls
    Ground,
    /// Player character
    Player,
    /// Enemy characters (melee and spell targets)
    Enemy,
    /// Objects the player can interact with
    Interactable,
    /// Travelling spell effects; never block movement
    SpellEffect,
}

#[derive(Component, Debug)]
pub struct Player;

/// Vertical extent of a character body, used to place ground probes.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterBody {
    /// Distance from the body's origin to its feet
    pub half_height: f32,
    pub radius: f32,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            half_height: 0.9,
            radius: 0.4,
        }
    }
}

/// Last probe results, kept so other domains can read them.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SurfaceContacts {
    pub ground_normal: Option<Vec3>,
    pub wall_normal: Option<Vec3>,
}
