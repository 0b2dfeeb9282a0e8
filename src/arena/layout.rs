//! Arena domain: seeded placement.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Size and population of the test arena.
#[derive(Resource, Debug, Clone)]
pub struct ArenaConfig {
    pub seed: u64,
    pub player_spawn: Vec3,
    /// Half the side length of the square floor
    pub half_extent: f32,
    pub enemy_count: usize,
    pub pickup_count: usize,
    pub scatter_radius: f32,
    /// Nothing scattered closer than this to the player spawn
    pub spawn_clearance: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            player_spawn: Vec3::new(0.0, 1.5, 0.0),
            half_extent: 30.0,
            enemy_count: 4,
            pickup_count: 3,
            scatter_radius: 14.0,
            spawn_clearance: 5.0,
        }
    }
}

/// Which scatter stream a placement comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterKind {
    Enemies,
    Pickups,
}

impl ScatterKind {
    fn stream(self) -> u64 {
        match self {
            ScatterKind::Enemies => 1,
            ScatterKind::Pickups => 2,
        }
    }
}

/// Ground-plane points in a ring around the player spawn. The same config
/// always yields the same points.
pub fn scatter_points(config: &ArenaConfig, kind: ScatterKind, count: usize) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_mul(31).wrapping_add(kind.stream()));
    let inner = config.spawn_clearance.max(0.0);
    let outer = config
        .scatter_radius
        .min(config.half_extent - 1.0)
        .max(inner + 0.5);
    let center = config.player_spawn.xz();

    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let radius = rng.random_range(inner..outer);
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}
