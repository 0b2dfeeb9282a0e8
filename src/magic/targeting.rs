//! Magic domain: where a cast spell appears and which way it travels.

use bevy::prelude::*;

use crate::magic::resolver::CastingMode;

/// World-space context sampled by the effect system at cast time.
#[derive(Debug, Clone, Copy)]
pub struct TargetingContext {
    pub caster_position: Vec3,
    pub caster_forward: Vec3,
    /// Camera aim direction
    pub aim_direction: Vec3,
    /// Ground point under the aim ray, when the ray hit something
    pub aim_point: Option<Vec3>,
    /// Nearest candidate for the lock-on modes
    pub lock_target: Option<Vec3>,
    /// Distance ahead of the caster for spawned projectiles
    pub spawn_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub position: Vec3,
    pub direction: Vec3,
    /// Whether the effect moves after spawning
    pub travels: bool,
}

fn ahead(origin: Vec3, direction: Vec3, distance: f32) -> SpawnPlan {
    SpawnPlan {
        position: origin + direction * distance,
        direction,
        travels: true,
    }
}

/// Resolves the spawn placement for `mode`.
///
/// Modes that need a target fall back to a forward projectile when nothing
/// was found.
pub fn plan_spawn(mode: CastingMode, ctx: &TargetingContext) -> SpawnPlan {
    let forward = ctx.caster_forward.normalize_or(Vec3::NEG_Z);
    let fallback = ahead(ctx.caster_position, forward, ctx.spawn_distance);

    match mode {
        CastingMode::None => fallback,
        CastingMode::SelfTarget => SpawnPlan {
            position: ctx.caster_position,
            direction: forward,
            travels: false,
        },
        CastingMode::Directional => {
            let direction = ctx.aim_direction.normalize_or(forward);
            ahead(ctx.caster_position, direction, ctx.spawn_distance)
        }
        CastingMode::TargetPoint => match ctx.aim_point {
            Some(point) => SpawnPlan {
                position: point,
                direction: forward,
                travels: false,
            },
            None => fallback,
        },
        CastingMode::LockOnEnemy | CastingMode::LockOnFriendly => match ctx.lock_target {
            Some(target) => {
                let direction = (target - ctx.caster_position).normalize_or(forward);
                ahead(ctx.caster_position, direction, ctx.spawn_distance)
            }
            None => fallback,
        },
    }
}

/// Picks the closest candidate within `max_range` of `origin`.
pub fn nearest_within<I>(origin: Vec3, candidates: I, max_range: f32) -> Option<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    candidates
        .into_iter()
        .map(|position| (position, position.distance_squared(origin)))
        .filter(|(_, distance_sq)| *distance_sq <= max_range * max_range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(position, _)| position)
}
