//! Movement domain: ground and wall probes.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CharacterBody, GameLayer, MovementTuning, Player, SurfaceContacts};

/// True when a surface normal is tilted enough from vertical to count as a wall.
pub fn is_wall_normal(normal: Vec3, min_tilt: f32) -> bool {
    let angle = normal.angle_between(Vec3::Y).to_degrees();
    angle > min_tilt && angle < 180.0 - min_tilt
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &CharacterBody, &mut SurfaceContacts), With<Player>>,
) {
    // Only level geometry counts as ground
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let probe = Collider::sphere(tuning.ground_check_radius);

    for (transform, body, mut contacts) in &mut query {
        // Start the sweep inside the body so the sphere clears the capsule bottom
        let start_height = (body.half_height - tuning.ground_check_radius).max(0.0);
        let max_distance = start_height + tuning.ground_check_distance;

        let hit = spatial_query.cast_shape(
            &probe,
            transform.translation,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            &ShapeCastConfig::from_max_distance(max_distance),
            &ground_filter,
        );

        let normal = hit.map(|hit| hit.normal1.normalize_or(Vec3::Y));
        if contacts.ground_normal.is_some() != normal.is_some() {
            debug!("Ground contact: {}", normal.is_some());
        }
        contacts.ground_normal = normal;
    }
}

pub(crate) fn detect_walls(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &CharacterBody, &mut SurfaceContacts), With<Player>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, body, mut contacts) in &mut query {
        let Ok(facing) = Dir3::new(transform.forward().with_y(0.0)) else {
            contacts.wall_normal = None;
            continue;
        };

        let probe = Collider::sphere(body.radius * 0.75);
        let hit = spatial_query.cast_shape(
            &probe,
            transform.translation,
            Quat::IDENTITY,
            facing,
            &ShapeCastConfig::from_max_distance(tuning.wall_check_radius),
            &wall_filter,
        );

        contacts.wall_normal = hit
            .map(|hit| hit.normal1)
            .filter(|normal| is_wall_normal(*normal, tuning.wall_min_tilt));
    }
}
