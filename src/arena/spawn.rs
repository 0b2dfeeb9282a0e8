//! Arena domain: level geometry, the player, enemies, and interactables.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::arena::layout::{ArenaConfig, ScatterKind, scatter_points};
use crate::combat::{
    CombatTuning, DirectionalWeakness, Enemy, EnemyBrain, Guard, Health, Invulnerable,
    MeleeState, SwingDirection,
};
use crate::core::ActionRecovery;
use crate::interaction::{
    Dialogue, Interactable, Interactor, Inventory, Lever, LeverToggledEvent, Pickup,
};
use crate::magic::{Caster, CastingTuning, Friendly};
use crate::movement::{CharacterBody, GameLayer, Locomotion, Player, SurfaceContacts};
use crate::stamina::{ReportedStamina, StaminaPool, StaminaTuning};

/// Static level geometry. Its presence means the arena is already built.
#[derive(Component, Debug)]
pub struct ArenaGeometry;

/// Wall section that sinks into the floor while its lever is on.
#[derive(Component, Debug)]
pub struct Gate {
    pub lever: Entity,
    pub closed_y: f32,
    pub open: bool,
}

const GATE_HEIGHT: f32 = 3.0;
const GATE_SPEED: f32 = 2.0;

/// Shared asset handles for one arena build.
struct Palette {
    ground: Handle<StandardMaterial>,
    wall: Handle<StandardMaterial>,
    slope: Handle<StandardMaterial>,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn spawn_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ArenaConfig>,
    stamina: Res<StaminaTuning>,
    casting: Res<CastingTuning>,
    combat: Res<CombatTuning>,
    existing: Query<(), With<ArenaGeometry>>,
) {
    // OnEnter(Playing) also fires when leaving the pause menu
    if !existing.is_empty() {
        return;
    }

    let palette = Palette {
        ground: materials.add(Color::srgb(0.35, 0.42, 0.35)),
        wall: materials.add(Color::srgb(0.3, 0.3, 0.4)),
        slope: materials.add(Color::srgb(0.5, 0.4, 0.3)),
    };
    spawn_geometry(&mut commands, &mut meshes, &palette, &config);
    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        &config,
        &stamina,
        &casting,
        &combat,
    );
    spawn_enemies(&mut commands, &mut meshes, &mut materials, &config, &combat);
    let lever = spawn_interactables(&mut commands, &mut meshes, &mut materials, &config);

    // Gate across the far wall opening, opened by the lever
    let closed_y = GATE_HEIGHT * 0.5;
    commands.spawn((
        Name::new("Gate"),
        Gate {
            lever,
            closed_y,
            open: false,
        },
        ArenaGeometry,
        Mesh3d(meshes.add(Cuboid::new(6.0, GATE_HEIGHT, 0.5))),
        MeshMaterial3d(palette.wall.clone()),
        Transform::from_xyz(0.0, closed_y, -config.half_extent * 0.5),
        RigidBody::Static,
        Collider::cuboid(6.0, GATE_HEIGHT, 0.5),
        ground_layers(),
    ));

    info!(
        "Arena built (seed {}): {} enemies, {} pickups",
        config.seed, config.enemy_count, config.pickup_count
    );
}

fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Enemy, GameLayer::SpellEffect],
    )
}

fn spawn_geometry(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    palette: &Palette,
    config: &ArenaConfig,
) {
    let side = config.half_extent * 2.0;

    // Floor
    commands.spawn((
        Name::new("Floor"),
        ArenaGeometry,
        Mesh3d(meshes.add(Cuboid::new(side, 1.0, side))),
        MeshMaterial3d(palette.ground.clone()),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(side, 1.0, side),
        ground_layers(),
    ));

    // Boundary walls
    let wall_height = 4.0;
    for (x, z, width, depth) in [
        (0.0, config.half_extent, side, 1.0),
        (0.0, -config.half_extent, side, 1.0),
        (config.half_extent, 0.0, 1.0, side),
        (-config.half_extent, 0.0, 1.0, side),
    ] {
        commands.spawn((
            Name::new("Wall"),
            ArenaGeometry,
            Mesh3d(meshes.add(Cuboid::new(width, wall_height, depth))),
            MeshMaterial3d(palette.wall.clone()),
            Transform::from_xyz(x, wall_height * 0.5, z),
            RigidBody::Static,
            Collider::cuboid(width, wall_height, depth),
            ground_layers(),
        ));
    }

    // Ramps: one walkable, one steep enough to slide down
    for (x, degrees) in [(-12.0, 25.0_f32), (12.0, 55.0_f32)] {
        commands.spawn((
            Name::new(format!("Slope {degrees}°")),
            ArenaGeometry,
            Mesh3d(meshes.add(Cuboid::new(4.0, 0.5, 8.0))),
            MeshMaterial3d(palette.slope.clone()),
            Transform::from_xyz(x, 1.5, 10.0)
                .with_rotation(Quat::from_rotation_x(degrees.to_radians())),
            RigidBody::Static,
            Collider::cuboid(4.0, 0.5, 8.0),
            ground_layers(),
        ));
    }

    // Pillar for wall jumps
    commands.spawn((
        Name::new("Pillar"),
        ArenaGeometry,
        Mesh3d(meshes.add(Cuboid::new(2.0, 8.0, 2.0))),
        MeshMaterial3d(palette.wall.clone()),
        Transform::from_xyz(6.0, 4.0, -6.0),
        RigidBody::Static,
        Collider::cuboid(2.0, 8.0, 2.0),
        ground_layers(),
    ));
}

fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ArenaConfig,
    stamina: &StaminaTuning,
    casting: &CastingTuning,
    combat: &CombatTuning,
) {
    let body = CharacterBody::default();
    let length = (body.half_height - body.radius) * 2.0;

    commands.spawn((
        Name::new("Player"),
        // Identity & Movement
        (
            Player,
            Locomotion::new(),
            body,
            SurfaceContacts::default(),
            StaminaPool::from_tuning(stamina),
            ReportedStamina::default(),
            Caster::from_tuning(casting),
            ActionRecovery::default(),
        ),
        // Combat & Interaction
        (
            Health::new(combat.player_max_health),
            Invulnerable::default(),
            MeleeState::new(combat.attack_cooldown),
            Guard::default(),
            Interactor::default(),
            Inventory::default(),
        ),
        // Rendering
        (
            Mesh3d(meshes.add(Capsule3d::new(body.radius, length))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
            Transform::from_translation(config.player_spawn),
        ),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::capsule(body.radius, length),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Locomotion applies its own gravity
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Enemy]),
        ),
    ));
}

fn spawn_enemies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ArenaConfig,
    combat: &CombatTuning,
) {
    let mesh = meshes.add(Capsule3d::new(0.4, 1.0));
    let points = scatter_points(config, ScatterKind::Enemies, config.enemy_count);

    for (i, point) in points.into_iter().enumerate() {
        // Alternate weaknesses so both swing directions matter
        let (weakness, color) = if i % 2 == 0 {
            (SwingDirection::Horizontal, Color::srgb(0.8, 0.25, 0.2))
        } else {
            (SwingDirection::Vertical, Color::srgb(0.6, 0.2, 0.6))
        };

        commands.spawn((
            Name::new(format!("Enemy {i}")),
            (
                Enemy,
                EnemyBrain::new(
                    combat.enemy_detection_range,
                    combat.enemy_attack_range,
                    combat.enemy_attack_cooldown,
                ),
                Health::new(combat.enemy_max_health),
                DirectionalWeakness(weakness),
            ),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(color)),
            Transform::from_xyz(point.x, 1.0, point.y),
            (
                RigidBody::Dynamic,
                Collider::capsule(0.4, 1.0),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                CollisionLayers::new(
                    GameLayer::Enemy,
                    [GameLayer::Ground, GameLayer::Player, GameLayer::Enemy],
                ),
            ),
        ));
    }
}

/// Spawns pickups, a talking friendly, and the gate lever. Returns the lever.
fn spawn_interactables(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &ArenaConfig,
) -> Entity {
    let sensor_layers = CollisionLayers::new(GameLayer::Interactable, [GameLayer::Player]);

    // Each interactable owns its material so highlighting tints only itself
    let herb_mesh = meshes.add(Sphere::new(0.3));
    for (i, point) in scatter_points(config, ScatterKind::Pickups, config.pickup_count)
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(format!("Herb {i}")),
            Interactable::new("Moonherb", "Pick up"),
            Pickup {
                item: "moonherb".to_string(),
                quantity: 1,
                despawn_on_pickup: i % 2 == 0,
            },
            Mesh3d(herb_mesh.clone()),
            MeshMaterial3d(materials.add(Color::srgb(0.4, 0.8, 0.5))),
            Transform::from_xyz(point.x, 0.3, point.y),
            Visibility::default(),
            RigidBody::Static,
            Collider::sphere(0.3),
            Sensor,
            sensor_layers,
        ));
    }

    commands.spawn((
        Name::new("Hermit"),
        Friendly,
        Interactable::new("Hermit", "Talk").with_priority(1),
        Dialogue::new(vec![
            "Runes answer to rhythm, not to haste.".to_string(),
            "Element first, then shape. Everything else bends the result.".to_string(),
            "Hold the cast to aim it yourself.".to_string(),
        ]),
        Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.6, 0.9))),
        Transform::from_xyz(-3.0, 0.9, -4.0),
        Visibility::default(),
        RigidBody::Static,
        Collider::capsule(0.4, 1.0),
        sensor_layers,
    ));

    commands
        .spawn((
            Name::new("Gate Lever"),
            Interactable::new("Lever", "Pull").with_distance(1.5),
            Lever::default(),
            Mesh3d(meshes.add(Cuboid::new(0.3, 1.2, 0.3))),
            MeshMaterial3d(materials.add(Color::srgb(0.7, 0.6, 0.2))),
            Transform::from_xyz(4.0, 0.6, -config.half_extent * 0.5 + 2.0),
            Visibility::default(),
            RigidBody::Static,
            Collider::cuboid(0.3, 1.2, 0.3),
            Sensor,
            sensor_layers,
        ))
        .id()
}

pub(crate) fn operate_gates(
    time: Res<Time>,
    mut toggles: MessageReader<LeverToggledEvent>,
    mut gates: Query<(&mut Gate, &mut Transform)>,
) {
    for event in toggles.read() {
        for (mut gate, _) in &mut gates {
            if gate.lever == event.lever {
                gate.open = event.on;
            }
        }
    }

    let step = GATE_SPEED * time.delta_secs();
    for (gate, mut transform) in &mut gates {
        let target = if gate.open {
            gate.closed_y - GATE_HEIGHT
        } else {
            gate.closed_y
        };
        let y = transform.translation.y;
        transform.translation.y = y + (target - y).clamp(-step, step);
    }
}
