//! Magic domain: casting input, spell spawning, and effect simulation.

use std::collections::HashSet;

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::combat::{DamageEvent, Dead, Enemy};
use crate::content::ContentRegistry;
use crate::core::ActionRecovery;
use crate::magic::components::{Caster, Friendly, ImpactFlash, SpellEffect};
use crate::magic::events::{
    CastingEndedEvent, CastingModeEnteredEvent, CastingModeExitedEvent, CastingStartedEvent,
    RuneSequenceChangedEvent, SpellCastEvent,
};
use crate::magic::gesture::{CancelReason, CastSignal, GestureInput};
use crate::magic::resolver::{CastingMode, EffectDef, EffectShape};
use crate::magic::resources::{CastingTuning, RuneBindings};
use crate::magic::runes::TraitType;
use crate::magic::targeting::{TargetingContext, nearest_within, plan_spawn};
use crate::movement::GameLayer;

pub(crate) const CAST_KEY: KeyCode = KeyCode::KeyR;

/// Turn rate toward the nearest enemy for homing spells, in radians per second.
const HOMING_TURN_RATE: f32 = 4.0;

#[derive(Default)]
pub(crate) struct CastWarnings {
    missing_catalog: bool,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn process_cast_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Option<Res<RuneBindings>>,
    registry: Option<Res<ContentRegistry>>,
    mut casters: Query<(Entity, &mut Caster, Option<&mut ActionRecovery>, Has<Dead>)>,
    mut started: MessageWriter<CastingStartedEvent>,
    mut ended: MessageWriter<CastingEndedEvent>,
    mut sequence_changed: MessageWriter<RuneSequenceChangedEvent>,
    mut mode_entered: MessageWriter<CastingModeEnteredEvent>,
    mut mode_exited: MessageWriter<CastingModeExitedEvent>,
    mut spell_cast: MessageWriter<SpellCastEvent>,
    mut warnings: Local<CastWarnings>,
) {
    let dt = time.delta_secs();
    let catalog = registry.as_deref().map(|r| r.skills.as_slice()).unwrap_or(&[]);
    if registry.is_none() && !warnings.missing_catalog {
        warnings.missing_catalog = true;
        warn!("No ContentRegistry; every cast will fail to match");
    }

    let runes_pressed = bindings
        .as_deref()
        .map(|b| b.just_pressed(&keyboard))
        .unwrap_or_default();

    for (entity, mut caster, mut recovery, dead) in &mut casters {
        let signals = if dead {
            caster.gesture.cancel_session(CancelReason::Interrupted)
        } else {
            let input = GestureInput {
                cast_pressed: keyboard.just_pressed(CAST_KEY),
                cast_released: keyboard.just_released(CAST_KEY),
                runes_pressed: runes_pressed.clone(),
                recovering: recovery.as_ref().is_some_and(|r| r.is_recovering()),
            };
            caster.gesture.tick(&input, catalog, dt)
        };

        for signal in signals {
            match signal {
                CastSignal::Started => {
                    debug!("{entity:?} started casting");
                    started.write(CastingStartedEvent { caster: entity });
                }
                CastSignal::SequenceChanged(runes) => {
                    debug!("{entity:?} rune sequence: {runes:?}");
                    sequence_changed.write(RuneSequenceChangedEvent {
                        caster: entity,
                        runes,
                    });
                }
                CastSignal::ModeEntered(mode) => {
                    mode_entered.write(CastingModeEnteredEvent {
                        caster: entity,
                        mode,
                    });
                }
                CastSignal::ModeExited(mode) => {
                    mode_exited.write(CastingModeExitedEvent {
                        caster: entity,
                        mode,
                    });
                }
                CastSignal::Cast { spell, gesture } => {
                    info!(
                        "{entity:?} cast '{}' ({gesture:?}, {:?})",
                        spell.skill_name, spell.casting_mode
                    );
                    if let Some(recovery) = recovery.as_mut() {
                        recovery.start(spell.recovery_time);
                    }
                    spell_cast.write(SpellCastEvent {
                        caster: entity,
                        spell,
                        gesture,
                    });
                }
                CastSignal::Cancelled(CancelReason::Rejected(err)) => {
                    warn!("{entity:?} cast cancelled: {err}");
                }
                CastSignal::Cancelled(reason) => {
                    debug!("{entity:?} cast cancelled: {reason:?}");
                }
                CastSignal::Ended { completed } => {
                    ended.write(CastingEndedEvent {
                        caster: entity,
                        completed,
                    });
                }
            }
        }
    }
}

/// Pushes reloaded casting tuning into every caster.
pub(crate) fn apply_casting_tuning(tuning: Res<CastingTuning>, mut casters: Query<&mut Caster>) {
    if !tuning.is_changed() || tuning.is_added() {
        return;
    }
    for mut caster in &mut casters {
        caster
            .gesture
            .set_timing(tuning.max_casting_time, tuning.hold_threshold);
    }
}

fn effect_mesh(effect: &EffectDef, radius: f32) -> Mesh {
    match effect.shape {
        EffectShape::Sphere => Sphere::new(radius).into(),
        EffectShape::Cube => Cuboid::from_length(radius * 2.0).into(),
    }
}

fn effect_material(effect: &EffectDef) -> StandardMaterial {
    let (r, g, b) = effect.color;
    StandardMaterial {
        base_color: Color::linear_rgb(r, g, b),
        emissive: LinearRgba::rgb(r * 2.0, g * 2.0, b * 2.0),
        ..default()
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn spawn_spell_effects(
    mut commands: Commands,
    mut casts: MessageReader<SpellCastEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<CastingTuning>,
    spatial_query: SpatialQuery,
    casters: Query<&Transform, With<Caster>>,
    camera: Query<&Transform, (With<CameraRig>, Without<Caster>)>,
    enemies: Query<&Transform, (With<Enemy>, Without<Dead>, Without<Caster>)>,
    friendlies: Query<&Transform, (With<Friendly>, Without<Caster>)>,
) {
    let camera = camera.single().ok();

    for cast in casts.read() {
        let Ok(caster) = casters.get(cast.caster) else {
            continue;
        };
        let spell = &cast.spell;
        let aim_direction = camera.map(|c| *c.forward()).unwrap_or(*caster.forward());

        let aim_point = match (spell.casting_mode, camera) {
            (CastingMode::TargetPoint, Some(camera)) => {
                let filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
                spatial_query
                    .cast_ray(
                        camera.translation,
                        camera.forward(),
                        tuning.aim_distance,
                        true,
                        &filter,
                    )
                    .map(|hit| camera.translation + *camera.forward() * hit.distance)
            }
            _ => None,
        };

        let lock_target = match spell.casting_mode {
            CastingMode::LockOnEnemy => nearest_within(
                caster.translation,
                enemies.iter().map(|t| t.translation),
                tuning.lock_on_range,
            ),
            CastingMode::LockOnFriendly => nearest_within(
                caster.translation,
                friendlies.iter().map(|t| t.translation),
                tuning.lock_on_range,
            ),
            _ => None,
        };

        let plan = plan_spawn(
            spell.casting_mode,
            &TargetingContext {
                caster_position: caster.translation,
                caster_forward: *caster.forward(),
                aim_direction,
                aim_point,
                lock_target,
                spawn_distance: tuning.spawn_distance,
            },
        );

        let radius = spell.effect.radius * spell.properties.size;
        commands.spawn((
            Name::new(format!("Spell: {}", spell.skill_name)),
            SpellEffect {
                caster: cast.caster,
                skill_id: spell.skill_id.clone(),
                properties: spell.properties,
                direction: plan.direction,
                travels: plan.travels,
                piercing: spell.has_trait(TraitType::Piercing),
                homing: spell.has_trait(TraitType::Homing),
                age: 0.0,
                traveled: 0.0,
                struck: HashSet::new(),
            },
            Mesh3d(meshes.add(effect_mesh(&spell.effect, radius))),
            MeshMaterial3d(materials.add(effect_material(&spell.effect))),
            Transform::from_translation(plan.position).looking_to(plan.direction, Vec3::Y),
        ));
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn advance_spell_effects(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CastingTuning>,
    spatial_query: SpatialQuery,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut effects: Query<(Entity, &mut Transform, &mut SpellEffect)>,
    enemies: Query<&Transform, (With<Enemy>, Without<Dead>, Without<SpellEffect>)>,
    mut damage: MessageWriter<DamageEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut effect) in &mut effects {
        effect.age += dt;

        if effect.travels {
            if effect.homing {
                if let Some(target) = nearest_within(
                    transform.translation,
                    enemies.iter().map(|t| t.translation),
                    effect.properties.range,
                ) {
                    let desired = (target - transform.translation).normalize_or(effect.direction);
                    let turn = (HOMING_TURN_RATE * dt).min(1.0);
                    effect.direction = effect.direction.lerp(desired, turn).normalize_or(desired);
                }
            }
            let step = effect.properties.speed * dt;
            transform.translation += effect.direction * step;
            effect.traveled += step;
        }

        if effect.expired() {
            commands.entity(entity).despawn();
            continue;
        }

        // Utility spells (no power) never strike
        if effect.properties.power <= 0.0 {
            continue;
        }

        let radius = tuning.hit_radius * effect.properties.size;
        let filter = SpatialQueryFilter::from_mask(GameLayer::Enemy)
            .with_excluded_entities([effect.caster]);
        let hits = spatial_query.shape_intersections(
            &Collider::sphere(radius),
            transform.translation,
            Quat::IDENTITY,
            &filter,
        );

        for target in hits {
            if !effect.struck.insert(target) {
                continue;
            }
            damage.write(DamageEvent {
                source: effect.caster,
                target,
                amount: effect.properties.power,
                swing: None,
                origin: transform.translation,
            });
            commands.spawn((
                ImpactFlash {
                    remaining: tuning.impact_flash_time,
                    lifetime: tuning.impact_flash_time,
                },
                Mesh3d(meshes.add(Sphere::new(radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(1.0, 0.9, 0.6, 0.8),
                    emissive: LinearRgba::rgb(4.0, 3.0, 1.5),
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                Transform::from_translation(transform.translation),
            ));

            if !effect.piercing {
                debug!("Spell '{}' hit {target:?}", effect.skill_id);
                commands.entity(entity).despawn();
                break;
            }
        }
    }
}

pub(crate) fn fade_impact_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut ImpactFlash, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash, mut transform) in &mut flashes {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let t = 1.0 - flash.remaining / flash.lifetime.max(f32::EPSILON);
        transform.scale = Vec3::splat(1.0 + t);
    }
}
