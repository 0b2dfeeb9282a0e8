//! Combat domain: player swings, enemy strikes, and damage resolution.

use std::collections::HashSet;

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    Dead, DespawnTimer, DirectionalWeakness, Enemy, EnemyBrain, EnemyIntent, Guard, Health,
    Invulnerable, MeleeState,
};
use crate::combat::damage::{HitContext, deliver, final_damage, guard_covers};
use crate::combat::events::{
    DamageEvent, DeathEvent, HealthChangedEvent, SwingDirectionChangedEvent,
};
use crate::combat::resources::{CombatInput, CombatTuning};
use crate::core::ActionRecovery;
use crate::magic::Caster;
use crate::movement::{GameLayer, Player};
use crate::stamina::{StaminaPool, StaminaTuning};

pub(crate) const TOGGLE_DIRECTION_KEY: KeyCode = KeyCode::KeyQ;

/// Upper bound on targets struck by a single sweep.
const MAX_SWEEP_HITS: u32 = 16;

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack_pressed = mouse.just_pressed(MouseButton::Left);
    input.toggle_direction_pressed = keyboard.just_pressed(TOGGLE_DIRECTION_KEY);
    input.block_pressed = mouse.just_pressed(MouseButton::Right);
    input.block_held = mouse.pressed(MouseButton::Right);
}

pub(crate) fn toggle_swing_direction(
    input: Res<CombatInput>,
    mut players: Query<(Entity, &mut MeleeState), (With<Player>, Without<Dead>)>,
    mut changed: MessageWriter<SwingDirectionChangedEvent>,
) {
    if !input.toggle_direction_pressed {
        return;
    }
    for (entity, mut melee) in &mut players {
        let direction = melee.toggle_direction();
        debug!("Swing direction -> {direction:?}");
        changed.write(SwingDirectionChangedEvent { entity, direction });
    }
}

pub(crate) fn update_guard(
    input: Res<CombatInput>,
    costs: Res<StaminaTuning>,
    mut players: Query<(Entity, &mut Guard, Option<&mut StaminaPool>), (With<Player>, Without<Dead>)>,
    mut warned: Local<HashSet<Entity>>,
) {
    for (entity, mut guard, pool) in &mut players {
        if !input.block_held {
            if guard.active {
                guard.active = false;
            }
            continue;
        }
        if !input.block_pressed {
            continue;
        }

        let Some(mut pool) = pool else {
            if warned.insert(entity) {
                warn!("{entity:?} has no StaminaPool; blocking disabled");
            }
            continue;
        };
        if pool.try_use(costs.block_cost) {
            guard.active = true;
        } else {
            debug!("{entity:?} too tired to block");
        }
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn perform_player_swings(
    time: Res<Time>,
    input: Res<CombatInput>,
    tuning: Res<CombatTuning>,
    spatial_query: SpatialQuery,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut MeleeState,
            &Guard,
            Option<&mut ActionRecovery>,
            Option<&Caster>,
        ),
        (With<Player>, Without<Dead>),
    >,
    targets: Query<(), (With<Health>, Without<Dead>)>,
    mut damage: MessageWriter<DamageEvent>,
) {
    if !input.attack_pressed {
        return;
    }

    for (entity, transform, mut melee, guard, recovery, caster) in &mut players {
        if guard.active
            || caster.is_some_and(|c| c.gesture.is_casting())
            || recovery.as_ref().is_some_and(|r| r.is_recovering())
        {
            continue;
        }
        if !melee.try_swing(time.elapsed_secs()) {
            continue;
        }
        if let Some(mut recovery) = recovery {
            recovery.start(tuning.basic_attack_recovery);
        }

        let forward = transform.forward();
        let Ok(direction) = Dir3::new(Vec3::new(forward.x, 0.0, forward.z)) else {
            continue;
        };
        let amount = tuning.swing_damage(melee.direction);
        let filter =
            SpatialQueryFilter::from_mask(GameLayer::Enemy).with_excluded_entities([entity]);
        let hits = spatial_query.shape_hits(
            &Collider::sphere(tuning.sweep_radius),
            transform.translation,
            Quat::IDENTITY,
            direction,
            MAX_SWEEP_HITS,
            &ShapeCastConfig::from_max_distance(tuning.attack_range),
            &filter,
        );

        debug!(
            "{entity:?} swings {:?} for {amount}, {} hit(s)",
            melee.direction,
            hits.len()
        );
        for hit in hits {
            if targets.contains(hit.entity) {
                damage.write(DamageEvent {
                    source: entity,
                    target: hit.entity,
                    amount,
                    swing: Some(melee.direction),
                    origin: transform.translation,
                });
            }
        }
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn update_enemies(
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    players: Query<(Entity, &Transform, Has<Dead>), (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (Entity, &mut Transform, &mut EnemyBrain, &mut LinearVelocity),
        (With<Enemy>, Without<Dead>, Without<Player>),
    >,
    mut damage: MessageWriter<DamageEvent>,
) {
    let dt = time.delta_secs();
    let player = players.single().ok();

    for (entity, mut transform, mut brain, mut velocity) in &mut enemies {
        let Some((player_entity, player_transform, player_dead)) = player else {
            velocity.x = 0.0;
            velocity.z = 0.0;
            continue;
        };

        let offset = player_transform.translation - transform.translation;
        let flat = Vec3::new(offset.x, 0.0, offset.z);
        let distance = if player_dead { f32::INFINITY } else { flat.length() };

        match brain.think(distance, dt) {
            EnemyIntent::Approach => {
                let heading = flat.normalize_or_zero();
                velocity.x = heading.x * tuning.enemy_move_speed;
                velocity.z = heading.z * tuning.enemy_move_speed;
            }
            intent => {
                velocity.x = 0.0;
                velocity.z = 0.0;
                if intent == EnemyIntent::Strike {
                    damage.write(DamageEvent {
                        source: entity,
                        target: player_entity,
                        amount: tuning.enemy_damage,
                        swing: None,
                        origin: transform.translation,
                    });
                }
            }
        }

        if flat.length_squared() > f32::EPSILON && distance.is_finite() {
            let target = transform.translation + flat;
            transform.look_at(target, Vec3::Y);
        }
    }
}

pub(crate) fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Invulnerable>) {
    let dt = time.delta_secs();
    for mut invuln in &mut query {
        if invuln.timer > 0.0 {
            invuln.timer = (invuln.timer - dt).max(0.0);
        }
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut health_changed: MessageWriter<HealthChangedEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    tuning: Res<CombatTuning>,
    mut query: Query<
        (
            &mut Health,
            &Transform,
            Option<&mut Invulnerable>,
            Option<&DirectionalWeakness>,
            Option<&Guard>,
        ),
        Without<Dead>,
    >,
) {
    for event in damage_events.read() {
        let Ok((mut health, transform, invuln, weakness, guard)) = query.get_mut(event.target)
        else {
            continue;
        };

        let blocked = guard.is_some_and(|g| g.active)
            && guard_covers(
                *transform.forward(),
                transform.translation,
                event.origin,
                tuning.block_angle,
            );
        let hit = HitContext {
            amount: event.amount,
            swing: event.swing,
            weakness: weakness.map(|w| w.0),
            invulnerable: invuln.as_ref().is_some_and(|i| i.is_invulnerable()),
            blocked,
        };
        let Some(amount) = final_damage(&hit, &tuning) else {
            continue;
        };

        let outcome = deliver(health.as_mut(), amount);
        if let Some(mut invuln) = invuln {
            invuln.timer = tuning.invincibility_time;
        }
        debug!(
            "{:?} took {} from {:?}{}",
            event.target,
            outcome.dealt,
            event.source,
            if blocked { " (blocked)" } else { "" }
        );
        health_changed.write(HealthChangedEvent {
            entity: event.target,
            fraction: outcome.fraction,
        });

        if outcome.killed {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    tuning: Res<CombatTuning>,
    mut query: Query<(Has<Enemy>, Has<Player>, Option<&mut LinearVelocity>)>,
) {
    for event in death_events.read() {
        let Ok((is_enemy, is_player, velocity)) = query.get_mut(event.entity) else {
            continue;
        };
        if let Some(mut velocity) = velocity {
            velocity.x = 0.0;
            velocity.z = 0.0;
        }

        let mut entity = commands.entity(event.entity);
        entity.insert(Dead);
        if is_enemy {
            // Off the enemy layer so sweeps and spells pass through the corpse
            entity.insert((
                DespawnTimer(tuning.corpse_lifetime),
                CollisionLayers::new(GameLayer::Default, [GameLayer::Ground]),
            ));
            info!("Enemy {:?} defeated", event.entity);
        }
        if is_player {
            info!("Player died");
        }
    }
}

pub(crate) fn despawn_corpses(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    let dt = time.delta_secs();
    for (entity, mut timer) in &mut query {
        timer.0 -= dt;
        if timer.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
