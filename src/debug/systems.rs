//! Debug domain: hotkeys and the player info overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{Dead, Enemy, Health, HealthChangedEvent, Invulnerable, MeleeState};
use crate::core::GameState;
use crate::debug::state::DebugState;
use crate::magic::{Caster, RuneBindings};
use crate::movement::{Locomotion, Player};
use crate::stamina::StaminaPool;

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut players: Query<(Entity, &mut Health), (With<Player>, Without<Enemy>)>,
    enemies: Query<Entity, (With<Enemy>, Without<Dead>)>,
    mut health_changed: MessageWriter<HealthChangedEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+I: Toggle invincibility
    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        let msg = if debug_state.invincible {
            "Invincibility ON"
        } else {
            "Invincibility OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    // Ctrl+O: Toggle debug info overlay
    if keyboard.just_pressed(KeyCode::KeyO) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Info overlay {}", if debug_state.show_info { "ON" } else { "OFF" });
    }

    // Ctrl+L: Full heal
    if keyboard.just_pressed(KeyCode::KeyL) {
        for (entity, mut health) in &mut players {
            health.current = health.max;
            health_changed.write(HealthChangedEvent {
                entity,
                fraction: 1.0,
            });
        }
        debug_state.set_message("Full Heal", 2.0);
        info!("[DEBUG] Full heal");
    }

    // Ctrl+K: Clear the arena of enemies
    if keyboard.just_pressed(KeyCode::KeyK) {
        let mut count = 0;
        for entity in &enemies {
            commands.entity(entity).despawn();
            count += 1;
        }
        debug_state.set_message(format!("Removed {count} enemies"), 2.0);
        info!("[DEBUG] Removed {} enemies", count);
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

/// Apply invincibility effect to player
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<&mut Invulnerable, With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }
    for mut invuln in &mut player_query {
        // Keep invulnerability frames active
        invuln.timer = 1.0;
    }
}

/// Update the debug info overlay with current player state
#[allow(clippy::too_many_arguments)]
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    game_state: Res<State<GameState>>,
    bindings: Option<Res<RuneBindings>>,
    player_query: Query<
        (&Transform, &Health, &Locomotion, &StaminaPool, &Caster, &MeleeState),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };
    let Some((transform, health, locomotion, stamina, caster, melee)) = player_query.iter().next()
    else {
        **text = format!("State: {:?}\nNo player", game_state.get());
        return;
    };

    let pos = transform.translation;
    let runes = bindings.map_or(0, |b| b.len());
    let message = debug_state
        .status_message
        .as_ref()
        .map_or(String::new(), |(msg, _)| format!("\n> {msg}"));
    **text = format!(
        "Pos: ({:.1}, {:.1}, {:.1})\nStatus: {:?}\nJump: {:?}\nHP: {:.0}/{:.0}\nStamina: {:.0}\n\
         Casting: {} rune(s), {:.0}%\nSwing: {:?}\nBound runes: {}\nState: {:?}\nInvincible: {}{}",
        pos.x,
        pos.y,
        pos.z,
        locomotion.status,
        locomotion.jump,
        health.current,
        health.max,
        stamina.current(),
        caster.sequence().len(),
        caster.progress() * 100.0,
        melee.direction,
        runes,
        game_state.get(),
        debug_state.invincible,
        message,
    );
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
