//! UI domain: player HUD health and stamina bars.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::HealthChangedEvent;
use crate::movement::Player;
use crate::stamina::StaminaChangedEvent;

pub(crate) const PLAYER_BAR_WIDTH: f32 = 200.0;
pub(crate) const PLAYER_BAR_HEIGHT: f32 = 20.0;
pub(crate) const PLAYER_BAR_PADDING: f32 = 16.0;

/// Marker for the player's HUD bar container
#[derive(Component)]
pub struct PlayerBarsUI;

/// Marker for the player's health bar fill element
#[derive(Component)]
pub struct PlayerHealthBarFill;

/// Marker for the player's stamina bar fill element
#[derive(Component)]
pub struct PlayerStaminaBarFill;

fn bar(parent: &mut ChildSpawnerCommands, height: f32, fill: impl Bundle) {
    parent
        .spawn((
            Node {
                width: Val::Px(PLAYER_BAR_WIDTH),
                height: Val::Px(height),
                border: UiRect::all(Val::Px(2.0)),
                margin: UiRect::bottom(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_child(fill);
}

pub(crate) fn spawn_player_bars_ui(mut commands: Commands) {
    // Root container positioned at top-left
    commands
        .spawn((
            PlayerBarsUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PLAYER_BAR_PADDING),
                top: Val::Px(PLAYER_BAR_PADDING),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|parent| {
            bar(
                parent,
                PLAYER_BAR_HEIGHT,
                (
                    PlayerHealthBarFill,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
                ),
            );
            bar(
                parent,
                PLAYER_BAR_HEIGHT * 0.6,
                (
                    PlayerStaminaBarFill,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.9, 0.75, 0.2)),
                ),
            );
        });
}

/// Green at full, yellow at half, red near empty.
pub(crate) fn health_color(fraction: f32) -> Color {
    if fraction > 0.5 {
        let t = (fraction - 0.5) * 2.0;
        Color::srgb(1.0 - t * 0.8, 0.8, 0.3 * (1.0 - t))
    } else {
        let t = fraction * 2.0;
        Color::srgb(0.9, 0.2 + t * 0.6, 0.2)
    }
}

pub(crate) fn update_player_healthbar(
    mut events: MessageReader<HealthChangedEvent>,
    players: Query<(), With<Player>>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<PlayerHealthBarFill>>,
) {
    let Some(fraction) = events
        .read()
        .filter(|e| players.contains(e.entity))
        .last()
        .map(|e| e.fraction)
    else {
        return;
    };

    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(fraction * 100.0);
        bg_color.0 = health_color(fraction);
    }
}

pub(crate) fn update_player_staminabar(
    mut events: MessageReader<StaminaChangedEvent>,
    players: Query<(), With<Player>>,
    mut fill_query: Query<&mut Node, With<PlayerStaminaBarFill>>,
) {
    let Some(fraction) = events
        .read()
        .filter(|e| players.contains(e.entity))
        .last()
        .map(|e| e.fraction)
    else {
        return;
    };

    for mut node in &mut fill_query {
        node.width = Val::Percent(fraction * 100.0);
    }
}
