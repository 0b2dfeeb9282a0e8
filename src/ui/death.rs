//! UI domain: death screen presentation and retry flow.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::arena::ArenaConfig;
use crate::combat::{Dead, DeathEvent, Health, HealthChangedEvent};
use crate::movement::{Locomotion, Player};

/// Marker for the death screen overlay
#[derive(Component)]
pub struct DeathScreenUI;

/// Retry button on the death screen
#[derive(Component)]
pub struct RetryButton;

/// Resource to track if player has died (prevents multiple death screens)
#[derive(Resource, Default)]
pub struct PlayerDeathState {
    pub is_dead: bool,
}

pub(crate) fn detect_player_death(
    mut commands: Commands,
    mut deaths: MessageReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut death_state: ResMut<PlayerDeathState>,
    existing_death_screen: Query<Entity, With<DeathScreenUI>>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !deaths.read().any(|e| players.contains(e.entity)) || death_state.is_dead {
        return;
    }
    death_state.is_dead = true;

    // The retry button needs a free cursor
    if let Ok(mut cursor) = cursors.single_mut() {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
    if existing_death_screen.is_empty() {
        spawn_death_screen(&mut commands);
    }
}

fn caption(text: &'static str, size: f32, color: Color, margin: UiRect) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin,
            ..default()
        },
    )
}

fn spawn_death_screen(commands: &mut Commands) {
    commands
        .spawn((
            DeathScreenUI,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn(caption(
                "YOU DIED",
                72.0,
                Color::srgb(0.8, 0.15, 0.15),
                UiRect::bottom(Val::Px(40.0)),
            ));
            parent.spawn(caption(
                "The runes fall silent.",
                20.0,
                Color::srgb(0.6, 0.6, 0.6),
                UiRect::bottom(Val::Px(60.0)),
            ));
            parent
                .spawn((
                    RetryButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child(caption(
                    "RISE",
                    28.0,
                    Color::srgb(0.9, 0.9, 0.9),
                    UiRect::ZERO,
                ));
            parent.spawn(caption(
                "Press [Enter] or click to rise again",
                14.0,
                Color::srgb(0.4, 0.4, 0.45),
                UiRect::top(Val::Px(20.0)),
            ));
        });
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn handle_retry_button(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    arena: Res<ArenaConfig>,
    button_query: Query<&Interaction, (With<RetryButton>, Changed<Interaction>)>,
    death_screen_query: Query<Entity, With<DeathScreenUI>>,
    mut death_state: ResMut<PlayerDeathState>,
    mut player_query: Query<
        (
            Entity,
            &mut Health,
            &mut Transform,
            &mut Locomotion,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
    mut health_changed: MessageWriter<HealthChangedEvent>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let should_retry = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || button_query
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);

    if !should_retry || !death_state.is_dead {
        return;
    }

    death_state.is_dead = false;
    if let Ok(mut cursor) = cursors.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
    for entity in &death_screen_query {
        commands.entity(entity).despawn();
    }

    // Back on your feet at the arena spawn
    for (entity, mut health, mut transform, mut locomotion, mut velocity) in &mut player_query {
        health.current = health.max;
        transform.translation = arena.player_spawn;
        *locomotion = Locomotion::new();
        velocity.0 = Vec3::ZERO;
        commands.entity(entity).remove::<Dead>();
        health_changed.write(HealthChangedEvent {
            entity,
            fraction: 1.0,
        });
        info!("Player revived");
    }
}
