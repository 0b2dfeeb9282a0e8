//! UI domain: pause overlay.

use bevy::prelude::*;

#[derive(Component)]
pub struct PauseOverlayUI;

pub(crate) fn spawn_pause_overlay(mut commands: Commands) {
    commands
        .spawn((
            PauseOverlayUI,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            ZIndex(90),
        ))
        .with_child((
            Text::new("PAUSED  [Esc]"),
            TextFont {
                font_size: 48.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
        ));
}

pub(crate) fn despawn_pause_overlay(
    mut commands: Commands,
    overlays: Query<Entity, With<PauseOverlayUI>>,
) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}
