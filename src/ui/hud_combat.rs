//! UI domain: swing direction indicator.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{SwingDirection, SwingDirectionChangedEvent};
use crate::movement::Player;

#[derive(Component)]
pub struct SwingDirectionText;

fn label(direction: SwingDirection) -> &'static str {
    match direction {
        SwingDirection::Horizontal => "Swing: ↔ Horizontal [Q]",
        SwingDirection::Vertical => "Swing: ↕ Vertical [Q]",
    }
}

pub(crate) fn spawn_swing_direction_ui(mut commands: Commands) {
    commands.spawn((
        SwingDirectionText,
        Text::new(label(SwingDirection::default())),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            bottom: Val::Px(16.0),
            ..default()
        },
    ));
}

pub(crate) fn update_swing_direction(
    mut events: MessageReader<SwingDirectionChangedEvent>,
    players: Query<(), With<Player>>,
    mut text: Query<&mut Text, With<SwingDirectionText>>,
) {
    let Some(event) = events.read().filter(|e| players.contains(e.entity)).last() else {
        return;
    };
    for mut text in &mut text {
        text.0 = label(event.direction).to_string();
    }
}
