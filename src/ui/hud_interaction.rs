//! UI domain: interaction prompt and dialogue subtitles.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::interaction::{DialogueLineEvent, FocusChangedEvent, Interactable};
use crate::movement::Player;

pub(crate) const SUBTITLE_SECONDS: f32 = 3.0;

#[derive(Component)]
pub struct InteractionPromptText;

/// Dialogue subtitle; hides itself when the timer runs out.
#[derive(Component, Default)]
pub struct DialogueSubtitle {
    pub remaining: f32,
}

pub(crate) fn spawn_interaction_ui(mut commands: Commands) {
    commands.spawn((
        InteractionPromptText,
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.95, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(55.0),
            top: Val::Percent(50.0),
            ..default()
        },
    ));

    commands.spawn((
        DialogueSubtitle::default(),
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(140.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
    ));
}

pub(crate) fn update_interaction_prompt(
    mut events: MessageReader<FocusChangedEvent>,
    players: Query<(), With<Player>>,
    interactables: Query<&Interactable>,
    mut prompt: Query<&mut Text, With<InteractionPromptText>>,
) {
    let Some(event) = events.read().filter(|e| players.contains(e.interactor)).last() else {
        return;
    };
    let line = event
        .focused
        .and_then(|target| interactables.get(target).ok())
        .map(|i| format!("[E] {}: {}", i.name, i.prompt))
        .unwrap_or_default();
    for mut text in &mut prompt {
        text.0 = line.clone();
    }
}

pub(crate) fn show_dialogue_lines(
    time: Res<Time>,
    mut events: MessageReader<DialogueLineEvent>,
    mut subtitles: Query<(&mut Text, &mut DialogueSubtitle)>,
) {
    let latest = events.read().last();
    for (mut text, mut subtitle) in &mut subtitles {
        if let Some(event) = latest {
            text.0 = format!("{}: {}", event.speaker_name, event.line);
            subtitle.remaining = SUBTITLE_SECONDS;
        } else if subtitle.remaining > 0.0 {
            subtitle.remaining -= time.delta_secs();
            if subtitle.remaining <= 0.0 {
                text.0.clear();
            }
        }
    }
}
