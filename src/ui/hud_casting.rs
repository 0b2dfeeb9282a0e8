//! UI domain: casting panel with the typed rune sequence and time left.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::magic::{Caster, CastingEndedEvent, CastingStartedEvent, RuneSequenceChangedEvent};
use crate::movement::Player;

#[derive(Component)]
pub struct CastingPanelUI;

#[derive(Component)]
pub struct RuneSequenceText;

#[derive(Component)]
pub struct CastingProgressFill;

pub(crate) fn spawn_casting_panel_ui(mut commands: Commands) {
    commands
        .spawn((
            CastingPanelUI,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(80.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                RuneSequenceText,
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.85, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(240.0),
                        height: Val::Px(8.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.8)),
                ))
                .with_child((
                    CastingProgressFill,
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.5, 0.6, 1.0)),
                ));
        });
}

pub(crate) fn toggle_casting_panel(
    mut started: MessageReader<CastingStartedEvent>,
    mut ended: MessageReader<CastingEndedEvent>,
    players: Query<(), With<Player>>,
    mut panel: Query<&mut Visibility, With<CastingPanelUI>>,
    mut text: Query<&mut Text, With<RuneSequenceText>>,
) {
    let mut show = None;
    if started.read().any(|e| players.contains(e.caster)) {
        show = Some(true);
    }
    if ended.read().any(|e| players.contains(e.caster)) {
        show = Some(false);
    }
    let Some(show) = show else {
        return;
    };

    for mut visibility in &mut panel {
        *visibility = if show {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut text in &mut text {
        text.0.clear();
    }
}

pub(crate) fn update_rune_sequence_text(
    mut events: MessageReader<RuneSequenceChangedEvent>,
    players: Query<(), With<Player>>,
    mut text: Query<&mut Text, With<RuneSequenceText>>,
) {
    let Some(event) = events.read().filter(|e| players.contains(e.caster)).last() else {
        return;
    };
    let labels: Vec<String> = event.runes.iter().map(|r| r.label()).collect();
    for mut text in &mut text {
        text.0 = labels.join(" · ");
    }
}

pub(crate) fn update_casting_progress(
    casters: Query<&Caster, With<Player>>,
    mut fill: Query<&mut Node, With<CastingProgressFill>>,
) {
    let Ok(caster) = casters.single() else {
        return;
    };
    // Bar shows time remaining
    let remaining = if caster.gesture.is_casting() {
        1.0 - caster.progress()
    } else {
        0.0
    };
    for mut node in &mut fill {
        node.width = Val::Percent(remaining * 100.0);
    }
}
