//! Core domain: pause toggling, shared timers, and scene lighting.

use bevy::prelude::*;

use crate::core::resources::ActionRecovery;
use crate::core::state::GameState;

pub(crate) const PAUSE_KEY: KeyCode = KeyCode::Escape;

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(PAUSE_KEY) {
        return;
    }
    match state.get() {
        GameState::Playing => {
            info!("Paused");
            next_state.set(GameState::Paused);
        }
        GameState::Paused => {
            info!("Resumed");
            next_state.set(GameState::Playing);
        }
        GameState::Boot => {}
    }
}

pub(crate) fn tick_action_recovery(time: Res<Time>, mut query: Query<&mut ActionRecovery>) {
    let dt = time.delta_secs();
    for mut recovery in &mut query {
        if recovery.is_recovering() {
            recovery.tick(dt);
        }
    }
}

pub(crate) fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
