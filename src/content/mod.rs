//! Content domain: rune and skill catalogs plus tuning overrides, loaded from
//! RON files at startup.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{DataFile, GameplayDefaults};
pub use loader::{ContentLoadError, load_all_content, parse_data_file, parse_single};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

use std::path::Path;

use bevy::prelude::*;

use crate::core::GameState;
use crate::magic::RuneBindings;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

fn load_content(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    let registry = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok((registry, defaults)) => {
            info!("{}", registry.summary());
            for problem in validate_content(&registry) {
                warn!("Content validation: {problem}");
            }
            apply_defaults(&mut commands, defaults);
            registry
        }
        Err(errors) => {
            for e in &errors {
                error!("{e}");
            }
            warn!("Running with built-in tuning and an empty catalog");
            ContentRegistry::default()
        }
    };

    let (bindings, unknown) = RuneBindings::from_defs(&registry.runes);
    for id in unknown {
        warn!("Rune '{id}' has no usable key binding");
    }
    info!("{} rune keys bound", bindings.len());

    commands.insert_resource(bindings);
    commands.insert_resource(registry);
    next_state.set(GameState::Playing);
}

fn apply_defaults(commands: &mut Commands, defaults: GameplayDefaults) {
    commands.insert_resource(defaults.movement);
    commands.insert_resource(defaults.stamina);
    commands.insert_resource(defaults.casting);
    commands.insert_resource(defaults.combat);
    commands.insert_resource(defaults.interaction);
    commands.insert_resource(defaults.camera);
}
