//! Interaction domain: detection, focus cycling, and per-kind interaction handlers.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;

use crate::combat::Dead;
use crate::interaction::components::{
    Dialogue, DialogueStep, Highlighted, Interactable, Interactor, Inventory, Lever, Pickup,
};
use crate::interaction::events::{
    DialogueLineEvent, FocusChangedEvent, InteractEvent, InteractionRangeEnteredEvent,
    InteractionRangeExitedEvent, LeverToggledEvent,
};
use crate::interaction::focus::{Candidate, ScrollDirection, rank};
use crate::interaction::resources::InteractionTuning;
use crate::magic::Caster;
use crate::movement::GameLayer;

pub(crate) const INTERACT_KEY: KeyCode = KeyCode::KeyE;

#[allow(clippy::too_many_arguments)]
pub(crate) fn detect_interactables(
    mut commands: Commands,
    tuning: Res<InteractionTuning>,
    spatial_query: SpatialQuery,
    mut interactors: Query<(Entity, &Transform, &mut Interactor, Has<Dead>)>,
    interactables: Query<(&Interactable, &Transform)>,
    mut entered: MessageWriter<InteractionRangeEnteredEvent>,
    mut exited: MessageWriter<InteractionRangeExitedEvent>,
    mut focus_changed: MessageWriter<FocusChangedEvent>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Interactable);
    let sphere = Collider::sphere(tuning.detection_radius);

    for (interactor, transform, mut state, dead) in &mut interactors {
        let origin = transform.translation;
        let candidates = if dead {
            Vec::new()
        } else {
            spatial_query
                .shape_intersections(&sphere, origin, Quat::IDENTITY, &filter)
                .into_iter()
                .filter(|&entity| entity != interactor)
                .filter_map(|entity| {
                    let (interactable, target) = interactables.get(entity).ok()?;
                    let distance = origin.distance(target.translation);
                    (interactable.can_interact && distance <= interactable.interaction_distance)
                        .then_some(Candidate {
                            entity,
                            priority: interactable.priority,
                            distance,
                        })
                })
                .collect()
        };

        let diff = state.focus.update(rank(candidates));

        for target in diff.exited {
            if let Ok(mut entity) = commands.get_entity(target) {
                entity.remove::<Highlighted>();
            }
            exited.write(InteractionRangeExitedEvent { interactor, target });
        }
        for target in diff.entered {
            commands.entity(target).insert(Highlighted);
            entered.write(InteractionRangeEnteredEvent { interactor, target });
        }
        if let Some(focused) = diff.focus_changed {
            debug!("Interaction focus -> {focused:?}");
            focus_changed.write(FocusChangedEvent {
                interactor,
                focused,
            });
        }
    }
}

pub(crate) fn cycle_focus(
    time: Res<Time>,
    scroll: Res<AccumulatedMouseScroll>,
    tuning: Res<InteractionTuning>,
    mut interactors: Query<(Entity, &mut Interactor), Without<Dead>>,
    mut focus_changed: MessageWriter<FocusChangedEvent>,
) {
    let direction = if scroll.delta.y > tuning.scroll_threshold {
        ScrollDirection::Previous
    } else if scroll.delta.y < -tuning.scroll_threshold {
        ScrollDirection::Next
    } else {
        return;
    };

    let now = time.elapsed_secs();
    for (interactor, mut state) in &mut interactors {
        if let Some(focused) = state.focus.scroll(direction, now, tuning.scroll_cooldown) {
            debug!("Interaction focus cycled -> {focused:?}");
            focus_changed.write(FocusChangedEvent {
                interactor,
                focused,
            });
        }
    }
}

pub(crate) fn request_interaction(
    keyboard: Res<ButtonInput<KeyCode>>,
    interactors: Query<(Entity, &Interactor, Option<&Caster>), Without<Dead>>,
    interactables: Query<&Interactable>,
    mut interact: MessageWriter<InteractEvent>,
) {
    if !keyboard.just_pressed(INTERACT_KEY) {
        return;
    }
    for (interactor, state, caster) in &interactors {
        if caster.is_some_and(|c| c.gesture.is_casting()) {
            continue;
        }
        let Some(target) = state.focus.focused() else {
            continue;
        };
        let Ok(interactable) = interactables.get(target) else {
            continue;
        };
        if !interactable.can_interact {
            continue;
        }
        info!("Interacting with {}", interactable.name);
        interact.write(InteractEvent { interactor, target });
    }
}

pub(crate) fn handle_pickups(
    mut commands: Commands,
    mut events: MessageReader<InteractEvent>,
    mut pickups: Query<(&Pickup, &mut Interactable, &mut Visibility)>,
    mut inventories: Query<&mut Inventory>,
) {
    for event in events.read() {
        let Ok((pickup, mut interactable, mut visibility)) = pickups.get_mut(event.target) else {
            continue;
        };
        if !interactable.can_interact {
            continue;
        }

        match inventories.get_mut(event.interactor) {
            Ok(mut inventory) => {
                if !inventory.add_item(&pickup.item, pickup.quantity) {
                    info!("Couldn't pick up {}: inventory full", pickup.item);
                    continue;
                }
            }
            Err(_) => warn!("{:?} has no Inventory; {} is lost", event.interactor, pickup.item),
        }
        info!("Picked up {}x {}", pickup.quantity, pickup.item);

        if pickup.despawn_on_pickup {
            commands.entity(event.target).despawn();
        } else {
            interactable.can_interact = false;
            *visibility = Visibility::Hidden;
        }
    }
}

pub(crate) fn handle_dialogue(
    time: Res<Time>,
    mut events: MessageReader<InteractEvent>,
    mut speakers: Query<(&mut Dialogue, &Interactable)>,
    mut lines: MessageWriter<DialogueLineEvent>,
) {
    for event in events.read() {
        let Ok((mut dialogue, interactable)) = speakers.get_mut(event.target) else {
            continue;
        };
        match dialogue.advance(time.elapsed_secs()) {
            DialogueStep::Line { index, text } => {
                info!("{}: {text}", interactable.name);
                lines.write(DialogueLineEvent {
                    speaker: event.target,
                    speaker_name: interactable.name.clone(),
                    index,
                    line: text,
                });
            }
            DialogueStep::Exhausted => info!("{} has nothing more to say", interactable.name),
            DialogueStep::CoolingDown => {}
        }
    }
}

pub(crate) fn handle_levers(
    mut events: MessageReader<InteractEvent>,
    mut levers: Query<(&mut Lever, &Interactable)>,
    mut toggled: MessageWriter<LeverToggledEvent>,
) {
    for event in events.read() {
        let Ok((mut lever, interactable)) = levers.get_mut(event.target) else {
            continue;
        };
        let on = lever.toggle();
        info!("{} switched {}", interactable.name, if on { "on" } else { "off" });
        toggled.write(LeverToggledEvent {
            lever: event.target,
            on,
        });
    }
}

pub(crate) fn tint_highlighted(
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<&MeshMaterial3d<StandardMaterial>, Added<Highlighted>>,
    mut removed: RemovedComponents<Highlighted>,
    all: Query<&MeshMaterial3d<StandardMaterial>, With<Interactable>>,
) {
    for handle in &added {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = LinearRgba::rgb(0.6, 0.5, 0.1);
        }
    }
    for entity in removed.read() {
        let Ok(handle) = all.get(entity) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = LinearRgba::BLACK;
        }
    }
}
