//! Interaction domain: unit tests for ranking, focus diffs, and interactable kinds.

use bevy::prelude::*;

use super::{Candidate, Dialogue, DialogueStep, FocusList, Inventory, Lever, ScrollDirection, rank};

fn entities(n: u32) -> Vec<Entity> {
    let mut world = World::new();
    (0..n).map(|_| world.spawn_empty().id()).collect()
}

#[test]
fn test_rank_priority_then_distance() {
    let e = entities(3);
    // A (prio 0, 1.0), B (prio 1, 2.5), C (prio 0, 0.5) => [B, C, A]
    let ranked = rank(vec![
        Candidate {
            entity: e[0],
            priority: 0,
            distance: 1.0,
        },
        Candidate {
            entity: e[1],
            priority: 1,
            distance: 2.5,
        },
        Candidate {
            entity: e[2],
            priority: 0,
            distance: 0.5,
        },
    ]);
    assert_eq!(ranked, vec![e[1], e[2], e[0]]);
}

#[test]
fn test_first_update_enters_and_focuses_head() {
    let e = entities(2);
    let mut focus = FocusList::default();

    let diff = focus.update(vec![e[0], e[1]]);
    assert_eq!(diff.entered, vec![e[0], e[1]]);
    assert!(diff.exited.is_empty());
    assert_eq!(diff.focus_changed, Some(Some(e[0])));
    assert_eq!(focus.focused(), Some(e[0]));
}

#[test]
fn test_unchanged_list_emits_nothing() {
    let e = entities(2);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1]]);

    let diff = focus.update(vec![e[0], e[1]]);
    assert!(diff.entered.is_empty());
    assert!(diff.exited.is_empty());
    assert_eq!(diff.focus_changed, None);
}

#[test]
fn test_single_exit_when_one_leaves() {
    let e = entities(3);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1], e[2]]);

    let diff = focus.update(vec![e[0], e[2]]);
    assert_eq!(diff.exited, vec![e[1]]);
    assert!(diff.entered.is_empty());
    assert_eq!(diff.focus_changed, None);

    // Leaving again does not repeat the exit
    let diff = focus.update(vec![e[0], e[2]]);
    assert!(diff.exited.is_empty());
}

#[test]
fn test_swap_fires_one_exit_and_one_enter() {
    let e = entities(3);
    let (a, b, c) = (e[0], e[1], e[2]);
    let mut focus = FocusList::default();
    focus.update(vec![a, c]);

    // A leaves while B arrives in the same tick
    let diff = focus.update(vec![c, b]);
    assert_eq!(diff.exited, vec![a]);
    assert_eq!(diff.entered, vec![b]);

    let diff = focus.update(vec![c, b]);
    assert!(diff.exited.is_empty());
    assert!(diff.entered.is_empty());
}

#[test]
fn test_reorder_is_not_enter_or_exit() {
    let e = entities(2);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1]]);

    let diff = focus.update(vec![e[1], e[0]]);
    assert!(diff.entered.is_empty());
    assert!(diff.exited.is_empty());
    assert_eq!(diff.focus_changed, Some(Some(e[1])));
}

#[test]
fn test_cursor_clamps_when_list_shrinks() {
    let e = entities(3);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1], e[2]]);
    focus.scroll(ScrollDirection::Next, 0.0, 0.1);
    focus.scroll(ScrollDirection::Next, 1.0, 0.1);
    assert_eq!(focus.cursor(), 2);

    let diff = focus.update(vec![e[0], e[1]]);
    assert_eq!(focus.cursor(), 1);
    assert_eq!(diff.focus_changed, Some(Some(e[1])));

    let diff = focus.update(Vec::new());
    assert_eq!(focus.cursor(), 0);
    assert_eq!(diff.focus_changed, Some(None));
    assert_eq!(diff.exited, vec![e[0], e[1]]);
}

#[test]
fn test_scroll_wraps_both_ways() {
    let e = entities(3);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1], e[2]]);

    assert_eq!(focus.scroll(ScrollDirection::Previous, 0.0, 0.1), Some(Some(e[2])));
    assert_eq!(focus.scroll(ScrollDirection::Next, 1.0, 0.1), Some(Some(e[0])));
}

#[test]
fn test_scroll_rate_limited() {
    let e = entities(2);
    let mut focus = FocusList::default();
    focus.update(vec![e[0], e[1]]);

    assert!(focus.scroll(ScrollDirection::Next, 1.0, 0.1).is_some());
    assert!(focus.scroll(ScrollDirection::Next, 1.05, 0.1).is_none());
    assert_eq!(focus.focused(), Some(e[1]));
    assert!(focus.scroll(ScrollDirection::Next, 1.2, 0.1).is_some());
}

#[test]
fn test_scroll_needs_two_entries() {
    let e = entities(1);
    let mut focus = FocusList::default();
    focus.update(vec![e[0]]);
    assert!(focus.scroll(ScrollDirection::Next, 0.0, 0.1).is_none());
}

#[test]
fn test_inventory_stacks_and_fills() {
    let mut inventory = Inventory::new(1);
    assert!(inventory.add_item("herb", 1));
    assert!(inventory.add_item("herb", 2));
    assert_eq!(inventory.count("herb"), 3);
    assert!(!inventory.add_item("stone", 1));
    assert_eq!(inventory.slots_used(), 1);

    assert!(!inventory.remove_item("herb", 4));
    assert!(inventory.remove_item("herb", 3));
    assert_eq!(inventory.count("herb"), 0);
    assert_eq!(inventory.slots_used(), 0);
}

#[test]
fn test_dialogue_advances_and_wraps() {
    let mut dialogue = Dialogue::new(vec!["Hello".into(), "Bye".into()]);
    dialogue.cooldown = 0.0;

    assert_eq!(
        dialogue.advance(0.0),
        DialogueStep::Line {
            index: 0,
            text: "Hello".into()
        }
    );
    assert_eq!(
        dialogue.advance(1.0),
        DialogueStep::Line {
            index: 1,
            text: "Bye".into()
        }
    );
    assert!(matches!(dialogue.advance(2.0), DialogueStep::Line { index: 0, .. }));
}

#[test]
fn test_dialogue_cooldown_and_exhaustion() {
    let mut dialogue = Dialogue::new(vec!["Only line".into()]);
    dialogue.repeatable = false;

    assert!(matches!(dialogue.advance(0.0), DialogueStep::Line { .. }));
    assert_eq!(dialogue.advance(0.5), DialogueStep::CoolingDown);
    assert_eq!(dialogue.advance(2.0), DialogueStep::Exhausted);
}

#[test]
fn test_lever_toggles() {
    let mut lever = Lever::default();
    assert!(lever.toggle());
    assert!(!lever.toggle());
}
