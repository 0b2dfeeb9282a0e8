//! Interaction domain: interactable kinds and the interactor's state.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::interaction::focus::FocusList;

/// Something the player can focus and interact with. Each kind (pickup,
/// dialogue, lever) adds its own component next to this one.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub name: String,
    pub prompt: String,
    pub can_interact: bool,
    /// Max distance from the interactor, on top of the detection radius
    pub interaction_distance: f32,
    pub priority: i32,
}

impl Interactable {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            can_interact: true,
            interaction_distance: 2.0,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.interaction_distance = distance;
        self
    }
}

/// Entity that scans for interactables (the player).
#[derive(Component, Debug, Default)]
pub struct Interactor {
    pub focus: FocusList,
}

/// Set on interactables in range of the player.
#[derive(Component, Debug)]
pub struct Highlighted;

#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub item: String,
    pub quantity: u32,
    /// Otherwise the pickup is hidden and disabled
    pub despawn_on_pickup: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Inventory {
    items: HashMap<String, u32>,
    max_slots: usize,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            items: HashMap::new(),
            max_slots,
        }
    }

    /// Stacks onto an existing slot or opens a new one; false when full.
    pub fn add_item(&mut self, item: &str, quantity: u32) -> bool {
        if let Some(count) = self.items.get_mut(item) {
            *count += quantity;
            return true;
        }
        if self.items.len() >= self.max_slots {
            return false;
        }
        self.items.insert(item.to_string(), quantity);
        true
    }

    pub fn remove_item(&mut self, item: &str, quantity: u32) -> bool {
        let Some(count) = self.items.get_mut(item) else {
            return false;
        };
        if *count < quantity {
            return false;
        }
        *count -= quantity;
        if *count == 0 {
            self.items.remove(item);
        }
        true
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn slots_used(&self) -> usize {
        self.items.len()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(20)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogueStep {
    Line { index: usize, text: String },
    /// Non-repeatable dialogue already finished
    Exhausted,
    CoolingDown,
}

/// One line per interaction; wraps to the start when repeatable.
#[derive(Component, Debug, Clone)]
pub struct Dialogue {
    pub lines: Vec<String>,
    pub repeatable: bool,
    pub cooldown: f32,
    next_line: usize,
    last_spoken: Option<f32>,
}

impl Dialogue {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            repeatable: true,
            cooldown: 1.0,
            next_line: 0,
            last_spoken: None,
        }
    }

    pub fn advance(&mut self, now: f32) -> DialogueStep {
        if self.last_spoken.is_some_and(|last| now - last < self.cooldown) {
            return DialogueStep::CoolingDown;
        }
        if self.next_line >= self.lines.len() {
            if !self.repeatable || self.lines.is_empty() {
                return DialogueStep::Exhausted;
            }
            self.next_line = 0;
        }

        let index = self.next_line;
        self.next_line += 1;
        self.last_spoken = Some(now);
        DialogueStep::Line {
            index,
            text: self.lines[index].clone(),
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Lever {
    pub on: bool,
}

impl Lever {
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }
}
