//! Interaction domain: the ranked list of nearby interactables and its focus cursor.

use std::cmp::Ordering;

use bevy::prelude::*;

/// An interactable that passed detection this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub priority: i32,
    pub distance: f32,
}

/// Orders candidates by priority (high first), then distance (near first).
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Entity> {
    candidates.sort_by(|a, b| match b.priority.cmp(&a.priority) {
        Ordering::Equal => a.distance.total_cmp(&b.distance),
        other => other,
    });
    candidates.into_iter().map(|c| c.entity).collect()
}

/// Result of replacing the nearby list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusDiff {
    pub entered: Vec<Entity>,
    pub exited: Vec<Entity>,
    /// Set when the focused entity changed; the inner value is the new focus
    pub focus_changed: Option<Option<Entity>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll up
    Previous,
    /// Scroll down
    Next,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusList {
    nearby: Vec<Entity>,
    cursor: usize,
    focused: Option<Entity>,
    last_scroll: Option<f32>,
}

impl FocusList {
    pub fn nearby(&self) -> &[Entity] {
        &self.nearby
    }

    pub fn focused(&self) -> Option<Entity> {
        self.focused
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the ranked list. Enter/exit are diffed by identity and
    /// the cursor is clamped into the new list.
    pub fn update(&mut self, ranked: Vec<Entity>) -> FocusDiff {
        if ranked == self.nearby {
            return FocusDiff::default();
        }

        let exited = self
            .nearby
            .iter()
            .copied()
            .filter(|e| !ranked.contains(e))
            .collect();
        let entered = ranked
            .iter()
            .copied()
            .filter(|e| !self.nearby.contains(e))
            .collect();

        self.nearby = ranked;
        FocusDiff {
            entered,
            exited,
            focus_changed: self.refocus(),
        }
    }

    /// Moves the cursor one step with wraparound. Needs at least two entries
    /// and `cooldown` seconds since the last accepted scroll.
    pub fn scroll(
        &mut self,
        direction: ScrollDirection,
        now: f32,
        cooldown: f32,
    ) -> Option<Option<Entity>> {
        if self.nearby.len() < 2 {
            return None;
        }
        if self.last_scroll.is_some_and(|last| now - last <= cooldown) {
            return None;
        }
        self.last_scroll = Some(now);

        let len = self.nearby.len();
        self.cursor = match direction {
            ScrollDirection::Next => (self.cursor + 1) % len,
            ScrollDirection::Previous => (self.cursor + len - 1) % len,
        };
        self.refocus()
    }

    fn refocus(&mut self) -> Option<Option<Entity>> {
        let focused = if self.nearby.is_empty() {
            self.cursor = 0;
            None
        } else {
            self.cursor = self.cursor.min(self.nearby.len() - 1);
            Some(self.nearby[self.cursor])
        };

        if focused == self.focused {
            return None;
        }
        self.focused = focused;
        Some(focused)
    }
}
