//! Magic domain: the cast-key gesture state machine.
//!
//! Press the cast key to open a session, type runes, press again to resolve.
//! Letting go quickly fires a tap cast; holding past the threshold enters the
//! skill's casting mode and fires a hold cast on release.

use crate::magic::resolver::{CastError, CastingMode, ResolvedSpell, SkillDef, resolve};
use crate::magic::runes::Rune;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastGesture {
    Tap,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Session open, collecting runes
    Casting,
    /// Sequence resolved, cast key still down
    Armed { spell: ResolvedSpell, held_for: f32 },
    /// Held past the threshold; the skill's casting mode is active
    Held { spell: ResolvedSpell },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancelReason {
    /// Cast key pressed with no runes entered
    Empty,
    Timeout,
    /// Caster lost control (e.g. died)
    Interrupted,
    Rejected(CastError),
}

/// Side effects requested by one gesture tick.
#[derive(Debug, Clone, PartialEq)]
pub enum CastSignal {
    Started,
    SequenceChanged(Vec<Rune>),
    ModeEntered(CastingMode),
    ModeExited(CastingMode),
    Cast {
        spell: ResolvedSpell,
        gesture: CastGesture,
    },
    Cancelled(CancelReason),
    /// Session closed, after either a cast or a cancellation
    Ended { completed: bool },
}

/// Input edges sampled for one tick.
#[derive(Debug, Clone, Default)]
pub struct GestureInput {
    pub cast_pressed: bool,
    pub cast_released: bool,
    /// Runes whose key went down this tick
    pub runes_pressed: Vec<Rune>,
    /// Caster is in action recovery and may not open a session
    pub recovering: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastGestureController {
    phase: GesturePhase,
    runes: Vec<Rune>,
    elapsed: f32,
    max_casting_time: f32,
    hold_threshold: f32,
}

impl CastGestureController {
    pub fn new(max_casting_time: f32, hold_threshold: f32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            runes: Vec::new(),
            elapsed: 0.0,
            max_casting_time,
            hold_threshold,
        }
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    pub fn runes(&self) -> &[Rune] {
        &self.runes
    }

    pub fn is_casting(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// Fraction of the casting time limit used so far; 0 when idle.
    pub fn progress(&self) -> f32 {
        if !self.is_casting() || self.max_casting_time <= 0.0 {
            return 0.0;
        }
        (self.elapsed / self.max_casting_time).clamp(0.0, 1.0)
    }

    pub fn set_timing(&mut self, max_casting_time: f32, hold_threshold: f32) {
        self.max_casting_time = max_casting_time;
        self.hold_threshold = hold_threshold;
    }

    pub fn tick(&mut self, input: &GestureInput, catalog: &[SkillDef], dt: f32) -> Vec<CastSignal> {
        let mut signals = Vec::new();

        if self.phase == GesturePhase::Idle {
            if input.cast_pressed && !input.recovering {
                self.phase = GesturePhase::Casting;
                self.runes.clear();
                self.elapsed = 0.0;
                signals.push(CastSignal::Started);
            }
            return signals;
        }

        self.elapsed += dt;
        if self.elapsed > self.max_casting_time {
            self.cancel(CancelReason::Timeout, &mut signals);
            return signals;
        }

        match std::mem::take(&mut self.phase) {
            GesturePhase::Idle => {}
            GesturePhase::Casting => self.collect(input, catalog, &mut signals),
            GesturePhase::Armed { spell, held_for } => {
                if input.cast_released {
                    self.complete(spell, CastGesture::Tap, &mut signals);
                    return signals;
                }
                let held_for = held_for + dt;
                if held_for >= self.hold_threshold {
                    signals.push(CastSignal::ModeEntered(spell.casting_mode));
                    self.phase = GesturePhase::Held { spell };
                } else {
                    self.phase = GesturePhase::Armed { spell, held_for };
                }
            }
            GesturePhase::Held { spell } => {
                if input.cast_released {
                    signals.push(CastSignal::ModeExited(spell.casting_mode));
                    self.complete(spell, CastGesture::Hold, &mut signals);
                } else {
                    self.phase = GesturePhase::Held { spell };
                }
            }
        }
        signals
    }

    /// Cancels an open session from any sub-state.
    pub fn cancel_session(&mut self, reason: CancelReason) -> Vec<CastSignal> {
        let mut signals = Vec::new();
        if self.is_casting() {
            self.cancel(reason, &mut signals);
        }
        signals
    }

    fn collect(&mut self, input: &GestureInput, catalog: &[SkillDef], signals: &mut Vec<CastSignal>) {
        self.phase = GesturePhase::Casting;

        if !input.runes_pressed.is_empty() {
            self.runes.extend(input.runes_pressed.iter().copied());
            signals.push(CastSignal::SequenceChanged(self.runes.clone()));
        }

        if !input.cast_pressed {
            return;
        }
        if self.runes.is_empty() {
            self.cancel(CancelReason::Empty, signals);
            return;
        }

        match resolve(&self.runes, catalog) {
            // Press and release inside one frame
            Ok(spell) if input.cast_released => self.complete(spell, CastGesture::Tap, signals),
            Ok(spell) => {
                self.phase = GesturePhase::Armed {
                    spell,
                    held_for: 0.0,
                }
            }
            Err(err) => self.cancel(CancelReason::Rejected(err), signals),
        }
    }

    fn complete(&mut self, spell: ResolvedSpell, gesture: CastGesture, signals: &mut Vec<CastSignal>) {
        signals.push(CastSignal::Cast { spell, gesture });
        self.reset();
        signals.push(CastSignal::Ended { completed: true });
    }

    fn cancel(&mut self, reason: CancelReason, signals: &mut Vec<CastSignal>) {
        if let GesturePhase::Held { spell } = &self.phase {
            signals.push(CastSignal::ModeExited(spell.casting_mode));
        }
        signals.push(CastSignal::Cancelled(reason));
        self.reset();
        signals.push(CastSignal::Ended { completed: false });
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.runes.clear();
        self.elapsed = 0.0;
    }
}
