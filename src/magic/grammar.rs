//! Magic domain: rune sequence grammar.
//!
//! A castable sequence starts with an Element rune and moves through the
//! phases Element, Behavior, Modifier, Trait without ever going back.

use std::fmt;

use crate::magic::runes::{
    BehaviorType, ElementType, ModifierRune, Rune, RunePhase, TraitType,
};

/// A rune sequence split into its grammar phases, order preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifiedRunes {
    pub elements: Vec<ElementType>,
    pub behaviors: Vec<BehaviorType>,
    pub modifiers: Vec<ModifierRune>,
    pub traits: Vec<TraitType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    Empty,
    /// First rune is not an Element
    WrongLeadingRune { found: RunePhase },
    /// Rune at `index` belongs to a phase that already ended
    OutOfPhase {
        index: usize,
        rune: RunePhase,
        after: RunePhase,
    },
    MissingElement,
    MissingBehavior,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Empty => write!(f, "rune sequence is empty"),
            GrammarError::WrongLeadingRune { found } => {
                write!(f, "sequence must start with an Element rune, found {found:?}")
            }
            GrammarError::OutOfPhase { index, rune, after } => write!(
                f,
                "{rune:?} rune at position {index} cannot follow a {after:?} rune"
            ),
            GrammarError::MissingElement => write!(f, "sequence has no Element rune"),
            GrammarError::MissingBehavior => write!(f, "sequence has no Behavior rune"),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Splits `sequence` into phases, rejecting anything that breaks the grammar.
pub fn classify(sequence: &[Rune]) -> Result<ClassifiedRunes, GrammarError> {
    let Some(first) = sequence.first() else {
        return Err(GrammarError::Empty);
    };
    if first.phase() != RunePhase::Element {
        return Err(GrammarError::WrongLeadingRune {
            found: first.phase(),
        });
    }

    let mut classified = ClassifiedRunes::default();
    let mut phase = RunePhase::Element;

    for (index, rune) in sequence.iter().enumerate() {
        if rune.phase() < phase {
            return Err(GrammarError::OutOfPhase {
                index,
                rune: rune.phase(),
                after: phase,
            });
        }
        phase = rune.phase();

        match *rune {
            Rune::Element(element) => classified.elements.push(element),
            Rune::Behavior(behavior) => classified.behaviors.push(behavior),
            Rune::Modifier(modifier) => classified.modifiers.push(modifier),
            Rune::Trait(trait_type) => classified.traits.push(trait_type),
        }
    }

    if classified.elements.is_empty() {
        return Err(GrammarError::MissingElement);
    }
    if classified.behaviors.is_empty() {
        return Err(GrammarError::MissingBehavior);
    }
    Ok(classified)
}
