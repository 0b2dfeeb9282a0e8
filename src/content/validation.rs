//! Validation for the rune and skill catalogs.

use std::collections::HashMap;

use super::registry::ContentRegistry;
use crate::magic::{Rune, parse_key};

/// A validation problem with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}': {}", self.source_type, self.source_id, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn error(source_type: &'static str, source_id: &str, message: String) -> ValidationError {
    ValidationError {
        source_type,
        source_id: source_id.to_string(),
        message,
    }
}

/// Validate the catalogs. Returns every problem found, empty if none.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut rune_ids: HashMap<&str, usize> = HashMap::new();
    let mut keys: HashMap<&str, &str> = HashMap::new();
    for rune in &registry.runes {
        *rune_ids.entry(rune.id.as_str()).or_default() += 1;

        if parse_key(&rune.key).is_none() {
            errors.push(error(
                "Rune",
                &rune.id,
                format!("key '{}' is not a bindable key", rune.key),
            ));
        } else if let Some(other) = keys.insert(rune.key.as_str(), rune.id.as_str()) {
            errors.push(error(
                "Rune",
                &rune.id,
                format!("key '{}' already bound to '{other}'", rune.key),
            ));
        }

        if let Rune::Modifier(modifier) = rune.rune {
            if modifier.value <= -1.0 {
                errors.push(error(
                    "Rune",
                    &rune.id,
                    format!("modifier value {} would zero or negate the property", modifier.value),
                ));
            }
        }
    }
    for (id, count) in rune_ids {
        if count > 1 {
            errors.push(error("Rune", id, format!("id defined {count} times")));
        }
    }

    for (index, skill) in registry.skills.iter().enumerate() {
        if skill.elements.is_empty() {
            errors.push(error("Skill", &skill.id, "has no elements".to_string()));
        }
        if skill.behaviors.is_empty() {
            errors.push(error("Skill", &skill.id, "has no behaviors".to_string()));
        }
        if registry.skills[..index].iter().any(|s| s.id == skill.id) {
            errors.push(error("Skill", &skill.id, "id defined more than once".to_string()));
        }
        // Matching is first-wins, so an identical earlier recipe shadows this one
        if let Some(earlier) = registry.skills[..index]
            .iter()
            .find(|s| s.elements == skill.elements && s.behaviors == skill.behaviors)
        {
            errors.push(error(
                "Skill",
                &skill.id,
                format!("unreachable: same recipe as earlier skill '{}'", earlier.id),
            ));
        }
    }

    errors
}
