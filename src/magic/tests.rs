//! Magic domain: unit tests for rune grammar, skill matching, and cast gestures.

use bevy::prelude::*;

use super::{
    BehaviorType, CancelReason, CastError, CastGesture, CastGestureController, CastSignal,
    CastingMode, ElementType, GestureInput, GesturePhase, GrammarError, ModifierRune,
    ModifierType, Rune, RuneBindings, RuneDef, RunePhase, SkillDef, SpellProperties,
    TargetingContext, TraitType, classify, compute_properties, match_skill, nearest_within,
    plan_spawn, resolve,
};

const FIRE: Rune = Rune::Element(ElementType::Fire);
const WATER: Rune = Rune::Element(ElementType::Water);
const PROJECTILE: Rune = Rune::Behavior(BehaviorType::Projectile);
const EXPLOSION: Rune = Rune::Behavior(BehaviorType::Explosion);
const PIERCING: Rune = Rune::Trait(TraitType::Piercing);

fn power(value: f32) -> Rune {
    Rune::Modifier(ModifierRune {
        kind: ModifierType::Power,
        value,
    })
}

fn speed(value: f32) -> Rune {
    Rune::Modifier(ModifierRune {
        kind: ModifierType::Speed,
        value,
    })
}

fn skill(
    id: &str,
    elements: &[ElementType],
    behaviors: &[BehaviorType],
    accepted: &[ModifierType],
) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: id.to_string(),
        elements: elements.to_vec(),
        behaviors: behaviors.to_vec(),
        accepted_modifiers: accepted.to_vec(),
        casting_mode: CastingMode::Directional,
        base: SpellProperties::default(),
        effect: Default::default(),
        recovery_time: 0.8,
    }
}

fn catalog() -> Vec<SkillDef> {
    vec![
        skill(
            "fireball",
            &[ElementType::Fire],
            &[BehaviorType::Projectile],
            &[ModifierType::Power],
        ),
        skill(
            "twin_fireball",
            &[ElementType::Fire, ElementType::Fire],
            &[BehaviorType::Projectile],
            &[ModifierType::Power, ModifierType::Speed],
        ),
        skill(
            "steam_burst",
            &[ElementType::Fire, ElementType::Water],
            &[BehaviorType::Explosion],
            &[],
        ),
    ]
}

// --- grammar ---

#[test]
fn test_classify_fire_fire_projectile() {
    let classified = classify(&[FIRE, FIRE, PROJECTILE]).unwrap();
    assert_eq!(classified.elements, vec![ElementType::Fire, ElementType::Fire]);
    assert_eq!(classified.behaviors, vec![BehaviorType::Projectile]);
    assert!(classified.modifiers.is_empty());
    assert!(classified.traits.is_empty());
}

#[test]
fn test_classify_rejects_behavior_first() {
    assert_eq!(
        classify(&[PROJECTILE, FIRE]),
        Err(GrammarError::WrongLeadingRune {
            found: RunePhase::Behavior
        })
    );
}

#[test]
fn test_classify_rejects_empty() {
    assert_eq!(classify(&[]), Err(GrammarError::Empty));
}

#[test]
fn test_classify_rejects_out_of_phase_rune() {
    assert_eq!(
        classify(&[FIRE, PROJECTILE, WATER]),
        Err(GrammarError::OutOfPhase {
            index: 2,
            rune: RunePhase::Element,
            after: RunePhase::Behavior,
        })
    );
    assert!(matches!(
        classify(&[FIRE, PROJECTILE, PIERCING, power(0.5)]),
        Err(GrammarError::OutOfPhase { index: 3, .. })
    ));
}

#[test]
fn test_classify_requires_behavior() {
    assert_eq!(classify(&[FIRE]), Err(GrammarError::MissingBehavior));
    // Skipping the Behavior phase is still monotonic, but incomplete
    assert_eq!(
        classify(&[FIRE, power(0.5)]),
        Err(GrammarError::MissingBehavior)
    );
}

#[test]
fn test_classify_carries_modifiers_and_traits() {
    let classified = classify(&[FIRE, PROJECTILE, power(0.5), speed(0.2), PIERCING]).unwrap();
    assert_eq!(classified.modifiers.len(), 2);
    assert_eq!(classified.modifiers[1].kind, ModifierType::Speed);
    assert_eq!(classified.traits, vec![TraitType::Piercing]);
}

/// Checks every sequence up to length 4 over a mixed alphabet against the grammar rule.
#[test]
fn test_classify_accepts_exactly_grammatical_sequences() {
    let alphabet = [FIRE, PROJECTILE, power(0.25), PIERCING];

    fn is_grammatical(sequence: &[Rune]) -> bool {
        let Some(first) = sequence.first() else {
            return false;
        };
        let monotonic = sequence.windows(2).all(|w| w[0].phase() <= w[1].phase());
        let has = |phase| sequence.iter().any(|r| r.phase() == phase);
        first.phase() == RunePhase::Element
            && monotonic
            && has(RunePhase::Element)
            && has(RunePhase::Behavior)
    }

    let mut sequences: Vec<Vec<Rune>> = vec![vec![]];
    let mut frontier: Vec<Vec<Rune>> = vec![vec![]];
    for _ in 0..4 {
        let mut next = Vec::new();
        for prefix in &frontier {
            for rune in alphabet {
                let mut sequence = prefix.clone();
                sequence.push(rune);
                next.push(sequence);
            }
        }
        sequences.extend(next.iter().cloned());
        frontier = next;
    }

    for sequence in &sequences {
        assert_eq!(
            classify(sequence).is_ok(),
            is_grammatical(sequence),
            "sequence {sequence:?}"
        );
    }
}

// --- matching ---

#[test]
fn test_match_requires_exact_ordered_lists() {
    let catalog = catalog();

    let matched = match_skill(
        &[ElementType::Fire, ElementType::Fire],
        &[BehaviorType::Projectile],
        &catalog,
    );
    assert_eq!(matched.map(|s| s.id.as_str()), Some("twin_fireball"));

    let reversed = match_skill(
        &[ElementType::Water, ElementType::Fire],
        &[BehaviorType::Explosion],
        &catalog,
    );
    assert!(reversed.is_none());

    let partial = match_skill(&[ElementType::Fire], &[BehaviorType::Explosion], &catalog);
    assert!(partial.is_none());
}

#[test]
fn test_match_first_catalog_entry_wins() {
    let mut catalog = catalog();
    catalog.push(skill(
        "fireball_shadow",
        &[ElementType::Fire],
        &[BehaviorType::Projectile],
        &[],
    ));

    let matched = match_skill(&[ElementType::Fire], &[BehaviorType::Projectile], &catalog);
    assert_eq!(matched.map(|s| s.id.as_str()), Some("fireball"));
}

// --- properties ---

#[test]
fn test_accepted_modifier_scales_property() {
    let catalog = catalog();
    let properties = compute_properties(
        &catalog[0],
        &[ModifierRune {
            kind: ModifierType::Power,
            value: 0.5,
        }],
    );
    assert!((properties.power - 15.0).abs() < 1e-5);
    assert_eq!(properties.speed, catalog[0].base.speed);
}

#[test]
fn test_unaccepted_modifier_is_ignored() {
    let catalog = catalog();
    let modifiers = [ModifierRune {
        kind: ModifierType::Speed,
        value: 2.0,
    }];
    let properties = compute_properties(&catalog[0], &modifiers);
    assert_eq!(properties, catalog[0].base);
}

#[test]
fn test_modifiers_stack_multiplicatively() {
    let catalog = catalog();
    let modifiers = [
        ModifierRune {
            kind: ModifierType::Power,
            value: 1.0,
        },
        ModifierRune {
            kind: ModifierType::Power,
            value: 0.5,
        },
    ];
    let properties = compute_properties(&catalog[0], &modifiers);
    assert!((properties.power - 30.0).abs() < 1e-5);
}

#[test]
fn test_untouched_properties_keep_base_values() {
    let skill = &catalog()[1];
    let properties = compute_properties(
        skill,
        &[ModifierRune {
            kind: ModifierType::Speed,
            value: 0.1,
        }],
    );
    assert_eq!(properties.power, skill.base.power);
    assert_eq!(properties.duration, skill.base.duration);
    assert_eq!(properties.range, skill.base.range);
    assert_eq!(properties.size, skill.base.size);
    assert!((properties.speed - skill.base.speed * 1.1).abs() < 1e-5);
}

// --- resolve ---

#[test]
fn test_resolve_builds_spell() {
    let spell = resolve(&[FIRE, FIRE, PROJECTILE, speed(0.5), PIERCING], &catalog()).unwrap();
    assert_eq!(spell.skill_id, "twin_fireball");
    assert_eq!(spell.casting_mode, CastingMode::Directional);
    assert!((spell.properties.speed - 15.0).abs() < 1e-5);
    assert!(spell.has_trait(TraitType::Piercing));
    assert_eq!(spell.recovery_time, 0.8);
}

#[test]
fn test_resolve_reports_no_match() {
    let err = resolve(&[WATER, EXPLOSION], &catalog()).unwrap_err();
    assert_eq!(
        err,
        CastError::NoMatch {
            elements: vec![ElementType::Water],
            behaviors: vec![BehaviorType::Explosion],
        }
    );
}

#[test]
fn test_resolve_reports_grammar_error() {
    let err = resolve(&[PROJECTILE, FIRE], &catalog()).unwrap_err();
    assert!(matches!(err, CastError::Grammar(GrammarError::WrongLeadingRune { .. })));
}

// --- gesture ---

fn controller() -> CastGestureController {
    CastGestureController::new(10.0, 0.3)
}

fn press() -> GestureInput {
    GestureInput {
        cast_pressed: true,
        ..default()
    }
}

fn release() -> GestureInput {
    GestureInput {
        cast_released: true,
        ..default()
    }
}

fn runes(runes: &[Rune]) -> GestureInput {
    GestureInput {
        runes_pressed: runes.to_vec(),
        ..default()
    }
}

fn idle() -> GestureInput {
    GestureInput::default()
}

#[test]
fn test_tap_cast_flow() {
    let catalog = catalog();
    let mut gesture = controller();

    assert_eq!(gesture.tick(&press(), &catalog, 0.0), vec![CastSignal::Started]);
    assert!(gesture.is_casting());

    let signals = gesture.tick(&runes(&[FIRE, PROJECTILE]), &catalog, 0.1);
    assert_eq!(signals, vec![CastSignal::SequenceChanged(vec![FIRE, PROJECTILE])]);
    assert_eq!(gesture.runes(), &[FIRE, PROJECTILE]);

    gesture.tick(&press(), &catalog, 0.1);
    assert!(matches!(gesture.phase(), GesturePhase::Armed { .. }));

    let signals = gesture.tick(&release(), &catalog, 0.1);
    assert!(matches!(
        &signals[0],
        CastSignal::Cast { spell, gesture: CastGesture::Tap } if spell.skill_id == "fireball"
    ));
    assert_eq!(signals[1], CastSignal::Ended { completed: true });
    assert_eq!(gesture.phase(), &GesturePhase::Idle);
    assert!(gesture.runes().is_empty());
}

#[test]
fn test_hold_cast_enters_and_exits_mode() {
    let catalog = catalog();
    let mut gesture = controller();
    gesture.tick(&press(), &catalog, 0.0);
    gesture.tick(&runes(&[FIRE, PROJECTILE]), &catalog, 0.1);
    gesture.tick(&press(), &catalog, 0.1);

    assert!(gesture.tick(&idle(), &catalog, 0.2).is_empty());
    let signals = gesture.tick(&idle(), &catalog, 0.2);
    assert_eq!(signals, vec![CastSignal::ModeEntered(CastingMode::Directional)]);
    assert!(matches!(gesture.phase(), GesturePhase::Held { .. }));

    let signals = gesture.tick(&release(), &catalog, 0.1);
    assert_eq!(signals[0], CastSignal::ModeExited(CastingMode::Directional));
    assert!(matches!(
        signals[1],
        CastSignal::Cast {
            gesture: CastGesture::Hold,
            ..
        }
    ));
    assert_eq!(signals[2], CastSignal::Ended { completed: true });
}

#[test]
fn test_empty_sequence_cancels() {
    let catalog = catalog();
    let mut gesture = controller();
    gesture.tick(&press(), &catalog, 0.0);

    let signals = gesture.tick(&press(), &catalog, 0.1);
    assert_eq!(
        signals,
        vec![
            CastSignal::Cancelled(CancelReason::Empty),
            CastSignal::Ended { completed: false },
        ]
    );
    assert!(!gesture.is_casting());
}

#[test]
fn test_invalid_sequence_cancels_to_idle() {
    let catalog = catalog();
    let mut gesture = controller();
    gesture.tick(&press(), &catalog, 0.0);
    gesture.tick(&runes(&[PROJECTILE, FIRE]), &catalog, 0.1);

    let signals = gesture.tick(&press(), &catalog, 0.1);
    assert!(matches!(
        &signals[0],
        CastSignal::Cancelled(CancelReason::Rejected(CastError::Grammar(_)))
    ));
    assert_eq!(gesture.phase(), &GesturePhase::Idle);
    assert!(gesture.runes().is_empty());
}

#[test]
fn test_timeout_cancels_from_any_phase() {
    let catalog = catalog();
    let mut gesture = controller();
    gesture.tick(&press(), &catalog, 0.0);
    gesture.tick(&runes(&[FIRE, PROJECTILE]), &catalog, 1.0);
    gesture.tick(&press(), &catalog, 1.0);
    gesture.tick(&idle(), &catalog, 1.0);
    assert!(matches!(gesture.phase(), GesturePhase::Held { .. }));

    let signals = gesture.tick(&idle(), &catalog, 8.0);
    assert_eq!(
        signals,
        vec![
            CastSignal::ModeExited(CastingMode::Directional),
            CastSignal::Cancelled(CancelReason::Timeout),
            CastSignal::Ended { completed: false },
        ]
    );
    assert_eq!(gesture.progress(), 0.0);
}

#[test]
fn test_recovery_blocks_new_session() {
    let catalog = catalog();
    let mut gesture = controller();
    let input = GestureInput {
        cast_pressed: true,
        recovering: true,
        ..default()
    };
    assert!(gesture.tick(&input, &catalog, 0.1).is_empty());
    assert!(!gesture.is_casting());
}

#[test]
fn test_progress_tracks_elapsed_casting_time() {
    let catalog = catalog();
    let mut gesture = controller();
    assert_eq!(gesture.progress(), 0.0);

    gesture.tick(&press(), &catalog, 0.0);
    gesture.tick(&idle(), &catalog, 2.5);
    assert!((gesture.progress() - 0.25).abs() < 1e-5);
}

#[test]
fn test_same_frame_press_and_release_taps() {
    let catalog = catalog();
    let mut gesture = controller();
    gesture.tick(&press(), &catalog, 0.0);
    gesture.tick(&runes(&[FIRE, PROJECTILE]), &catalog, 0.1);

    let input = GestureInput {
        cast_pressed: true,
        cast_released: true,
        ..default()
    };
    let signals = gesture.tick(&input, &catalog, 0.016);
    assert!(matches!(
        signals[0],
        CastSignal::Cast {
            gesture: CastGesture::Tap,
            ..
        }
    ));
}

// --- targeting ---

fn context() -> TargetingContext {
    TargetingContext {
        caster_position: Vec3::new(1.0, 0.0, 1.0),
        caster_forward: Vec3::NEG_Z,
        aim_direction: Vec3::X,
        aim_point: None,
        lock_target: None,
        spawn_distance: 2.0,
    }
}

#[test]
fn test_plain_spell_spawns_ahead_of_caster() {
    let plan = plan_spawn(CastingMode::None, &context());
    assert_eq!(plan.position, Vec3::new(1.0, 0.0, -1.0));
    assert!(plan.travels);
}

#[test]
fn test_self_target_spawns_on_caster() {
    let plan = plan_spawn(CastingMode::SelfTarget, &context());
    assert_eq!(plan.position, Vec3::new(1.0, 0.0, 1.0));
    assert!(!plan.travels);
}

#[test]
fn test_directional_follows_aim() {
    let plan = plan_spawn(CastingMode::Directional, &context());
    assert_eq!(plan.direction, Vec3::X);
    assert_eq!(plan.position, Vec3::new(3.0, 0.0, 1.0));
}

#[test]
fn test_target_point_without_hit_falls_back() {
    let plan = plan_spawn(CastingMode::TargetPoint, &context());
    assert_eq!(plan, plan_spawn(CastingMode::None, &context()));

    let hit = TargetingContext {
        aim_point: Some(Vec3::new(5.0, 0.0, 5.0)),
        ..context()
    };
    let plan = plan_spawn(CastingMode::TargetPoint, &hit);
    assert_eq!(plan.position, Vec3::new(5.0, 0.0, 5.0));
    assert!(!plan.travels);
}

#[test]
fn test_lock_on_aims_at_target() {
    let ctx = TargetingContext {
        lock_target: Some(Vec3::new(1.0, 0.0, 11.0)),
        ..context()
    };
    let plan = plan_spawn(CastingMode::LockOnEnemy, &ctx);
    assert!(plan.direction.distance(Vec3::Z) < 1e-5);
}

#[test]
fn test_nearest_within_range() {
    let candidates = [Vec3::new(0.0, 0.0, 8.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(30.0, 0.0, 0.0)];
    assert_eq!(
        nearest_within(Vec3::ZERO, candidates, 10.0),
        Some(Vec3::new(3.0, 0.0, 0.0))
    );
    assert_eq!(nearest_within(Vec3::ZERO, candidates, 2.0), None);
}

// --- bindings ---

#[test]
fn test_rune_bindings_report_unknown_keys() {
    let defs = vec![
        RuneDef {
            id: "rune_fire".to_string(),
            name: "Fire".to_string(),
            rune: FIRE,
            key: "Digit1".to_string(),
        },
        RuneDef {
            id: "rune_bogus".to_string(),
            name: "Bogus".to_string(),
            rune: PROJECTILE,
            key: "Hyper".to_string(),
        },
    ];
    let (bindings, unknown) = RuneBindings::from_defs(&defs);
    assert_eq!(bindings.len(), 1);
    assert_eq!(unknown, vec!["rune_bogus".to_string()]);
}
