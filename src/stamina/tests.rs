//! Stamina domain: unit tests for pool bounds and regen timing.

use super::{StaminaPool, StaminaTuning};

fn pool() -> StaminaPool {
    StaminaPool::new(100.0, 10.0, 1.0)
}

#[test]
fn test_new_pool_starts_full() {
    let pool = pool();
    assert_eq!(pool.current(), 100.0);
    assert_eq!(pool.fraction(), 1.0);
}

#[test]
fn test_can_use_is_idempotent() {
    let pool = pool();
    for _ in 0..5 {
        assert!(pool.can_use(100.0));
        assert!(!pool.can_use(100.5));
    }
    assert_eq!(pool.current(), 100.0);
}

#[test]
fn test_try_use_deducts_when_affordable() {
    let mut pool = pool();
    assert!(pool.try_use(30.0));
    assert_eq!(pool.current(), 70.0);
    assert!(!pool.is_regenerating());
}

#[test]
fn test_failed_use_leaves_pool_unchanged() {
    let mut pool = pool();
    assert!(pool.try_use(80.0));
    let before = pool.current();

    assert!(!pool.try_use(30.0));
    assert_eq!(pool.current(), before);
}

#[test]
fn test_negative_amount_is_rejected() {
    let mut pool = pool();
    assert!(pool.try_use(50.0));
    assert!(!pool.can_use(-10.0));
    assert!(!pool.try_use(-10.0));
    assert_eq!(pool.current(), 50.0);
}

#[test]
fn test_pool_stays_in_bounds_over_many_actions() {
    let mut pool = pool();
    let amounts = [15.0, 40.0, 0.5, 60.0, 25.0, 5.0, 100.0, 3.0];
    for (i, amount) in amounts.iter().enumerate() {
        pool.try_use(*amount);
        pool.tick(0.3 * i as f32);
        assert!(pool.current() >= 0.0);
        assert!(pool.current() <= pool.max());
    }
}

#[test]
fn test_draining_to_zero_raises_depleted_once() {
    let mut pool = pool();
    assert!(pool.try_use(100.0));
    assert_eq!(pool.current(), 0.0);
    assert!(pool.take_depleted());
    assert!(!pool.take_depleted());
}

#[test]
fn test_no_regen_before_delay() {
    let mut pool = pool();
    assert!(pool.try_use(30.0));

    pool.tick(0.5);
    assert_eq!(pool.current(), 70.0);
    assert!(!pool.is_regenerating());
}

#[test]
fn test_regen_resumes_after_delay() {
    let mut pool = pool();
    assert!(pool.try_use(30.0));

    pool.tick(0.5);
    pool.tick(0.6);
    assert!(pool.is_regenerating());

    pool.tick(1.0);
    assert!((pool.current() - 81.0).abs() < 1e-4);
}

#[test]
fn test_regen_credits_time_past_delay_on_crossing_tick() {
    let mut pool = pool();
    assert!(pool.try_use(30.0));

    // 0.25s of this tick falls after the 1s delay
    pool.tick(1.25);
    assert!(pool.is_regenerating());
    assert!((pool.current() - 72.5).abs() < 1e-4);
}

#[test]
fn test_regen_caps_at_max() {
    let mut pool = pool();
    assert!(pool.try_use(5.0));
    pool.tick(1.0);
    pool.tick(10.0);
    assert_eq!(pool.current(), 100.0);

    // A full pool stops regenerating
    pool.tick(0.1);
    assert!(!pool.is_regenerating());
}

#[test]
fn test_new_use_restarts_delay() {
    let mut pool = pool();
    assert!(pool.try_use(50.0));
    pool.tick(1.5);
    assert!(pool.is_regenerating());

    assert!(pool.try_use(10.0));
    assert!(!pool.is_regenerating());
    pool.tick(0.5);
    assert!((pool.current() - 45.0).abs() < 1e-4);
}

#[test]
fn test_sprint_drain_is_rate_times_dt() {
    let tuning = StaminaTuning::default();
    let mut pool = StaminaPool::from_tuning(&tuning);
    let dt = 0.25;
    for _ in 0..4 {
        assert!(pool.can_use(tuning.sprint_gate));
        assert!(pool.try_use(tuning.sprint_cost * dt));
    }
    assert!((pool.current() - 90.0).abs() < 1e-4);
}

#[test]
fn test_retune_keeps_fill_ratio() {
    let mut pool = pool();
    assert!(pool.try_use(50.0));
    let tuning = StaminaTuning {
        max_stamina: 200.0,
        ..StaminaTuning::default()
    };
    pool.retune(&tuning);
    assert_eq!(pool.max(), 200.0);
    assert_eq!(pool.current(), 100.0);
}
