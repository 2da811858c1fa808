//! Post-error auto-clear against real and fake time

use std::sync::Arc;
use std::time::{Duration, Instant};

use calc_engine::prelude::*;

fn fail(engine: &mut ExpressionEngine<Vec<String>>) {
    engine.press("(");
    assert!(engine.evaluate().is_failure());
    assert_eq!(engine.display_text(), "Error");
}

/// Sleeps until each pending timer is due, as a page's `setTimeout` loop would
async fn run_timers(engine: &mut ExpressionEngine<Vec<String>>) -> usize {
    let mut fired = 0;
    while let Some(ms) = engine.ms_until_next_timer() {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        fired += engine.poll();
    }
    fired
}

#[tokio::test]
async fn test_error_clears_after_real_900ms() {
    let mut engine = ExpressionEngine::new(Vec::new());
    let started = Instant::now();
    fail(&mut engine);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(engine.poll(), 0);
    assert_eq!(engine.display_text(), "Error");

    assert_eq!(run_timers(&mut engine).await, 1);
    assert!(started.elapsed() >= Duration::from_millis(899));
    assert_eq!(engine.display_text(), "0");
    assert_eq!(engine.sink().last().map(String::as_str), Some("0"));
    assert_eq!(engine.state(), EngineState::Editing);
}

#[tokio::test]
async fn test_input_during_real_delay_survives() {
    let config = EngineConfig::new().with_error_clear_delay_ms(50);
    let mut engine = ExpressionEngine::with_config(Vec::new(), config);
    fail(&mut engine);
    engine.press("8");

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(engine.poll(), 0);
    assert_eq!(engine.display_text(), "8");
}

#[tokio::test]
async fn test_uncancelable_timers_fire_in_order() {
    let config = EngineConfig::new()
        .with_error_clear_delay_ms(30)
        .with_auto_clear(AutoClearPolicy::Uncancelable);
    let mut engine = ExpressionEngine::with_config(Vec::new(), config);
    fail(&mut engine);
    engine.evaluate();
    assert_eq!(engine.pending_timer_count(), 2);

    assert_eq!(run_timers(&mut engine).await, 2);
    assert_eq!(engine.display_text(), "0");
}

#[test]
fn test_fake_clock_exact_boundary() {
    let clock = FakeClock::shared();
    let mut engine = ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), clock.clone());
    clock.set_ms(10_000);
    fail(&mut engine);
    assert_eq!(engine.next_deadline(), Some(10_900));

    clock.set_ms(10_899);
    assert_eq!(engine.poll(), 0);
    clock.set_ms(10_900);
    assert_eq!(engine.poll(), 1);
    assert_eq!(engine.display_text(), "0");
}

#[test]
fn test_clear_cancels_pending_timer() {
    let clock = FakeClock::shared();
    let mut engine = ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), clock.clone());
    fail(&mut engine);
    engine.clear();
    assert_eq!(engine.pending_timer_count(), 0);
    engine.press("5");
    clock.advance_ms(2_000);
    assert_eq!(engine.poll(), 0);
    assert_eq!(engine.display_text(), "5");
}

#[test]
fn test_shared_clock_drives_two_engines() {
    let clock = FakeClock::shared();
    let shared: Clock = clock.clone();
    let mut a = ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), Arc::clone(&shared));
    let mut b = ExpressionEngine::with_clock(
        Vec::new(),
        EngineConfig::new().with_error_clear_delay_ms(100),
        shared,
    );
    fail(&mut a);
    fail(&mut b);

    clock.advance_ms(100);
    assert_eq!(a.poll(), 0);
    assert_eq!(b.poll(), 1);
    clock.advance_ms(800);
    assert_eq!(a.poll(), 1);
}
