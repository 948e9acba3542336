//! Integration tests for the runtime, controller and effect library
//!
//! These tests verify that:
//! - Completion is exact and happens once, never early
//! - Competing effects on the same property resolve last-writer-wins
//! - Completion handles can be awaited by several observers
//! - Headless drivers can run effects end to end from configuration

use std::cell::RefCell;
use std::rc::Rc;
use svx_animation::{
    AnimationConfig, AnimationRuntime, Easing, ManualClock, PropertyDelta, TweenOutcome,
    TweenState,
};
use svx_core::{MemoryHost, StyleSink, TargetId, VisibilityControl};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("svx_animation=trace")
        .with_test_writer()
        .try_init();
}

fn runtime_with(
    natural_height: f32,
) -> (AnimationRuntime<MemoryHost, ManualClock>, ManualClock, TargetId) {
    init_tracing();
    let clock = ManualClock::new();
    let mut host = MemoryHost::new();
    let target = host.create_target(natural_height);
    (AnimationRuntime::new(host, clock.clone()), clock, target)
}

/// Test that the completion hook fires exactly once, at or after the duration
#[test]
fn test_completion_is_exact() {
    let (mut rt, clock, t) = runtime_with(0.0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let hook_log = log.clone();
    let hook_clock = clock.clone();

    clock.set(1000.0);
    rt.animate_to_with(
        t,
        [("width", 100.0)],
        250.0,
        Easing::EaseInOut,
        move |_: &mut MemoryHost, _: TargetId| {
            use svx_animation::FrameClock;
            hook_log.borrow_mut().push(hook_clock.now());
        },
    );

    // Frames arrive late; the start time is the first frame, not the call
    clock.advance(40.0);
    while rt.frame_requested() {
        rt.tick();
        clock.advance(7.0);
    }

    let fired = log.borrow();
    assert_eq!(fired.len(), 1);
    assert!(fired[0] >= 1040.0 + 250.0);
    assert!(fired[0] < 1040.0 + 250.0 + 7.0);
}

/// Test that at most one tween owns a property and the loser's hook never runs
#[test]
fn test_at_most_one_owner() {
    let (mut rt, clock, t) = runtime_with(0.0);
    let fired = Rc::new(RefCell::new(Vec::new()));

    let mut handles = Vec::new();
    for i in 0..5 {
        let fired = fired.clone();
        handles.push(rt.animate_to_with(
            t,
            [("opacity", i as f32 / 4.0)],
            100.0,
            Easing::Linear,
            move |_: &mut MemoryHost, _: TargetId| fired.borrow_mut().push(i),
        ));
        rt.tick();
        clock.advance(10.0);

        let running = handles
            .iter()
            .filter(|h| h.state() == TweenState::Running)
            .count();
        assert_eq!(running, 1);
        assert_eq!(rt.controller().active_count(), 1);
    }

    while rt.tick() {
        clock.advance(16.0);
    }

    assert_eq!(*fired.borrow(), vec![4]);
    assert_eq!(rt.host().property(t, "opacity"), Some(1.0));
    for handle in &handles[..4] {
        assert_eq!(handle.outcome(), Some(TweenOutcome::Cancelled));
    }
}

/// Test that several observers can await the same handle
#[test]
fn test_observers_await_outcomes() {
    let (mut rt, clock, t) = runtime_with(120.0);

    let superseded = rt.slide_up(t, 300.0);
    let winner = rt.slide_down(t, 300.0);
    let observers = [winner.clone(), winner.clone()];

    assert_eq!(
        pollster::block_on(superseded.finished()),
        TweenOutcome::Cancelled
    );

    while rt.tick() {
        clock.advance(16.0);
    }

    for observer in &observers {
        assert_eq!(pollster::block_on(observer.finished()), TweenOutcome::Completed);
    }
    assert_eq!(rt.host().property(t, "height"), Some(120.0));
    assert!(rt.host().is_visible(t));
}

/// Test that a cancelled tween never writes again, even mid-flight
#[test]
fn test_cancel_mid_flight_freezes_value() {
    let (mut rt, clock, t) = runtime_with(0.0);

    let handle = rt.start(
        t,
        [PropertyDelta::px("left", 0.0, 200.0)],
        200.0,
        Easing::Linear,
        None,
    );
    rt.tick();
    clock.advance(50.0);
    rt.tick();
    assert_eq!(rt.host().property(t, "left"), Some(50.0));

    assert!(rt.cancel(&handle));
    assert!(!rt.cancel(&handle));
    clock.advance(500.0);
    rt.tick();

    assert_eq!(rt.host().property(t, "left"), Some(50.0));
    assert_eq!(handle.state(), TweenState::Cancelled);
}

/// Test that configured defaults drive effects that omit a duration
#[test]
fn test_config_drives_default_duration() {
    init_tracing();
    let config = AnimationConfig::from_toml_str("default_duration_ms = 100").unwrap();
    let clock = ManualClock::new();
    let mut host = MemoryHost::new();
    let t = host.create_target(0.0);
    let mut rt = AnimationRuntime::with_config(host, clock.clone(), config);

    let handle = rt.fade_out(t, None);
    rt.tick();
    clock.advance(99.0);
    rt.tick();
    assert_eq!(handle.state(), TweenState::Running);

    clock.advance(1.0);
    rt.tick();
    assert_eq!(handle.state(), TweenState::Completed);
    assert!(!rt.host().is_visible(t));
}

/// Test that a target removed mid-animation is tolerated by the sink
#[test]
fn test_target_removed_mid_animation() {
    let (mut rt, clock, t) = runtime_with(90.0);

    let handle = rt.slide_up(t, 100.0);
    rt.tick();
    rt.host_mut().remove_target(t);

    while rt.tick() {
        clock.advance(25.0);
    }

    assert_eq!(handle.state(), TweenState::Completed);
    assert_eq!(rt.host().target_count(), 0);
}
