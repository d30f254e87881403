//! Tick timer tests: cadence, cancellation on every exit from Running.

use schedviz_core::{
    config::SimConfig,
    sink::NoopSink,
    state::Phase,
    timer::TickTimer,
    SimController,
};
use std::time::{Duration, Instant};

fn build(horizon: u64) -> SimController {
    let mut config = SimConfig::default();
    config.horizon = horizon;
    SimController::new(config, Box::new(NoopSink))
}

#[test]
fn timer_fires_once_per_interval() {
    let t0 = Instant::now();
    let interval = Duration::from_millis(500);
    let mut timer = TickTimer::arm(interval, t0);
    assert_eq!(timer.interval(), interval);

    assert!(!timer.fire(t0));
    assert!(!timer.fire(t0 + Duration::from_millis(499)));
    assert!(timer.fire(t0 + interval));
    assert!(!timer.fire(t0 + interval));
    assert_eq!(timer.next_due(), t0 + interval * 2);
    assert_eq!(timer.fired(), 1);
}

#[test]
fn stalled_timer_realigns_instead_of_bursting() {
    let t0 = Instant::now();
    let interval = Duration::from_millis(500);
    let mut timer = TickTimer::arm(interval, t0);

    let late = t0 + Duration::from_secs(5);
    assert!(timer.fire(late));
    assert!(!timer.fire(late), "missed ticks must not be replayed");
    assert_eq!(timer.next_due(), late + interval);
    assert_eq!(timer.remaining(late), interval);
}

#[test]
fn start_arms_and_pause_cancels() {
    let mut ctl = build(100);
    assert!(ctl.next_deadline().is_none());

    ctl.start();
    let due = ctl.next_deadline().expect("timer armed on start");
    assert!(ctl.poll_at(due));
    assert_eq!(ctl.series().len(), 1);

    ctl.pause();
    assert!(ctl.next_deadline().is_none());
    assert!(!ctl.poll_at(due + Duration::from_secs(60)));
    assert_eq!(ctl.series().len(), 1);
}

#[test]
fn reset_cancels_pending_tick() {
    let mut ctl = build(100);
    ctl.start();
    let due = ctl.next_deadline().expect("armed");

    ctl.reset();
    assert!(!ctl.timer_armed());
    assert!(!ctl.poll_at(due));
    assert!(!ctl.poll_at(due + Duration::from_secs(3600)));
    assert!(ctl.series().is_empty());
    assert_eq!(ctl.state().current_tick(), 0);
}

#[test]
fn completion_releases_the_timer() {
    let mut ctl = build(3);
    ctl.start();

    let mut fired = 0;
    while let Some(due) = ctl.next_deadline() {
        assert!(ctl.poll_at(due));
        fired += 1;
        assert!(fired <= 3, "timer outlived the horizon");
    }

    assert_eq!(fired, 3);
    assert_eq!(ctl.phase(), Phase::Completed);
    assert!(!ctl.timer_armed());
}

#[test]
fn poll_before_deadline_does_nothing() {
    let mut ctl = build(100);
    ctl.start();
    let due = ctl.next_deadline().expect("armed");

    assert!(!ctl.poll_at(due - Duration::from_millis(1)));
    assert!(ctl.series().is_empty());
}

#[test]
fn restart_after_pause_rearms_a_fresh_timer() {
    let mut ctl = build(100);
    ctl.start();
    ctl.pause();
    let restarted = Instant::now();
    ctl.start();
    assert!(ctl.timer_armed());
    let due = ctl.next_deadline().expect("armed");
    assert!(due >= restarted + ctl.config().tick_interval());
    assert_eq!(ctl.phase(), Phase::Running);
}

#[test]
fn poll_uses_the_wall_clock() {
    let mut config = SimConfig::default();
    config.tick_interval_ms = 1;
    let mut ctl = SimController::new(config, Box::new(NoopSink));

    assert!(!ctl.poll(), "idle controller must not tick");
    ctl.start();
    std::thread::sleep(Duration::from_millis(20));
    assert!(ctl.poll());
    assert_eq!(ctl.series().len(), 1);
}
