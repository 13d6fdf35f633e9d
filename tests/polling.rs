//! Poll cadence, teardown and response ordering on virtual time.

mod common;

use campaign_feed::engine::EngineState;
use campaign_feed::Event;
use common::{feed, Harness, PERIOD};
use std::time::Duration;

#[test]
fn one_fetch_per_period_while_mounted() {
    let mut harness = Harness::mounted();
    assert_eq!(harness.fetch_count(), 1);

    harness.advance(PERIOD - Duration::from_millis(1));
    assert_eq!(harness.fetch_count(), 1);

    harness.advance(Duration::from_millis(1));
    assert_eq!(harness.fetch_count(), 2);

    harness.advance(PERIOD * 3);
    assert_eq!(harness.fetch_count(), 5);
    assert_eq!(harness.pending_timers(), 1);
}

#[test]
fn no_fetches_after_teardown() {
    let mut harness = Harness::mounted();
    harness.advance(PERIOD);
    assert_eq!(harness.fetch_count(), 2);

    harness.dispatch(&Event::Teardown);
    harness.advance(PERIOD * 10);

    assert_eq!(harness.fetch_count(), 2);
    assert_eq!(harness.pending_timers(), 0);
    assert_eq!(harness.state.engine.state(), EngineState::Stopped);
}

#[test]
fn response_arriving_after_teardown_is_dropped() {
    let mut harness = Harness::mounted();
    harness.respond_latest(200, &feed(&[(1, "A", 0, false)]));
    harness.advance(PERIOD);

    harness.dispatch(&Event::Teardown);
    let render = harness.respond_latest(200, &feed(&[(9, "Z", 0, false)]));

    assert!(!render);
    assert_eq!(harness.visible_ids(), vec![1]);
}

#[test]
fn slow_older_response_does_not_override_newer_one() {
    let mut harness = Harness::mounted();
    harness.advance(PERIOD);
    let (first, second) = (harness.ticket(0), harness.ticket(1));

    harness.respond(second, 200, &feed(&[(2, "B", 5, false)]));
    let render = harness.respond(first, 200, &feed(&[(1, "A", 1, false)]));

    assert!(!render);
    assert_eq!(harness.visible_ids(), vec![2]);
    assert_eq!(harness.state.engine.in_flight(), 0);
}

#[test]
fn pause_and_resume_keep_a_single_timer() {
    let mut harness = Harness::mounted();

    harness.dispatch(&Event::TogglePolling);
    harness.advance(Duration::from_millis(500));
    harness.dispatch(&Event::TogglePolling);
    assert_eq!(harness.fetch_count(), 2);

    harness.advance(PERIOD * 2);

    assert_eq!(harness.pending_timers(), 1);
    assert_eq!(harness.fetch_count(), 4);
}

#[test]
fn paused_feed_does_not_poll() {
    let mut harness = Harness::mounted();

    harness.dispatch(&Event::TogglePolling);
    harness.advance(PERIOD * 4);

    assert_eq!(harness.fetch_count(), 1);
    assert!(!harness.state.engine.is_running());
}
