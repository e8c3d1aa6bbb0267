// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;
use crate::core::config::{ReminderPolicy, Thresholds};
use crate::core::monitor::Monitor;
use crate::core::state::{PollSample, State};

fn monitor(rest: u64, work: u64, policy: ReminderPolicy) -> Monitor {
    Monitor::new(Thresholds::new(rest, work).unwrap(), policy)
}

fn idle(secs: u64) -> PollSample {
    PollSample { idle_secs: secs }
}

fn reference() -> Monitor {
    monitor(300, 3000, ReminderPolicy::EveryTick)
}

#[test]
fn working_ticks_accumulate_one_poll_period_each() {
    let mon = reference();
    let mut state = State::new();

    for n in 1..=10u64 {
        let actions = mon.handle_sample(&mut state, idle(0));
        assert!(actions.is_empty());
        assert_eq!(state.worked_secs(), n * 150);
    }
}

#[test]
fn idle_just_below_poll_period_still_counts_as_work() {
    let mon = reference();
    let mut state = State::new();

    mon.handle_sample(&mut state, idle(149));
    assert_eq!(state.worked_secs(), 150);
}

#[test]
fn reminder_starts_on_first_tick_past_threshold_and_repeats() {
    let mon = reference();
    let mut state = State::new();

    // 20 ticks reach exactly 3000, which is not strictly greater.
    for _ in 0..20 {
        assert!(mon.handle_sample(&mut state, idle(0)).is_empty());
    }
    assert_eq!(state.worked_secs(), 3000);

    let actions = mon.handle_sample(&mut state, idle(0));
    assert_eq!(actions, vec![Action::Remind { worked_secs: 3150 }]);

    let actions = mon.handle_sample(&mut state, idle(0));
    assert_eq!(actions, vec![Action::Remind { worked_secs: 3300 }]);

    let actions = mon.handle_sample(&mut state, idle(10));
    assert_eq!(actions, vec![Action::Remind { worked_secs: 3450 }]);
    assert_eq!(state.reminders_sent(), 3);
}

#[test]
fn rest_resets_and_fires_once() {
    let mon = reference();
    let mut state = State::new();

    for _ in 0..5 {
        mon.handle_sample(&mut state, idle(0));
    }
    assert!(state.worked_secs() > 0);

    let actions = mon.handle_sample(&mut state, idle(300));
    assert_eq!(actions, vec![Action::RestComplete]);
    assert_eq!(state.worked_secs(), 0);
    assert_eq!(state.rests_completed(), 1);
}

#[test]
fn short_pause_leaves_state_alone() {
    let mon = reference();
    let mut state = State::new();

    for _ in 0..4 {
        mon.handle_sample(&mut state, idle(0));
    }
    let before = state.worked_secs();

    for secs in [150, 151, 200, 299] {
        let actions = mon.handle_sample(&mut state, idle(secs));
        assert!(actions.is_empty(), "idle={secs} should not notify");
        assert_eq!(state.worked_secs(), before);
    }
}

#[test]
fn short_pause_does_not_silence_reminders() {
    let mon = reference();
    let mut state = State::new();

    for _ in 0..21 {
        mon.handle_sample(&mut state, idle(0));
    }
    assert!(mon.handle_sample(&mut state, idle(200)).is_empty());

    let actions = mon.handle_sample(&mut state, idle(0));
    assert_eq!(actions, vec![Action::Remind { worked_secs: 3300 }]);
}

#[test]
fn end_to_end_reference_cadence() {
    let mon = reference();
    let mut state = State::new();
    let mut reminders = Vec::new();

    for tick in 1..=25u64 {
        for action in mon.handle_sample(&mut state, idle(0)) {
            if let Action::Remind { worked_secs } = action {
                reminders.push((tick, worked_secs));
            }
        }
        if tick == 21 {
            assert_eq!(state.worked_secs(), 3150);
        }
    }

    assert_eq!(reminders.first(), Some(&(21, 3150)));
    assert_eq!(reminders.len(), 5);
    assert!(reminders.windows(2).all(|w| w[1].0 == w[0].0 + 1));

    let actions = mon.handle_sample(&mut state, idle(300));
    assert_eq!(actions, vec![Action::RestComplete]);
    assert_eq!(state.worked_secs(), 0);
}

#[test]
fn once_policy_fires_single_reminder_per_crossing() {
    let mon = monitor(300, 3000, ReminderPolicy::Once);
    let mut state = State::new();
    let mut count = 0;

    for _ in 0..30 {
        count += mon
            .handle_sample(&mut state, idle(0))
            .iter()
            .filter(|a| matches!(a, Action::Remind { .. }))
            .count();
    }
    assert_eq!(count, 1);

    // A rest re-arms the latch.
    mon.handle_sample(&mut state, idle(600));
    assert!(!state.reminded());

    count = 0;
    for _ in 0..30 {
        count += mon
            .handle_sample(&mut state, idle(0))
            .iter()
            .filter(|a| matches!(a, Action::Remind { .. }))
            .count();
    }
    assert_eq!(count, 1);
}

#[test]
fn rest_with_nothing_accumulated_still_confirms() {
    let mon = reference();
    let mut state = State::new();

    let actions = mon.handle_sample(&mut state, idle(3600));
    assert_eq!(actions, vec![Action::RestComplete]);
    assert_eq!(state.worked_secs(), 0);
}

#[test]
fn millisecond_samples_truncate_before_comparison() {
    let mon = reference();
    let mut state = State::new();

    // 299.999s truncates to 299s: not yet a rest.
    let actions = mon.handle_sample(&mut state, PollSample::from_idle_ms(299_999));
    assert!(actions.is_empty());

    let actions = mon.handle_sample(&mut state, PollSample::from_idle_ms(300_000));
    assert_eq!(actions, vec![Action::RestComplete]);
}
