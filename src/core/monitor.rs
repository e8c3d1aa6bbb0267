// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    config::{ReminderPolicy, Thresholds},
    state::{PollSample, State},
};

/// Work/rest decision logic. Holds only the fixed thresholds; all mutable
/// data lives in [`State`] so tests can drive it with synthetic samples.
#[derive(Debug, Clone)]
pub struct Monitor {
    thresholds: Thresholds,
    policy: ReminderPolicy,
}

impl Monitor {
    pub fn new(thresholds: Thresholds, policy: ReminderPolicy) -> Self {
        Self { thresholds, policy }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Evaluate one poll tick.
    ///
    /// - idle < poll period: the user typed during the last tick, add one
    ///   poll period of work and remind if past the work threshold
    /// - idle >= rest threshold: rest completed, reset
    /// - anything in between changes nothing
    pub fn handle_sample(&self, state: &mut State, sample: PollSample) -> Vec<Action> {
        let poll = self.thresholds.poll_secs();
        let mut actions = Vec::new();

        state.note_tick();

        if sample.idle_secs < poll {
            state.add_work(poll);

            if state.worked_secs() > self.thresholds.work_secs() {
                let fire = match self.policy {
                    ReminderPolicy::EveryTick => true,
                    ReminderPolicy::Once => !state.reminded(),
                };

                if fire {
                    state.mark_reminded();
                    actions.push(Action::Remind {
                        worked_secs: state.worked_secs(),
                    });
                }
            }

            eventline::debug!(
                "monitor: working: idle={}s worked={}s",
                sample.idle_secs,
                state.worked_secs()
            );
        } else if sample.idle_secs >= self.thresholds.rest_secs() {
            eventline::debug!(
                "monitor: rested: idle={}s, clearing {}s of work",
                sample.idle_secs,
                state.worked_secs()
            );
            state.reset_after_rest();
            actions.push(Action::RestComplete);
        } else {
            eventline::debug!(
                "monitor: short pause: idle={}s worked={}s",
                sample.idle_secs,
                state.worked_secs()
            );
        }

        actions
    }
}
