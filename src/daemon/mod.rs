// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;

use crate::core::{
    action::Action,
    config::{Config, NotificationSpec},
    monitor::Monitor,
    state::{PollSample, State},
};
use crate::services::{idle::IdleSampler, notify::Notifier};

pub type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Owns the monitor state and both collaborators; one instance per process.
pub struct Daemon<N: Notifier> {
    monitor: Monitor,
    state: State,

    sampler: Box<dyn IdleSampler>,
    notifier: N,

    reminder: NotificationSpec,
    rest_complete: NotificationSpec,
}

impl<N: Notifier> Daemon<N> {
    pub fn new(cfg: &Config, sampler: Box<dyn IdleSampler>, notifier: N) -> Self {
        eventline::debug!(
            "daemon: rest_threshold={}s poll_period={}s work_threshold={}s reminder_policy={} sampler={}",
            cfg.thresholds.rest_secs(),
            cfg.thresholds.poll_secs(),
            cfg.thresholds.work_secs(),
            cfg.reminder_policy,
            sampler.name(),
        );

        Self {
            monitor: Monitor::new(cfg.thresholds, cfg.reminder_policy),
            state: State::new(),
            sampler,
            notifier,
            reminder: cfg.reminder.clone(),
            rest_complete: cfg.rest_complete.clone(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// One poll: sample, advance the state machine, deliver notifications.
    ///
    /// A sampler error is returned (the caller stops); a notifier error is
    /// logged and the tick still succeeds.
    pub async fn tick(&mut self) -> Result<Vec<Action>, AnyError> {
        let idle_ms = self.sampler.sample()?;
        let actions = self
            .monitor
            .handle_sample(&mut self.state, PollSample::from_idle_ms(idle_ms));

        for action in &actions {
            if let Err(e) = self.exec_action(action).await {
                eventline::error!("notify: action {:?} failed: {}", action, e);
            }
        }

        Ok(actions)
    }
}
