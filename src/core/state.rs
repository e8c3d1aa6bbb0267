// Author: Dustin Pilgrim
// License: MIT

/// One idle reading, already converted to whole seconds. Not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSample {
    pub idle_secs: u64,
}

impl PollSample {
    pub fn from_idle_ms(idle_ms: u64) -> Self {
        Self {
            idle_secs: crate::core::utils::ms_to_secs(idle_ms),
        }
    }
}

/// Mutable state of the work/rest machine, owned by whoever drives the loop.
#[derive(Debug, Clone, Default)]
pub struct State {
    // Sum of poll periods judged active since the last completed rest.
    worked_secs: u64,

    // Latch for the once-per-crossing reminder policy.
    reminded: bool,

    // Counters, for logging only.
    ticks: u64,
    reminders_sent: u64,
    rests_completed: u64,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worked_secs(&self) -> u64 {
        self.worked_secs
    }

    pub fn reminded(&self) -> bool {
        self.reminded
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reminders_sent(&self) -> u64 {
        self.reminders_sent
    }

    pub fn rests_completed(&self) -> u64 {
        self.rests_completed
    }

    // ---------------- transitions ----------------

    pub(crate) fn note_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn add_work(&mut self, secs: u64) {
        self.worked_secs = self.worked_secs.saturating_add(secs);
    }

    pub(crate) fn mark_reminded(&mut self) {
        self.reminded = true;
        self.reminders_sent = self.reminders_sent.saturating_add(1);
    }

    pub(crate) fn reset_after_rest(&mut self) {
        self.worked_secs = 0;
        self.reminded = false;
        self.rests_completed = self.rests_completed.saturating_add(1);
    }
}
