// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::core::error::{ConfigError, Error};

pub const DEFAULT_REST_THRESHOLD_SECS: u64 = 5 * 60;
pub const DEFAULT_WORK_THRESHOLD_SECS: u64 = 50 * 60;

/// What to do once accumulated working time is past the work threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderPolicy {
    /// Remind on every working poll until a rest resets the accumulator.
    #[default]
    EveryTick,
    /// Remind once per crossing; re-armed by a completed rest.
    Once,
}

impl ReminderPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "every-tick" | "every_tick" | "always" => Some(Self::EveryTick),
            "once" => Some(Self::Once),
            _ => None,
        }
    }
}

impl fmt::Display for ReminderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderPolicy::EveryTick => write!(f, "every-tick"),
            ReminderPolicy::Once => write!(f, "once"),
        }
    }
}

/// Which facility answers "how long since the last input".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Auto,
    X11,
    Wayland,
}

impl Backend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "x11" | "xorg" => Some(Self::X11),
            "wayland" => Some(Self::Wayland),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Auto => write!(f, "auto"),
            Backend::X11 => write!(f, "x11"),
            Backend::Wayland => write!(f, "wayland"),
        }
    }
}

/// freedesktop urgency hint levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Urgency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Urgency::Low => 0,
            Urgency::Normal => 1,
            Urgency::Critical => 2,
        }
    }
}

/// Content of one kind of notification.
///
/// `body` may contain `{duration}`, replaced with the formatted working time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSpec {
    pub summary: String,
    pub body: String,
    pub icon: Option<String>,
    /// Milliseconds before auto-dismiss; 0 keeps it until dismissed.
    pub timeout_ms: u32,
    pub urgency: Urgency,
}

impl NotificationSpec {
    pub fn default_reminder() -> Self {
        Self {
            summary: "Take a break".to_string(),
            body: "You have been staring at the screen for {duration}!".to_string(),
            icon: Some("/usr/share/icons/Tango/72x72/status/stock_dialog-warning.png".to_string()),
            timeout_ms: 10_000,
            urgency: Urgency::Normal,
        }
    }

    pub fn default_rest_complete() -> Self {
        Self {
            summary: "Time's up".to_string(),
            body: "Rested enough? Back to work!".to_string(),
            icon: Some("/usr/share/icons/Tango/72x72/status/stock_dialog-info.png".to_string()),
            timeout_ms: 0,
            urgency: Urgency::Normal,
        }
    }

    pub fn render_body(&self, duration: &str) -> String {
        self.body.replace("{duration}", duration)
    }
}

/// Fixed thresholds for one run, all in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    rest_secs: u64,
    work_secs: u64,
}

impl Thresholds {
    /// Poll period is derived as half the rest threshold, so a rest threshold
    /// below 2 seconds would give a zero cadence.
    pub fn new(rest_secs: u64, work_secs: u64) -> Result<Self, Error> {
        if rest_secs < 2 {
            return Err(Error::InvalidConfig(ConfigError::RestThresholdTooSmall(rest_secs)));
        }
        if work_secs == 0 {
            return Err(Error::InvalidConfig(ConfigError::ZeroWorkThreshold));
        }
        Ok(Self { rest_secs, work_secs })
    }

    pub fn rest_secs(&self) -> u64 {
        self.rest_secs
    }

    pub fn work_secs(&self) -> u64 {
        self.work_secs
    }

    pub fn poll_secs(&self) -> u64 {
        self.rest_secs / 2
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rest_secs: DEFAULT_REST_THRESHOLD_SECS,
            work_secs: DEFAULT_WORK_THRESHOLD_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub thresholds: Thresholds,
    pub reminder_policy: ReminderPolicy,
    pub backend: Backend,
    pub reminder: NotificationSpec,
    pub rest_complete: NotificationSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            reminder_policy: ReminderPolicy::default(),
            backend: Backend::default(),
            reminder: NotificationSpec::default_reminder(),
            rest_complete: NotificationSpec::default_rest_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_period_is_half_rest_truncated() {
        assert_eq!(Thresholds::default().poll_secs(), 150);
        assert_eq!(Thresholds::new(301, 10).unwrap().poll_secs(), 150);
        assert_eq!(Thresholds::new(2, 10).unwrap().poll_secs(), 1);
    }

    #[test]
    fn rejects_degenerate_thresholds() {
        assert_eq!(
            Thresholds::new(1, 3000),
            Err(Error::InvalidConfig(ConfigError::RestThresholdTooSmall(1)))
        );
        assert_eq!(
            Thresholds::new(300, 0),
            Err(Error::InvalidConfig(ConfigError::ZeroWorkThreshold))
        );
    }

    #[test]
    fn body_placeholder_is_substituted() {
        let spec = NotificationSpec::default_reminder();
        assert_eq!(
            spec.render_body("52 minutes"),
            "You have been staring at the screen for 52 minutes!"
        );
        let ok = NotificationSpec::default_rest_complete();
        assert_eq!(ok.render_body("ignored"), ok.body);
    }

    #[test]
    fn enum_names_parse_loosely() {
        assert_eq!(ReminderPolicy::parse(" Once "), Some(ReminderPolicy::Once));
        assert_eq!(ReminderPolicy::parse("every_tick"), Some(ReminderPolicy::EveryTick));
        assert_eq!(ReminderPolicy::parse("sometimes"), None);
        assert_eq!(Backend::parse("Wayland"), Some(Backend::Wayland));
        assert_eq!(Urgency::parse("critical").map(Urgency::as_byte), Some(2));
    }
}
