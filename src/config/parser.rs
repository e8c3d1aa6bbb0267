// Author: Dustin Pilgrim
// License: MIT

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;

use crate::core::config::{Backend, Config, NotificationSpec, ReminderPolicy, Thresholds, Urgency};
use crate::core::error::{ConfigError, Error};

const ROOT: &str = "restwatch";

/// Values as written in the file; anything absent falls back to defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub rest_threshold: Option<u64>,
    pub work_threshold: Option<u64>,
    pub reminder_policy: Option<String>,
    pub backend: Option<String>,
    pub reminder: RawNotification,
    pub rest_complete: RawNotification,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawNotification {
    pub summary: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub timeout_ms: Option<u64>,
    pub urgency: Option<String>,
}

pub fn parse_str(text: &str) -> Result<Config> {
    let rune = RuneConfig::from_str(text)
        .map_err(|e| eyre::eyre!("invalid config syntax: {}", e))?;
    let raw = extract(&rune);
    eventline::debug!("config: parsed: {:?}", raw);
    build(raw).wrap_err("invalid config values")
}

/// Reads both `snake_case` and `kebab-case` spellings of each key.
fn extract(config: &RuneConfig) -> RawConfig {
    RawConfig {
        rest_threshold: get_u64(config, ROOT, "rest_threshold"),
        work_threshold: get_u64(config, ROOT, "work_threshold"),
        reminder_policy: get_string(config, ROOT, "reminder_policy"),
        backend: get_string(config, ROOT, "backend"),
        reminder: extract_notification(config, &format!("{ROOT}.reminder")),
        rest_complete: extract_notification(config, &format!("{ROOT}.rest_complete"))
            .or(extract_notification(config, &format!("{ROOT}.rest-complete"))),
    }
}

fn extract_notification(config: &RuneConfig, section: &str) -> RawNotification {
    RawNotification {
        summary: get_string(config, section, "summary"),
        body: get_string(config, section, "body"),
        icon: get_string(config, section, "icon"),
        timeout_ms: get_u64(config, section, "timeout_ms"),
        urgency: get_string(config, section, "urgency"),
    }
}

impl RawNotification {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn or(self, other: Self) -> Self {
        if self.is_empty() { other } else { self }
    }
}

fn get_u64(config: &RuneConfig, section: &str, key: &str) -> Option<u64> {
    config
        .get::<u64>(&format!("{section}.{key}"))
        .or_else(|_| config.get::<u64>(&format!("{section}.{}", key.replace('_', "-"))))
        .ok()
}

fn get_string(config: &RuneConfig, section: &str, key: &str) -> Option<String> {
    config
        .get::<String>(&format!("{section}.{key}"))
        .or_else(|_| config.get::<String>(&format!("{section}.{}", key.replace('_', "-"))))
        .ok()
}

/// Apply defaults and validate.
pub fn build(raw: RawConfig) -> std::result::Result<Config, Error> {
    let defaults = Thresholds::default();
    let thresholds = Thresholds::new(
        raw.rest_threshold.unwrap_or(defaults.rest_secs()),
        raw.work_threshold.unwrap_or(defaults.work_secs()),
    )?;

    let reminder_policy = match raw.reminder_policy {
        Some(s) => ReminderPolicy::parse(&s).ok_or_else(|| unknown("reminder_policy", &s))?,
        None => ReminderPolicy::default(),
    };

    let backend = match raw.backend {
        Some(s) => Backend::parse(&s).ok_or_else(|| unknown("backend", &s))?,
        None => Backend::default(),
    };

    Ok(Config {
        thresholds,
        reminder_policy,
        backend,
        reminder: build_notification(raw.reminder, NotificationSpec::default_reminder(), "reminder")?,
        rest_complete: build_notification(
            raw.rest_complete,
            NotificationSpec::default_rest_complete(),
            "rest_complete",
        )?,
    })
}

fn build_notification(
    raw: RawNotification,
    base: NotificationSpec,
    section: &str,
) -> std::result::Result<NotificationSpec, Error> {
    let urgency = match raw.urgency {
        Some(s) => Urgency::parse(&s).ok_or_else(|| unknown(&format!("{section}.urgency"), &s))?,
        None => base.urgency,
    };

    // An empty icon string turns the icon off.
    let icon = match raw.icon {
        Some(s) if s.trim().is_empty() => None,
        Some(s) => Some(s),
        None => base.icon,
    };

    Ok(NotificationSpec {
        summary: raw.summary.unwrap_or(base.summary),
        body: raw.body.unwrap_or(base.body),
        icon,
        timeout_ms: raw
            .timeout_ms
            .map(|ms| u32::try_from(ms).unwrap_or(u32::MAX))
            .unwrap_or(base.timeout_ms),
        urgency,
    })
}

fn unknown(key: &str, value: &str) -> Error {
    Error::InvalidConfig(ConfigError::UnknownValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
