// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration values that cannot drive the monitor.
    ///
    /// Examples:
    /// - rest threshold so small the poll period rounds to zero
    /// - zero work threshold
    /// - unknown enum spelling in the config file
    InvalidConfig(ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RestThresholdTooSmall(u64),
    ZeroWorkThreshold,
    UnknownValue { key: String, value: String },
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RestThresholdTooSmall(secs) => {
                write!(f, "rest_threshold must be at least 2 seconds (got {secs})")
            }
            ConfigError::ZeroWorkThreshold => write!(f, "work_threshold must be greater than zero"),
            ConfigError::UnknownValue { key, value } => write!(f, "unknown value {value:?} for {key}"),
        }
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}
