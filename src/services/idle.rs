// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::core::config::{Backend, Thresholds};

/// Source of "how long since the user last touched keyboard or pointer".
pub trait IdleSampler {
    /// Milliseconds since the last input event. Errors are fatal to the caller.
    fn sample(&mut self) -> Result<u64, IdleError>;

    fn name(&self) -> &'static str;

    /// True when samples are rounded down (a lower bound on the real idle time).
    fn rounds_down(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub enum IdleError {
    /// No usable display environment for the requested backend.
    Unavailable(String),
    Connect(String),
    /// The server lacks the extension/protocol that reports idle time.
    MissingExtension(&'static str),
    Query(String),
}

impl fmt::Display for IdleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdleError::Unavailable(s) => write!(f, "no idle source available: {s}"),
            IdleError::Connect(s) => write!(f, "display connect failed: {s}"),
            IdleError::MissingExtension(name) => write!(f, "display server does not support {name}"),
            IdleError::Query(s) => write!(f, "idle query failed: {s}"),
        }
    }
}

impl std::error::Error for IdleError {}

/// Snapshot of the session environment used to pick a backend.
#[derive(Debug, Clone, Default)]
pub struct SessionEnv {
    pub session_type: Option<String>,
    pub wayland_display: bool,
    pub x_display: bool,
}

impl SessionEnv {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var_os(key).is_some_and(|v| !v.is_empty());
        Self {
            session_type: std::env::var("XDG_SESSION_TYPE").ok(),
            wayland_display: non_empty("WAYLAND_DISPLAY"),
            x_display: non_empty("DISPLAY"),
        }
    }
}

/// Turn `auto` into a concrete backend, and check forced ones have a display.
pub fn resolve_backend(requested: Backend, env: &SessionEnv) -> Result<Backend, IdleError> {
    match requested {
        Backend::Wayland if env.wayland_display => Ok(Backend::Wayland),
        Backend::Wayland => Err(IdleError::Unavailable("WAYLAND_DISPLAY is not set".to_string())),

        Backend::X11 if env.x_display => Ok(Backend::X11),
        Backend::X11 => Err(IdleError::Unavailable("DISPLAY is not set".to_string())),

        Backend::Auto => {
            let is_wayland_session = env.session_type.as_deref() == Some("wayland");
            if is_wayland_session && env.wayland_display {
                Ok(Backend::Wayland)
            } else if env.x_display {
                Ok(Backend::X11)
            } else if env.wayland_display {
                Ok(Backend::Wayland)
            } else {
                Err(IdleError::Unavailable(format!(
                    "neither WAYLAND_DISPLAY nor DISPLAY is set (XDG_SESSION_TYPE={})",
                    env.session_type.as_deref().unwrap_or("<unset>")
                )))
            }
        }
    }
}

/// Open the sampler for `requested`, resolving `auto` from the environment.
pub fn open_sampler(
    requested: Backend,
    thresholds: &Thresholds,
) -> Result<Box<dyn IdleSampler>, IdleError> {
    let env = SessionEnv::from_env();
    let backend = resolve_backend(requested, &env)?;
    eventline::debug!("idle: requested backend {}, resolved to {} ({:?})", requested, backend, env);

    let sampler: Box<dyn IdleSampler> = match backend {
        Backend::Wayland => {
            let marks = [1, thresholds.poll_secs(), thresholds.rest_secs()];
            Box::new(crate::services::wayland::WaylandSampler::connect(&marks)?)
        }
        _ => Box::new(crate::services::x11::X11Sampler::connect()?),
    };

    eventline::info!("idle: using {} idle source", sampler.name());
    Ok(sampler)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(session: Option<&str>, wayland: bool, x: bool) -> SessionEnv {
        SessionEnv {
            session_type: session.map(str::to_string),
            wayland_display: wayland,
            x_display: x,
        }
    }

    #[test]
    fn auto_prefers_wayland_in_wayland_session() {
        let e = env(Some("wayland"), true, true);
        assert_eq!(resolve_backend(Backend::Auto, &e).unwrap(), Backend::Wayland);
    }

    #[test]
    fn auto_uses_x11_in_x11_session() {
        let e = env(Some("x11"), false, true);
        assert_eq!(resolve_backend(Backend::Auto, &e).unwrap(), Backend::X11);
    }

    #[test]
    fn auto_falls_back_to_bare_wayland_display() {
        let e = env(None, true, false);
        assert_eq!(resolve_backend(Backend::Auto, &e).unwrap(), Backend::Wayland);
    }

    #[test]
    fn no_display_is_an_error() {
        let e = env(Some("tty"), false, false);
        assert!(matches!(
            resolve_backend(Backend::Auto, &e),
            Err(IdleError::Unavailable(_))
        ));
    }

    #[test]
    fn forced_backend_needs_its_display() {
        let e = env(Some("wayland"), true, false);
        assert!(resolve_backend(Backend::X11, &e).is_err());
        assert_eq!(resolve_backend(Backend::Wayland, &e).unwrap(), Backend::Wayland);
    }
}
