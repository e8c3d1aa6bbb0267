// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::fmt;

use zbus::{Connection, Proxy};
use zvariant::Value;

use crate::core::config::Urgency;

const NOTIFY_DEST: &str = "org.freedesktop.Notifications";
const NOTIFY_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFY_IFACE: &str = "org.freedesktop.Notifications";

/// A fully rendered notification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: String,
    pub body: String,
    pub icon: Option<String>,
    /// 0 = stay until dismissed.
    pub timeout_ms: u32,
    pub urgency: Urgency,
}

/// Fire-and-forget delivery of a notification to the user.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Returns the server-assigned notification id.
    async fn send(&mut self, note: &Notification) -> Result<u32, NotifyError>;
}

#[derive(Debug)]
pub enum NotifyError {
    Connect(zbus::Error),
    Call(zbus::Error),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Connect(e) => write!(f, "session bus unavailable: {e}"),
            NotifyError::Call(e) => write!(f, "Notify call failed: {e}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// org.freedesktop.Notifications over the session bus.
pub struct DbusNotifier {
    proxy: Proxy<'static>,
    app_name: String,
}

impl DbusNotifier {
    pub async fn connect(app_name: &str) -> Result<Self, NotifyError> {
        let conn = Connection::session().await.map_err(NotifyError::Connect)?;
        let proxy = Proxy::new(&conn, NOTIFY_DEST, NOTIFY_PATH, NOTIFY_IFACE)
            .await
            .map_err(NotifyError::Connect)?;

        let notifier = Self {
            proxy,
            app_name: app_name.to_string(),
        };
        notifier.log_server_info().await;
        Ok(notifier)
    }

    // The server may be D-Bus activated on first Notify, so a failure here is
    // only worth a warning.
    async fn log_server_info(&self) {
        let info: zbus::Result<(String, String, String, String)> =
            self.proxy.call("GetServerInformation", &()).await;

        match info {
            Ok((name, vendor, version, spec)) => {
                eventline::info!(
                    "notify: notification server: {} {} ({}), spec {}",
                    name,
                    version,
                    vendor,
                    spec
                );
            }
            Err(e) => {
                eventline::warn!("notify: could not query notification server: {e}");
            }
        }
    }
}

impl Notifier for DbusNotifier {
    async fn send(&mut self, note: &Notification) -> Result<u32, NotifyError> {
        let mut hints: HashMap<&str, Value<'_>> = HashMap::new();
        hints.insert("urgency", Value::U8(note.urgency.as_byte()));

        let actions: Vec<&str> = Vec::new();
        let expire_timeout = i32::try_from(note.timeout_ms).unwrap_or(i32::MAX);

        let id: u32 = self
            .proxy
            .call(
                "Notify",
                &(
                    self.app_name.as_str(),
                    0u32,
                    note.icon.as_deref().unwrap_or(""),
                    note.summary.as_str(),
                    note.body.as_str(),
                    actions,
                    hints,
                    expire_timeout,
                ),
            )
            .await
            .map_err(NotifyError::Call)?;

        eventline::debug!("notify: notification {} shown: {}", id, note.summary);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires a session bus with a notification server
    async fn sends_to_live_server() {
        let mut notifier = DbusNotifier::connect("restwatch-test").await.unwrap();
        let note = Notification {
            summary: "restwatch".to_string(),
            body: "test notification".to_string(),
            icon: None,
            timeout_ms: 2000,
            urgency: Urgency::Low,
        };
        assert!(notifier.send(&note).await.is_ok());
    }
}
