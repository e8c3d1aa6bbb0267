// Author: Dustin Pilgrim
// License: MIT

use crate::core::{action::Action, config::NotificationSpec, utils::format_duration};
use crate::services::notify::{Notification, Notifier, NotifyError};

use super::Daemon;

impl<N: Notifier> Daemon<N> {
    pub(super) async fn exec_action(&mut self, action: &Action) -> Result<(), NotifyError> {
        match action {
            Action::Remind { worked_secs } => self.send_reminder(*worked_secs).await,
            Action::RestComplete => self.send_rest_complete().await,
        }
    }

    async fn send_reminder(&mut self, worked_secs: u64) -> Result<(), NotifyError> {
        let worked = format_duration(worked_secs);
        eventline::info!("monitor: worked for {} without a rest, reminding", worked);

        let note = render(&self.reminder, &worked);
        self.notifier.send(&note).await?;
        Ok(())
    }

    async fn send_rest_complete(&mut self) -> Result<(), NotifyError> {
        eventline::info!("monitor: rest complete");

        let note = render(&self.rest_complete, "");
        self.notifier.send(&note).await?;
        Ok(())
    }
}

fn render(spec: &NotificationSpec, duration: &str) -> Notification {
    Notification {
        summary: spec.summary.clone(),
        body: spec.render_body(duration),
        icon: spec.icon.clone(),
        timeout_ms: spec.timeout_ms,
        urgency: spec.urgency,
    }
}
