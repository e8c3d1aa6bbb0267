// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::services::notify::Notifier;

use super::{AnyError, Daemon};

impl<N: Notifier> Daemon<N> {
    /// Sleep one poll period, tick, repeat. Returns on shutdown or when the
    /// idle source fails.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), AnyError> {
        let period = Duration::from_secs(self.monitor.thresholds().poll_secs());
        eventline::info!("daemon: monitoring every {}s", period.as_secs());

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        eventline::info!("daemon: stopping (shutdown requested)");
                        break;
                    }
                    continue;
                }

                _ = sleep(period) => {}
            }

            if let Err(e) = self.tick().await {
                eventline::error!("daemon: idle source failed: {}", e);
                return Err(e);
            }
        }

        eventline::info!(
            "daemon: stopped after {} ticks ({} reminders, {} rests)",
            self.state().ticks(),
            self.state().reminders_sent(),
            self.state().rests_completed()
        );
        Ok(())
    }
}
