//! Periodic refresh of the dashboard view.

use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

use super::dashboard::DashboardService;

/// Background service re-running the dashboard fetch cycle on a fixed
/// interval. Farm-context changes rebaseline the timer; the context switch
/// itself already triggered an immediate fetch.
pub struct DashboardRefreshService {
    dashboard: Arc<DashboardService>,
    poll_interval: Duration,
}

impl DashboardRefreshService {
    /// Spawn the refresh loop; abort the returned handle to stop it.
    pub fn spawn(
        dashboard: Arc<DashboardService>,
        poll_interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let service = Self {
            dashboard,
            poll_interval,
        };
        tokio::spawn(async move {
            service.run().await;
        })
    }

    async fn run(&self) {
        info!(
            interval = ?self.poll_interval,
            "starting dashboard refresh service"
        );

        let mut timer = interval_at(Instant::now() + self.poll_interval, self.poll_interval);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    debug!("dashboard refresh interval elapsed");
                    self.dashboard.fetch_all().await;
                }
                _ = self.dashboard.context_changed().notified() => {
                    debug!("farm context changed, rebaselining refresh timer");
                    timer = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
                }
            }
        }
    }
}
