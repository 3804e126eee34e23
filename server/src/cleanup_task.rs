use std::time::Duration;
use common::log_debug;

use crate::server_config::CleanupConfig;
use crate::session_registry::{SessionRegistry, SweepReport};

pub struct CleanupTask {
    registry: SessionRegistry,
    check_interval: Duration,
    session_idle_timeout: Duration,
    queue_idle_timeout: Duration,
}

impl CleanupTask {
    pub fn new(registry: SessionRegistry, config: &CleanupConfig) -> Self {
        Self {
            registry,
            check_interval: config.check_interval(),
            session_idle_timeout: config.session_idle_timeout(),
            queue_idle_timeout: config.queue_idle_timeout(),
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive().await;
        }
    }

    pub async fn cleanup_inactive(&self) -> SweepReport {
        let report = self
            .registry
            .sweep_idle(self.session_idle_timeout, self.queue_idle_timeout)
            .await;

        log_debug!(
            "Cleanup pass: {} waiting evicted, {} finalized, {} discarded",
            report.evicted_waiting.len(),
            report.finalized.len(),
            report.discarded.len()
        );

        report
    }
}
