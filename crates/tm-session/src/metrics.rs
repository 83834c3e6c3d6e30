use crate::ReconciliationOutcome;

use metrics::{counter, gauge, histogram};
use tm_core::ProfileSource;

/// Metrics collector for session resolution
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "tm_session",
        }
    }

    /// Record a resolution applied to the session state
    pub fn resolution_completed(&self, source: ProfileSource) {
        counter!(format!("{}.resolutions.total", self.prefix)).increment(1);
        counter!(format!("{}.resolutions.{}", self.prefix, source.as_str())).increment(1);
    }

    /// Record a resolution dropped because a newer notification superseded it
    pub fn resolution_discarded(&self) {
        counter!(format!("{}.resolutions.discarded", self.prefix)).increment(1);
    }

    pub fn resolution_failed(&self) {
        counter!(format!("{}.resolutions.failed", self.prefix)).increment(1);
    }

    /// Record resolution latency
    pub fn resolution_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.resolutions.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    /// Record a newly armed deferred write
    pub fn reconciliation_armed(&self, pending: usize) {
        counter!(format!("{}.reconciliation.armed", self.prefix)).increment(1);
        gauge!(format!("{}.reconciliation.pending", self.prefix)).set(pending as f64);
    }

    pub fn reconciliation_finished(&self, outcome: &ReconciliationOutcome) {
        counter!(format!(
            "{}.reconciliation.{}",
            self.prefix,
            outcome.name()
        ))
        .increment(1);
    }

    pub fn reconciliation_pending(&self, pending: usize) {
        gauge!(format!("{}.reconciliation.pending", self.prefix)).set(pending as f64);
    }

    pub fn analytics_event(&self, delivered: bool) {
        let status = if delivered { "sent" } else { "dropped" };
        counter!(format!("{}.analytics.{}", self.prefix, status)).increment(1);
    }

    /// Record a session state transition
    pub fn state_published(&self, state_name: &str) {
        counter!(format!("{}.state.{}", self.prefix, state_name)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
