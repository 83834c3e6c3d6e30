use crate::{AnalyticsError, AnalyticsSink, EventParams};

use log::info;

/// Writes analytics events to the `analytics` log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalyticsSink;

impl AnalyticsSink for LogAnalyticsSink {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(params)?;
        info!(target: "analytics", "{} {}", name, payload);
        Ok(())
    }
}
