use crate::AnalyticsError;

use serde_json::{Map, Value};

pub type EventParams = Map<String, Value>;

/// Destination for named analytics events.
pub trait AnalyticsSink: Send + Sync {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError>;
}
