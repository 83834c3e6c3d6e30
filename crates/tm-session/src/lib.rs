pub mod analytics;
pub mod analytics_error;
pub mod analytics_sink;
pub mod arm_outcome;
pub mod connectivity_observer;
pub mod error;
pub mod log_analytics_sink;
pub mod logger;
pub mod metrics;
pub mod metrics_timer;
pub mod profile_resolver;
pub mod profile_service;
pub mod reconciliation_outcome;
pub mod reconciliation_scheduler;
pub mod resolver_options;
pub mod session_deps;
mod session_listener;
pub mod session_manager;
pub mod session_options;
pub mod watch_connectivity;

pub use analytics::Analytics;
pub use analytics_error::AnalyticsError;
pub use analytics_sink::{AnalyticsSink, EventParams};
pub use arm_outcome::ArmOutcome;
pub use connectivity_observer::ConnectivityObserver;
pub use error::{Result, SessionError};
pub use log_analytics_sink::LogAnalyticsSink;
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use profile_resolver::ProfileResolver;
pub use profile_service::ProfileService;
pub use reconciliation_outcome::ReconciliationOutcome;
pub use reconciliation_scheduler::ReconciliationScheduler;
pub use resolver_options::ResolverOptions;
pub use session_deps::SessionDeps;
pub(crate) use session_listener::SessionListener;
pub use session_manager::SessionManager;
pub use session_options::SessionOptions;
pub use watch_connectivity::WatchConnectivity;

#[cfg(test)]
mod tests;

use tm_core::Environment;
use tracing::info_span;

/// Create a tracing span for one profile resolution.
/// All log entries within the resolution will include these fields.
pub fn create_resolution_span(identity_id: &str, environment: Environment) -> tracing::Span {
    info_span!(
        "resolve_profile",
        identity = %identity_id,
        environment = %environment,
    )
}
