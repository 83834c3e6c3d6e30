//! Best-effort analytics front end.
//!
//! Events are fire-and-forget: a missing sink drops them with a warning and
//! sink failures are logged, never returned to the caller.

use crate::{AnalyticsSink, EventParams, Metrics};

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use log::{error, warn};
use serde_json::Value;
use tm_config::BackendConfig;
use tm_core::Environment;

pub const DEFAULT_AUTH_METHOD: &str = "email";

#[derive(Clone)]
pub struct Analytics {
    sink: Option<Arc<dyn AnalyticsSink>>,
    metrics: Metrics,
}

impl Analytics {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            sink: Some(sink),
            metrics: Metrics::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            metrics: Metrics::new(),
        }
    }

    /// Analytics only runs in a client and only with a measurement id.
    pub fn from_config(
        config: &BackendConfig,
        environment: Environment,
        sink: Arc<dyn AnalyticsSink>,
    ) -> Self {
        if config.analytics_enabled() && environment != Environment::Server {
            Self::new(sink)
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send an event with a `timestamp` parameter added. Returns whether the
    /// sink accepted it.
    pub fn track_event(&self, name: &str, mut params: EventParams) -> bool {
        let Some(sink) = &self.sink else {
            warn!("Analytics not initialized, dropping '{}' event", name);
            self.metrics.analytics_event(false);
            return false;
        };

        params.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        match sink.log_event(name, &params) {
            Ok(()) => {
                self.metrics.analytics_event(true);
                true
            }
            Err(e) => {
                error!("Event tracking failed for '{}': {}", name, e);
                self.metrics.analytics_event(false);
                false
            }
        }
    }

    pub fn track_login(&self, user_id: &str, method: &str) -> bool {
        self.track_event("login", Self::auth_params(user_id, method))
    }

    pub fn track_sign_up(&self, user_id: &str, method: &str) -> bool {
        self.track_event("sign_up", Self::auth_params(user_id, method))
    }

    pub fn track_logout(&self, user_id: &str) -> bool {
        let mut params = EventParams::new();
        params.insert("user_id".to_string(), Value::from(user_id));
        self.track_event("logout", params)
    }

    pub fn track_page_view(&self, page_name: &str) -> bool {
        let mut params = EventParams::new();
        params.insert("page_name".to_string(), Value::from(page_name));
        self.track_event("page_view", params)
    }

    pub fn track_error(&self, message: &str, code: Option<&str>) -> bool {
        let mut params = EventParams::new();
        params.insert("message".to_string(), Value::from(message));
        if let Some(code) = code {
            params.insert("code".to_string(), Value::from(code));
        }
        self.track_event("error", params)
    }

    fn auth_params(user_id: &str, method: &str) -> EventParams {
        let mut params = EventParams::new();
        params.insert("method".to_string(), Value::from(method));
        params.insert("user_id".to_string(), Value::from(user_id));
        params
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::disabled()
    }
}
