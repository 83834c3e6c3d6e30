use crate::{ConfigError, ConfigErrorResult, MEASUREMENT_ID_PREFIX};

use serde::Deserialize;

/// Hosted backend project settings.
///
/// Every key is optional. A missing `measurement_id` disables analytics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
}

impl BackendConfig {
    pub fn analytics_enabled(&self) -> bool {
        self.measurement_id.is_some()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (key, value) in self.entries() {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::backend(format!(
                    "backend.{} cannot be blank",
                    key
                )));
            }
        }

        if let Some(measurement_id) = &self.measurement_id
            && !measurement_id.starts_with(MEASUREMENT_ID_PREFIX)
        {
            return Err(ConfigError::backend(format!(
                "backend.measurement_id must start with '{}'",
                MEASUREMENT_ID_PREFIX
            )));
        }

        if self.api_key.is_some() {
            if self.project_id.is_none() {
                return Err(ConfigError::backend(
                    "backend.project_id is required when api_key is set",
                ));
            }
            if self.auth_domain.is_none() {
                return Err(ConfigError::backend(
                    "backend.auth_domain is required when api_key is set",
                ));
            }
        }

        Ok(())
    }

    fn entries(&self) -> [(&'static str, Option<&String>); 7] {
        [
            ("api_key", self.api_key.as_ref()),
            ("auth_domain", self.auth_domain.as_ref()),
            ("project_id", self.project_id.as_ref()),
            ("storage_bucket", self.storage_bucket.as_ref()),
            ("messaging_sender_id", self.messaging_sender_id.as_ref()),
            ("app_id", self.app_id.as_ref()),
            ("measurement_id", self.measurement_id.as_ref()),
        ]
    }
}
