use crate::{ConfigError, ConfigErrorResult, DEFAULT_CACHE_FILENAME};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// On-device profile cache, relative to the config directory
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_CACHE_FILENAME),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::cache("cache.path cannot be empty"));
        }

        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::cache(
                "cache.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
