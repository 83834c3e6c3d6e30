use crate::{
    BackendConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, CacheConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for TM_CONFIG_DIR env var, else use ./.tm/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TM_CONFIG_DIR env var > ./.tm/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.cache.validate()?;

        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be blank"));
        }

        Ok(())
    }

    /// Absolute path to the on-device profile cache.
    pub fn cache_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.cache.path))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  backend: project={}, auth_domain={}, api_key={}",
            self.backend.project_id.as_deref().unwrap_or("none"),
            self.backend.auth_domain.as_deref().unwrap_or("none"),
            if self.backend.api_key.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  analytics: {}",
            if self.backend.analytics_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!(
            "  session: force_refresh_claims={}, reconcile_on_reconnect={}",
            self.session.force_refresh_claims, self.session.reconcile_on_reconnect
        );
        info!("  cache: {}", self.cache.path);
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_option_string("TM_BACKEND_API_KEY", &mut self.backend.api_key);
        Self::apply_env_option_string("TM_BACKEND_AUTH_DOMAIN", &mut self.backend.auth_domain);
        Self::apply_env_option_string("TM_BACKEND_PROJECT_ID", &mut self.backend.project_id);
        Self::apply_env_option_string(
            "TM_BACKEND_STORAGE_BUCKET",
            &mut self.backend.storage_bucket,
        );
        Self::apply_env_option_string(
            "TM_BACKEND_MESSAGING_SENDER_ID",
            &mut self.backend.messaging_sender_id,
        );
        Self::apply_env_option_string("TM_BACKEND_APP_ID", &mut self.backend.app_id);
        Self::apply_env_option_string(
            "TM_BACKEND_MEASUREMENT_ID",
            &mut self.backend.measurement_id,
        );

        // Session
        Self::apply_env_bool(
            "TM_SESSION_FORCE_REFRESH_CLAIMS",
            &mut self.session.force_refresh_claims,
        );
        Self::apply_env_bool(
            "TM_SESSION_RECONCILE_ON_RECONNECT",
            &mut self.session.reconcile_on_reconnect,
        );

        // Cache
        Self::apply_env_string("TM_CACHE_PATH", &mut self.cache.path);

        // Logging
        Self::apply_env_parse("TM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TM_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// "true" and "1" are true; anything else is false.
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values leave the target unchanged.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// An empty value clears the option.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = (!val.is_empty()).then_some(val);
        }
    }
}
