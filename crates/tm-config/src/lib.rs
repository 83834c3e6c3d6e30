mod backend_config;
mod cache_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use backend_config::BackendConfig;
pub use cache_config::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

const CONFIG_DIR_ENV: &str = "TM_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".tm";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_CACHE_FILENAME: &str = "profile_cache.db";
const DEFAULT_FORCE_REFRESH_CLAIMS: bool = true;
const DEFAULT_RECONCILE_ON_RECONNECT: bool = true;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

const MEASUREMENT_ID_PREFIX: &str = "G-";
