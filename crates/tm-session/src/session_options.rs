use crate::ResolverOptions;

use tm_config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub resolver: ResolverOptions,
    /// Arm a deferred durable write whenever a local fallback profile is published
    pub reconcile_on_reconnect: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            resolver: ResolverOptions::default(),
            reconcile_on_reconnect: true,
        }
    }
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            resolver: ResolverOptions::from(config),
            reconcile_on_reconnect: config.reconcile_on_reconnect,
        }
    }
}
