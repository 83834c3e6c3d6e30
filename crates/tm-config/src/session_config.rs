use crate::{DEFAULT_FORCE_REFRESH_CLAIMS, DEFAULT_RECONCILE_ON_RECONNECT};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Force an ID-token refresh before reading the elevation claim
    pub force_refresh_claims: bool,
    /// Arm a deferred durable write for locally synthesized profiles
    pub reconcile_on_reconnect: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            force_refresh_claims: DEFAULT_FORCE_REFRESH_CLAIMS,
            reconcile_on_reconnect: DEFAULT_RECONCILE_ON_RECONNECT,
        }
    }
}
