use tm_config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Force an ID-token refresh before reading the elevation claim
    pub force_refresh_claims: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            force_refresh_claims: true,
        }
    }
}

impl From<&SessionConfig> for ResolverOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            force_refresh_claims: config.force_refresh_claims,
        }
    }
}
