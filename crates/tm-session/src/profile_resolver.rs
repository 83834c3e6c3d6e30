//! Turns a signed-in identity into a role-annotated profile.
//!
//! Online and server resolutions read durable storage first. Any store
//! failure degrades to the on-device cache and then to a locally synthesized
//! profile, so resolution itself only fails on an unusable identity.
//! Elevation claims are applied on the durable path only and are never
//! written back: a claim-promoted profile is promoted in memory while the
//! stored record keeps its role.

use crate::{
    Metrics, MetricsTimer, ResolverOptions, Result as SessionErrorResult, SessionError,
    create_resolution_span,
};

use std::sync::Arc;

use log::{debug, info, warn};
use tm_auth::AuthProvider;
use tm_core::{
    CustomClaims, Environment, Identity, Profile, ProfileSource, ResolvedProfile, Role,
};
use tm_store::ProfileStore;
use tracing::Instrument;

pub struct ProfileResolver {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn ProfileStore>,
    options: ResolverOptions,
    metrics: Metrics,
}

impl ProfileResolver {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn ProfileStore>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            auth,
            store,
            options,
            metrics: Metrics::new(),
        }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub async fn resolve(
        &self,
        identity: &Identity,
        environment: Environment,
    ) -> SessionErrorResult<ResolvedProfile> {
        identity.validate().map_err(SessionError::invalid_identity)?;

        let span = create_resolution_span(&identity.id, environment);
        let timer = MetricsTimer::new(self.metrics.clone());

        let resolved = async {
            if environment.reads_durably()
                && let Some(resolved) = self.resolve_durably(identity).await
            {
                return resolved;
            }
            self.resolve_locally(identity).await
        }
        .instrument(span)
        .await;

        timer.finish();
        debug!(
            "Resolved {} as {} ({})",
            identity.id, resolved.profile.role, resolved.source
        );

        Ok(resolved)
    }

    /// `None` when durable storage could not answer.
    async fn resolve_durably(&self, identity: &Identity) -> Option<ResolvedProfile> {
        match self.store.read(&identity.id).await {
            Ok(Some(mut profile)) => {
                if self.claims(identity).await.is_elevated() && profile.elevate() {
                    info!("Elevated {} to admin from claim", identity.id);
                }
                Some(ResolvedProfile::new(profile, ProfileSource::Stored))
            }
            Ok(None) => {
                let role = if self.claims(identity).await.is_elevated() {
                    Role::Admin
                } else {
                    Role::User
                };
                let profile = Profile::from_identity(identity, role);

                match self.store.create(&identity.id, &profile).await {
                    Ok(()) => {
                        info!("Created {} profile for {}", role, identity.id);
                        Some(ResolvedProfile::new(profile, ProfileSource::Created))
                    }
                    Err(e) => {
                        warn!("Profile create failed for {}, degrading: {}", identity.id, e);
                        None
                    }
                }
            }
            Err(e) => {
                warn!("Durable read failed for {}, degrading: {}", identity.id, e);
                None
            }
        }
    }

    async fn resolve_locally(&self, identity: &Identity) -> ResolvedProfile {
        match self.store.read_from_cache(&identity.id).await {
            Ok(Some(profile)) => return ResolvedProfile::new(profile, ProfileSource::Cached),
            Ok(None) => debug!("No cached profile for {}", identity.id),
            Err(e) => warn!("Cache read failed for {}: {}", identity.id, e),
        }

        ResolvedProfile::new(
            Profile::local_fallback(identity),
            ProfileSource::LocalFallback,
        )
    }

    /// Unreachable claims count as no elevation.
    async fn claims(&self, identity: &Identity) -> CustomClaims {
        match self
            .auth
            .get_claims(identity, self.options.force_refresh_claims)
            .await
        {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Claim refresh failed for {}: {}", identity.id, e);
                CustomClaims::default()
            }
        }
    }
}
