//! Durable store composed with an on-device SQLite cache.

use crate::{ProfileStore, Result as StoreErrorResult, SqliteProfileCache, StoreError};

use async_trait::async_trait;
use log::warn;
use tm_core::{Profile, ProfileUpdate};

/// Wraps a remote `ProfileStore`, mirroring every successful durable read
/// and write into a `SqliteProfileCache`. Mirror failures are logged and do
/// not fail the durable call.
pub struct CachedProfileStore<R> {
    remote: R,
    cache: SqliteProfileCache,
}

impl<R: ProfileStore> CachedProfileStore<R> {
    pub fn new(remote: R, cache: SqliteProfileCache) -> Self {
        Self { remote, cache }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn cache(&self) -> &SqliteProfileCache {
        &self.cache
    }

    async fn mirror(&self, profile: &Profile) {
        if let Err(e) = self.cache.put(profile).await {
            warn!("Failed to mirror profile {} into cache: {}", profile.id, e);
        }
    }
}

#[async_trait]
impl<R: ProfileStore> ProfileStore for CachedProfileStore<R> {
    async fn read(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        let profile = self.remote.read(id).await?;
        if let Some(profile) = &profile {
            self.mirror(profile).await;
        }
        Ok(profile)
    }

    async fn read_from_cache(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        self.cache
            .get(id)
            .await
            .map_err(|e| StoreError::cache_read(e.to_string()))
    }

    async fn create(&self, id: &str, profile: &Profile) -> StoreErrorResult<()> {
        self.remote.create(id, profile).await?;
        self.mirror(profile).await;
        Ok(())
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> StoreErrorResult<()> {
        self.remote.update(id, update).await?;

        match self.cache.get(id).await {
            Ok(Some(mut cached)) => {
                cached.apply(update);
                self.mirror(&cached).await;
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to refresh cached profile {}: {}", id, e),
        }

        Ok(())
    }
}
