use crate::Result as StoreErrorResult;

use async_trait::async_trait;
use tm_core::{Profile, ProfileUpdate};

/// Durable document store holding one profile per identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Authoritative read. `Ok(None)` means no profile exists yet.
    async fn read(&self, id: &str) -> StoreErrorResult<Option<Profile>>;

    /// Read from the on-device cache only, never touching the network.
    /// Stores without a cache report a miss.
    async fn read_from_cache(&self, _id: &str) -> StoreErrorResult<Option<Profile>> {
        Ok(None)
    }

    /// Write the whole profile, replacing any existing document.
    async fn create(&self, id: &str, profile: &Profile) -> StoreErrorResult<()>;

    /// Merge `update` into an existing document.
    async fn update(&self, id: &str, update: &ProfileUpdate) -> StoreErrorResult<()>;
}
