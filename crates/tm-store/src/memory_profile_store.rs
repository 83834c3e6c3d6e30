//! In-process profile store with an on-device cache.
//!
//! Successful durable reads and writes populate the cache, the way the hosted
//! document store's offline persistence does. `set_reachable(false)` makes
//! every durable call fail while leaving the cache readable.

use crate::{ProfileStore, Result as StoreErrorResult, StoreError};

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tm_core::{Profile, ProfileUpdate};

pub struct MemoryProfileStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    documents: HashMap<String, Profile>,
    cache: HashMap<String, Profile>,
    unreachable: bool,
    cache_failing: bool,
    read_delays: HashMap<String, Duration>,
    created: Vec<Profile>,
    updates: Vec<(String, ProfileUpdate)>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a durable document without touching the cache or call counters.
    pub fn insert(&self, profile: Profile) {
        self.lock().documents.insert(profile.id.clone(), profile);
    }

    /// Seed the on-device cache only.
    pub fn insert_cached(&self, profile: Profile) {
        self.lock().cache.insert(profile.id.clone(), profile);
    }

    pub fn document(&self, id: &str) -> Option<Profile> {
        self.lock().documents.get(id).cloned()
    }

    pub fn cached(&self, id: &str) -> Option<Profile> {
        self.lock().cache.get(id).cloned()
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.lock().unreachable = !reachable;
    }

    pub fn set_cache_failing(&self, failing: bool) {
        self.lock().cache_failing = failing;
    }

    /// Hold durable reads of `id` for `delay` before answering.
    pub fn delay_reads_for(&self, id: &str, delay: Duration) {
        self.lock().read_delays.insert(id.to_string(), delay);
    }

    pub fn create_calls(&self) -> usize {
        self.lock().created.len()
    }

    /// Every profile passed to `create`, in call order.
    pub fn created_profiles(&self) -> Vec<Profile> {
        self.lock().created.clone()
    }

    pub fn update_calls(&self) -> usize {
        self.lock().updates.len()
    }

    #[track_caller]
    fn ensure_reachable(inner: &StoreInner) -> StoreErrorResult<()> {
        if inner.unreachable {
            Err(StoreError::unavailable("document store unreachable"))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn read(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        let delay = self.lock().read_delays.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        Self::ensure_reachable(&inner)?;

        let profile = inner.documents.get(id).cloned();
        if let Some(profile) = &profile {
            inner.cache.insert(id.to_string(), profile.clone());
        }
        debug!("read {} -> {}", id, if profile.is_some() { "hit" } else { "miss" });

        Ok(profile)
    }

    async fn read_from_cache(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        let inner = self.lock();
        if inner.cache_failing {
            return Err(StoreError::cache_read("on-device cache unavailable"));
        }
        Ok(inner.cache.get(id).cloned())
    }

    async fn create(&self, id: &str, profile: &Profile) -> StoreErrorResult<()> {
        let mut inner = self.lock();
        inner.created.push(profile.clone());
        Self::ensure_reachable(&inner)?;

        inner.documents.insert(id.to_string(), profile.clone());
        inner.cache.insert(id.to_string(), profile.clone());

        Ok(())
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> StoreErrorResult<()> {
        let mut inner = self.lock();
        inner.updates.push((id.to_string(), update.clone()));
        Self::ensure_reachable(&inner)?;

        let document = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        document.apply(update);
        let updated = document.clone();
        inner.cache.insert(id.to_string(), updated);

        Ok(())
    }
}
