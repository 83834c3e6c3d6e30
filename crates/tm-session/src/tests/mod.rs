mod session_options;
mod watch_connectivity;

use crate::{AnalyticsError, AnalyticsSink, EventParams};

use std::sync::Mutex;

use async_trait::async_trait;
use tm_core::{Identity, Profile, ProfileUpdate, Role};
use tm_store::{MemoryProfileStore, ProfileStore, Result as StoreErrorResult, StoreError};

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Mutex<Vec<(String, EventParams)>>,
}

impl AnalyticsSink for RecordingSink {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), params.clone()));
        Ok(())
    }
}

pub(crate) struct RejectingSink;

impl AnalyticsSink for RejectingSink {
    fn log_event(&self, _name: &str, _params: &EventParams) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::rejected("quota exceeded"))
    }
}

/// Store whose durable reads work but whose writes always fail
pub(crate) struct ReadOnlyStore {
    pub(crate) inner: MemoryProfileStore,
}

#[async_trait]
impl ProfileStore for ReadOnlyStore {
    async fn read(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        self.inner.read(id).await
    }

    async fn read_from_cache(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        self.inner.read_from_cache(id).await
    }

    async fn create(&self, _id: &str, _profile: &Profile) -> StoreErrorResult<()> {
        Err(StoreError::unavailable("write rejected"))
    }

    async fn update(&self, _id: &str, _update: &ProfileUpdate) -> StoreErrorResult<()> {
        Err(StoreError::unavailable("write rejected"))
    }
}

pub(crate) fn stored_profile(id: &str, role: Role) -> Profile {
    Profile::from_identity(&Identity::new(id).with_email(format!("{}@example.com", id)), role)
}
