use crate::Result as SessionErrorResult;

use std::sync::Arc;

use log::info;
use tm_core::{Profile, ProfileUpdate, Role};
use tm_store::ProfileStore;

/// Explicit administrative profile operations.
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, id: &str) -> SessionErrorResult<Option<Profile>> {
        Ok(self.store.read(id).await?)
    }

    /// Merge `update` into the stored profile, stamping `updated_at`.
    pub async fn update_profile(&self, id: &str, update: ProfileUpdate) -> SessionErrorResult<()> {
        self.store.update(id, &update.touched()).await?;
        Ok(())
    }

    pub async fn make_admin(&self, id: &str) -> SessionErrorResult<()> {
        self.set_role(id, Role::Admin).await
    }

    pub async fn make_regular(&self, id: &str) -> SessionErrorResult<()> {
        self.set_role(id, Role::User).await
    }

    async fn set_role(&self, id: &str, role: Role) -> SessionErrorResult<()> {
        self.update_profile(id, ProfileUpdate::role(role)).await?;
        info!("Set role of {} to {}", id, role);
        Ok(())
    }
}
