//! Profile entity - the role-bearing record kept per identity.

use crate::{Identity, ProfileUpdate, Role};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Durable user profile keyed by identity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_ref: Option<String>,
    pub role: Role,
    /// Set once on first write
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a profile from identity attributes.
    ///
    /// Timestamps are truncated to milliseconds so every store round-trips
    /// them exactly.
    pub fn from_identity(identity: &Identity, role: Role) -> Self {
        let now = Utc::now().trunc_subsecs(3);
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            avatar_ref: identity.avatar_ref.clone(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Provisional profile used while durable storage is unreachable.
    /// Always `Role::User`: claims are not trusted on this path.
    pub fn local_fallback(identity: &Identity) -> Self {
        Self::from_identity(identity, Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Raise the role to `Admin`. Returns whether anything changed.
    pub fn elevate(&mut self) -> bool {
        if self.role.is_admin() {
            return false;
        }
        self.role = Role::Admin;
        true
    }

    /// Apply a partial update. `created_at` is never touched.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(email) = &update.email {
            self.email = Some(email.clone());
        }
        if let Some(display_name) = &update.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(avatar_ref) = &update.avatar_ref {
            self.avatar_ref = Some(avatar_ref.clone());
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(updated_at) = update.updated_at {
            self.updated_at = updated_at;
        }
    }
}
