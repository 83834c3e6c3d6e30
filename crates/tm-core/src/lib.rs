pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::custom_claims::CustomClaims;
pub use models::environment::Environment;
pub use models::identity::Identity;
pub use models::profile::Profile;
pub use models::profile_source::ProfileSource;
pub use models::profile_update::ProfileUpdate;
pub use models::resolved_profile::ResolvedProfile;
pub use models::role::Role;
pub use models::session_state::SessionState;

pub use error_location::ErrorLocation;

#[cfg(test)]
mod tests;
