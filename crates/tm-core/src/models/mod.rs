pub mod custom_claims;
pub mod environment;
pub mod identity;
pub mod profile;
pub mod profile_source;
pub mod profile_update;
pub mod resolved_profile;
pub mod role;
pub mod session_state;
