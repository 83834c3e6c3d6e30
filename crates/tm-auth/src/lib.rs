pub mod auth_event;
pub mod auth_provider;
pub mod auth_subscription;
pub mod claims;
pub mod error;
pub mod error_codes;
pub mod id_token_issuer;
pub mod id_token_verifier;
pub mod memory_auth_provider;

pub use auth_event::AuthEvent;
pub use auth_provider::AuthProvider;
pub use auth_subscription::AuthSubscription;
pub use claims::IdTokenClaims;
pub use error::{AuthError, Result};
pub use id_token_issuer::IdTokenIssuer;
pub use id_token_verifier::IdTokenVerifier;
pub use memory_auth_provider::MemoryAuthProvider;
