use crate::{AuthSubscription, Result as AuthErrorResult};

use async_trait::async_trait;
use tm_core::{CustomClaims, Identity};

/// Hosted authentication service, seen from the client.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Subscribe to authentication state changes. The current state is
    /// delivered first.
    fn subscribe(&self) -> AuthSubscription;

    async fn sign_in_with_email(&self, email: &str, password: &str) -> AuthErrorResult<Identity>;

    async fn sign_up_with_email(&self, email: &str, password: &str) -> AuthErrorResult<Identity>;

    async fn sign_out(&self) -> AuthErrorResult<()>;

    /// Signed ID token for `identity`. Without `force_refresh` a cached token
    /// may be returned, carrying claims as they were when it was minted.
    async fn id_token(&self, identity: &Identity, force_refresh: bool) -> AuthErrorResult<String>;

    /// Custom claims read from a verified ID token.
    async fn get_claims(
        &self,
        identity: &Identity,
        force_refresh: bool,
    ) -> AuthErrorResult<CustomClaims>;
}
