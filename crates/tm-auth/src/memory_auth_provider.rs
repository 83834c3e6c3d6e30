//! In-process authentication provider.
//!
//! Behaves like the hosted service as far as the session core can observe:
//! email/password accounts, signed ID tokens cached until a forced refresh,
//! per-user custom claims, and state notifications fanned out to every live
//! subscription. A reachability switch simulates the provider being offline.

use crate::error_codes::{
    EMAIL_ALREADY_IN_USE, INVALID_EMAIL, USER_NOT_FOUND, WEAK_PASSWORD, WRONG_PASSWORD,
};
use crate::{
    AuthError, AuthEvent, AuthProvider, AuthSubscription, IdTokenIssuer, IdTokenVerifier,
    Result as AuthErrorResult,
};

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, info};
use tm_core::{CustomClaims, Identity};
use tokio::sync::mpsc;
use uuid::Uuid;

const MIN_PASSWORD_LENGTH: usize = 6;

pub struct MemoryAuthProvider {
    inner: Mutex<ProviderInner>,
    issuer: IdTokenIssuer,
    verifier: IdTokenVerifier,
}

struct ProviderInner {
    /// Accounts by email
    accounts: HashMap<String, Account>,
    /// Custom claims by identity id
    claims: HashMap<String, CustomClaims>,
    /// Last minted token by identity id
    tokens: HashMap<String, String>,
    current: Option<Identity>,
    subscribers: Vec<mpsc::UnboundedSender<AuthEvent>>,
    reachable: bool,
}

struct Account {
    password: String,
    identity: Identity,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        let secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::with_secret(secret.as_bytes())
    }

    pub fn with_secret(secret: &[u8]) -> Self {
        Self {
            inner: Mutex::new(ProviderInner {
                accounts: HashMap::new(),
                claims: HashMap::new(),
                tokens: HashMap::new(),
                current: None,
                subscribers: Vec::new(),
                reachable: true,
            }),
            issuer: IdTokenIssuer::with_hs256(secret),
            verifier: IdTokenVerifier::with_hs256(secret),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProviderInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an account without signing in.
    pub fn add_account(&self, identity: Identity, password: &str) {
        let email = identity.email.clone().unwrap_or_else(|| identity.id.clone());
        self.lock().accounts.insert(
            email,
            Account {
                password: password.to_string(),
                identity,
            },
        );
    }

    /// Set custom claims for an identity. Cached tokens keep the old claims
    /// until a forced refresh.
    pub fn set_claims(&self, identity_id: &str, claims: CustomClaims) {
        self.lock().claims.insert(identity_id.to_string(), claims);
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Push an authentication state change, as a restored or expired
    /// session would.
    pub fn set_current_user(&self, identity: Option<Identity>) {
        let mut inner = self.lock();
        inner.current = identity.clone();
        Self::notify(&mut inner, AuthEvent::from(identity));
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }

    fn notify(inner: &mut ProviderInner, event: AuthEvent) {
        inner.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        debug!(
            "Auth state change delivered to {} subscriber(s)",
            inner.subscribers.len()
        );
    }

    #[track_caller]
    fn ensure_reachable(inner: &ProviderInner) -> AuthErrorResult<()> {
        if inner.reachable {
            Ok(())
        } else {
            Err(AuthError::network("authentication provider unreachable"))
        }
    }

    #[track_caller]
    fn validate_email(email: &str) -> AuthErrorResult<()> {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if valid {
            Ok(())
        } else {
            Err(AuthError::provider(
                INVALID_EMAIL,
                format!("'{}' is not a valid email", email),
            ))
        }
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Receiver is alive, so the initial send cannot fail.
        let _ = tx.send(AuthEvent::from(inner.current.clone()));
        inner.subscribers.push(tx);
        AuthSubscription::new(rx)
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> AuthErrorResult<Identity> {
        Self::validate_email(email)?;

        let mut inner = self.lock();
        Self::ensure_reachable(&inner)?;

        let identity = match inner.accounts.get(email) {
            None => {
                return Err(AuthError::provider(
                    USER_NOT_FOUND,
                    format!("no account for {}", email),
                ));
            }
            Some(account) if account.password != password => {
                return Err(AuthError::provider(WRONG_PASSWORD, "password mismatch"));
            }
            Some(account) => account.identity.clone(),
        };

        inner.current = Some(identity.clone());
        Self::notify(&mut inner, AuthEvent::SignedIn(identity.clone()));
        info!("Signed in {}", identity.id);

        Ok(identity)
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> AuthErrorResult<Identity> {
        Self::validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::provider(
                WEAK_PASSWORD,
                format!(
                    "password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }

        let mut inner = self.lock();
        Self::ensure_reachable(&inner)?;

        if inner.accounts.contains_key(email) {
            return Err(AuthError::provider(
                EMAIL_ALREADY_IN_USE,
                format!("{} already registered", email),
            ));
        }

        let identity = Identity::new(Uuid::new_v4().simple().to_string()).with_email(email);
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        inner.current = Some(identity.clone());
        Self::notify(&mut inner, AuthEvent::SignedIn(identity.clone()));
        info!("Signed up {}", identity.id);

        Ok(identity)
    }

    async fn sign_out(&self) -> AuthErrorResult<()> {
        let mut inner = self.lock();
        Self::ensure_reachable(&inner)?;

        if let Some(identity) = inner.current.take() {
            inner.tokens.remove(&identity.id);
            info!("Signed out {}", identity.id);
        }
        Self::notify(&mut inner, AuthEvent::SignedOut);

        Ok(())
    }

    async fn id_token(&self, identity: &Identity, force_refresh: bool) -> AuthErrorResult<String> {
        let mut inner = self.lock();

        if !force_refresh && let Some(token) = inner.tokens.get(&identity.id) {
            return Ok(token.clone());
        }

        Self::ensure_reachable(&inner)?;

        let claims = inner.claims.get(&identity.id).copied().unwrap_or_default();
        let token = self.issuer.issue(identity, claims)?;
        inner.tokens.insert(identity.id.clone(), token.clone());

        Ok(token)
    }

    async fn get_claims(
        &self,
        identity: &Identity,
        force_refresh: bool,
    ) -> AuthErrorResult<CustomClaims> {
        let token = self.id_token(identity, force_refresh).await?;
        let claims = self.verifier.verify_for(&token, &identity.id)?;
        Ok(claims.custom_claims())
    }
}
