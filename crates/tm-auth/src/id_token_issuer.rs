use crate::{AuthError, IdTokenClaims, Result as AuthErrorResult};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tm_core::{CustomClaims, Identity};

/// ID token lifetime, matching the hosted provider's one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Mints HS256 ID tokens for the in-process provider.
pub struct IdTokenIssuer {
    encoding_key: EncodingKey,
    ttl_secs: i64,
}

impl IdTokenIssuer {
    pub fn with_hs256(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    #[track_caller]
    pub fn issue(&self, identity: &Identity, claims: CustomClaims) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();
        let token_claims = IdTokenClaims {
            sub: identity.id.clone(),
            exp: now + self.ttl_secs,
            iat: now,
            email: identity.email.clone(),
            admin: claims.admin,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &token_claims,
            &self.encoding_key,
        )
        .map_err(|source| AuthError::JwtEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
