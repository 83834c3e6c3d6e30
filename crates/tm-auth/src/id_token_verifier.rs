use crate::{AuthError, IdTokenClaims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Clock skew tolerance in seconds
const LEEWAY_SECS: u64 = 30;

/// Checks the signature and lifetime of ID tokens minted by the provider.
pub struct IdTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl IdTokenVerifier {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<IdTokenClaims> {
        let caller = Location::caller();
        let claims = decode::<IdTokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(caller),
                },
                _ => AuthError::JwtDecode {
                    source: e,
                    location: ErrorLocation::from(caller),
                },
            })?
            .claims;

        claims.validate()?;
        Ok(claims)
    }

    /// Like [`verify`](Self::verify), and the token must belong to `subject`.
    #[track_caller]
    pub fn verify_for(&self, token: &str, subject: &str) -> AuthErrorResult<IdTokenClaims> {
        let claims = self.verify(token)?;
        if claims.sub == subject {
            return Ok(claims);
        }

        Err(AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("token issued for '{}', expected '{}'", claims.sub, subject),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
