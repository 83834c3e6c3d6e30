use crate::error_codes::{
    EMAIL_ALREADY_IN_USE, ID_TOKEN_EXPIRED, INTERNAL_ERROR, INVALID_CREDENTIAL, INVALID_EMAIL,
    INVALID_ID_TOKEN, NETWORK_REQUEST_FAILED, USER_NOT_FOUND, WEAK_PASSWORD, WRONG_PASSWORD,
};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const GENERIC_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Auth provider error [{code}]: {message} {location}")]
    Provider {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("ID token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Creates a provider error at caller location.
    #[track_caller]
    pub fn provider(code: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            code: code.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates a network failure at caller location.
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::provider(NETWORK_REQUEST_FAILED, message)
    }

    /// Provider-style error code
    pub fn code(&self) -> &str {
        match self {
            Self::Provider { code, .. } => code,
            Self::JwtDecode { .. } | Self::InvalidClaim { .. } => INVALID_ID_TOKEN,
            Self::TokenExpired { .. } => ID_TOKEN_EXPIRED,
            Self::JwtEncode { .. } => INTERNAL_ERROR,
        }
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> &'static str {
        match self.code() {
            EMAIL_ALREADY_IN_USE => "This email is already in use.",
            INVALID_EMAIL => "Invalid email address.",
            WEAK_PASSWORD => "Password is too weak. It must be at least 6 characters.",
            USER_NOT_FOUND => "No account is registered with this email.",
            WRONG_PASSWORD => "Wrong password.",
            INVALID_CREDENTIAL => "Email or password is incorrect.",
            NETWORK_REQUEST_FAILED => "Network error. Check your connection and try again.",
            _ => GENERIC_MESSAGE,
        }
    }

    /// Whether the failure came from an unreachable provider.
    pub fn is_transient(&self) -> bool {
        self.code() == NETWORK_REQUEST_FAILED
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
