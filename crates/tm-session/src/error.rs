use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use tm_auth::AuthError;
use tm_core::CoreError;
use tm_store::StoreError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Authentication failed: {source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Profile store failed: {source} {location}")]
    Store {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Invalid identity: {source} {location}")]
    InvalidIdentity {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Session listener already started {location}")]
    AlreadyStarted { location: ErrorLocation },

    #[error("Session listener not started {location}")]
    NotStarted { location: ErrorLocation },

    #[error("Logger initialization failed: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn invalid_identity(source: CoreError) -> Self {
        Self::InvalidIdentity {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_started() -> Self {
        Self::AlreadyStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_started() -> Self {
        Self::NotStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message suitable for showing to the person signing in.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Auth { source, .. } => source.user_message(),
            _ => "An error occurred. Please try again.",
        }
    }
}

impl From<AuthError> for SessionError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for SessionError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
