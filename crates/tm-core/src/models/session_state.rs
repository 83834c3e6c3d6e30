//! Session state machine published by the session listener.

use crate::{Identity, Profile, ProfileSource};

/// The single live session of a client process.
///
/// `Idle` is the state before the first authentication notification.
/// `Idle` and `Resolving` both report `is_loading() == true`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Resolving {
        identity: Identity,
    },
    Resolved {
        identity: Identity,
        profile: Profile,
        source: ProfileSource,
    },
    SignedOut,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Resolving { identity } | Self::Resolved { identity, .. } => Some(identity),
            Self::Idle | Self::SignedOut => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Resolved { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<ProfileSource> {
        match self {
            Self::Resolved { source, .. } => Some(*source),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Idle | Self::Resolving { .. })
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn is_admin(&self) -> bool {
        self.profile().is_some_and(Profile::is_admin)
    }

    /// Short state name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolving { .. } => "resolving",
            Self::Resolved { .. } => "resolved",
            Self::SignedOut => "signed_out",
        }
    }
}
