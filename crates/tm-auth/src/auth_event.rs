use tm_core::Identity;

/// Authentication state change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}

impl AuthEvent {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::SignedOut => None,
        }
    }
}

impl From<Option<Identity>> for AuthEvent {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::SignedIn(identity),
            None => Self::SignedOut,
        }
    }
}
