use tm_core::Profile;

/// How a deferred write ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// The pending profile was written to durable storage
    Written { profile: Profile },
    /// The write was attempted and failed; it is not retried
    Failed { id: String, message: String },
    /// A durable record already existed, so the pending profile was dropped
    Superseded { stored: Profile },
    /// The session ended before connectivity returned
    Abandoned { id: String },
}

impl ReconciliationOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Written { profile } | Self::Superseded { stored: profile } => &profile.id,
            Self::Failed { id, .. } | Self::Abandoned { id } => id,
        }
    }

    /// The durable profile the session should now show, if any.
    pub fn durable_profile(&self) -> Option<&Profile> {
        match self {
            Self::Written { profile } | Self::Superseded { stored: profile } => Some(profile),
            Self::Failed { .. } | Self::Abandoned { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Written { .. } => "written",
            Self::Failed { .. } => "failed",
            Self::Superseded { .. } => "superseded",
            Self::Abandoned { .. } => "abandoned",
        }
    }
}
