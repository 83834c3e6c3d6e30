use crate::{Profile, ProfileSource};

/// Profile resolver output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub profile: Profile,
    pub source: ProfileSource,
}

impl ResolvedProfile {
    pub fn new(profile: Profile, source: ProfileSource) -> Self {
        Self { profile, source }
    }

    pub fn is_local(&self) -> bool {
        self.source.is_local()
    }
}
