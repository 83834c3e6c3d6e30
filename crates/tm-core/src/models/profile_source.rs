use serde::{Deserialize, Serialize};

/// Where a resolved profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// Read from durable storage
    Stored,
    /// Written to durable storage during this resolution
    Created,
    /// Read from the on-device cache of a prior durable write
    Cached,
    /// Synthesized on the client, not yet persisted
    LocalFallback,
}

impl ProfileSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Created => "created",
            Self::Cached => "cached",
            Self::LocalFallback => "local_fallback",
        }
    }

    pub fn is_local(&self) -> bool {
        *self == Self::LocalFallback
    }

    pub fn is_durable(&self) -> bool {
        !self.is_local()
    }
}

impl std::fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
