use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Connectivity classification used to pick a resolution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Client with a live network connection
    Online,
    /// Client without a network connection
    Offline,
    /// Rendered on a server, no client window
    Server,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Server => "server",
        }
    }

    /// Whether resolution should start with a durable-store read.
    pub fn reads_durably(&self) -> bool {
        matches!(self, Self::Online | Self::Server)
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "server" => Ok(Self::Server),
            _ => Err(CoreError::InvalidEnvironment {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
