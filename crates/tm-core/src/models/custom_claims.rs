use serde::{Deserialize, Serialize};

/// Custom claims asserted by the authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub admin: bool,
}

impl CustomClaims {
    pub fn admin() -> Self {
        Self { admin: true }
    }

    /// Whether the claims assert the elevated role.
    pub fn is_elevated(&self) -> bool {
        self.admin
    }
}
