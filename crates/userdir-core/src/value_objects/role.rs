//! User role value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to a user record and carried in access-token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrative access (user management, sign-out-everywhere for others)
    Admin,
    /// Ordinary directory user
    #[default]
    User,
}

impl Role {
    /// Check whether this role grants administrative access
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}
