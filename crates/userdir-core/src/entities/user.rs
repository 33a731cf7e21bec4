//! User entity - one record in the directory's credential store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Role, UserId};

/// User record as owned by the credential store
///
/// The `password_hash` field holds an irreversible, salted argon2 hash and
/// must never cross the API boundary; public views are built from the other
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user record with a fresh id and current timestamps
    pub fn new(username: String, password_hash: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            username,
            password_hash,
            email,
            role,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }

    /// Check if this user holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
