//! Refresh token record - the persisted half of a session
//!
//! Only the one-way fingerprint of the opaque refresh secret is stored; the
//! raw secret lives exclusively with the client that received it. Deleting a
//! record invalidates exactly one session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Active refresh token, looked up only by fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRecord {
    /// SHA-256 fingerprint of the opaque secret (hex)
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Client descriptor captured at issuance (typically the User-Agent)
    pub device_info: Option<String>,
}

impl RefreshTokenRecord {
    /// Create a new record for a fingerprint with the given validity window
    pub fn new(
        fingerprint: String,
        user_id: UserId,
        expires_at: DateTime<Utc>,
        device_info: Option<String>,
    ) -> Self {
        Self {
            token: fingerprint,
            user_id,
            expires_at,
            created_at: Utc::now(),
            device_info,
        }
    }

    /// Check whether the record's validity window has passed at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
