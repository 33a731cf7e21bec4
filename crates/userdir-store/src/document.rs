//! Persisted document shape and the mutations both stores share
//!
//! One JSON document holds the user collection and the active refresh token
//! table: `{ "users": [...], "refreshTokens": [...] }`. Store implementations
//! apply these operations inside their own locking/persistence discipline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use userdir_core::{RefreshTokenRecord, StoreError, User, UserId};

/// Full persisted state of the credential store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDocument {
    pub users: Vec<User>,
    pub refresh_tokens: Vec<RefreshTokenRecord>,
}

impl AuthDocument {
    pub fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Insert a user; usernames are unique
    pub fn insert_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.find_user_by_username(&user.username).is_some() {
            return Err(StoreError::conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        self.users.push(user);
        Ok(())
    }

    /// Set last-login (and updated-at) for a user; missing users are a no-op
    pub fn touch_last_login(&mut self, id: UserId, at: DateTime<Utc>) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
            user.updated_at = at;
        }
    }

    pub fn find_refresh_token(&self, fingerprint: &str) -> Option<&RefreshTokenRecord> {
        self.refresh_tokens.iter().find(|t| t.token == fingerprint)
    }

    pub fn insert_refresh_token(&mut self, record: RefreshTokenRecord) {
        self.refresh_tokens.push(record);
    }

    /// Remove one token by fingerprint; returns whether anything was removed
    pub fn delete_refresh_token(&mut self, fingerprint: &str) -> bool {
        let before = self.refresh_tokens.len();
        self.refresh_tokens.retain(|t| t.token != fingerprint);
        self.refresh_tokens.len() < before
    }

    /// Remove every token owned by a user; returns how many were removed
    pub fn delete_all_refresh_tokens_for_user(&mut self, user_id: UserId) -> u64 {
        let before = self.refresh_tokens.len();
        self.refresh_tokens.retain(|t| t.user_id != user_id);
        (before - self.refresh_tokens.len()) as u64
    }

    /// Remove tokens expired at `now`; returns how many were removed
    pub fn purge_expired_refresh_tokens(&mut self, now: DateTime<Utc>) -> u64 {
        let before = self.refresh_tokens.len();
        self.refresh_tokens.retain(|t| !t.is_expired(now));
        (before - self.refresh_tokens.len()) as u64
    }
}
