//! Credential store trait
//!
//! The domain layer defines what it needs from persistence; implementations
//! (durable file store, in-memory test store) live in `userdir-store`. Every
//! method is an atomic read-modify-write from the caller's point of view:
//! implementations must serialize concurrent mutations so no partial write
//! is observable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{RefreshTokenRecord, User};
use crate::error::StoreError;
use crate::value_objects::UserId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for user records and active refresh tokens
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by unique username
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find a user by id
    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Insert a new user record; fails with `Conflict` if the username is taken
    async fn create_user(&self, user: &User) -> StoreResult<()>;

    /// List all user records
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Record a successful login time for a user
    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> StoreResult<()>;

    /// Insert an active refresh token record, keyed by fingerprint
    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> StoreResult<()>;

    /// Look up a refresh token record by fingerprint
    async fn find_refresh_token(
        &self,
        fingerprint: &str,
    ) -> StoreResult<Option<RefreshTokenRecord>>;

    /// Delete one refresh token record; returns whether a record was removed
    async fn delete_refresh_token(&self, fingerprint: &str) -> StoreResult<bool>;

    /// Delete every refresh token owned by a user; returns how many were removed
    async fn delete_all_refresh_tokens_for_user(&self, user_id: UserId) -> StoreResult<u64>;

    /// Remove refresh tokens whose validity window passed before `now`
    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
