//! In-memory credential store for tests
//!
//! Same contract as the file store, backed by a locked document instead of a
//! file. Used by the service unit tests so they run without touching disk.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use userdir_core::{
    CredentialStore, RefreshTokenRecord, StoreResult, User, UserId,
};

use crate::document::AuthDocument;

/// In-memory credential store
#[derive(Default)]
pub struct MemoryCredentialStore {
    doc: RwLock<AuthDocument>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active refresh token records (test convenience)
    #[must_use]
    pub fn refresh_token_count(&self) -> usize {
        self.doc.read().refresh_tokens.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.doc.read().find_user_by_username(username).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.doc.read().find_user_by_id(id).cloned())
    }

    async fn create_user(&self, user: &User) -> StoreResult<()> {
        self.doc.write().insert_user(user.clone())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.doc.read().users.clone())
    }

    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> StoreResult<()> {
        self.doc.write().touch_last_login(id, at);
        Ok(())
    }

    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> StoreResult<()> {
        self.doc.write().insert_refresh_token(record.clone());
        Ok(())
    }

    async fn find_refresh_token(
        &self,
        fingerprint: &str,
    ) -> StoreResult<Option<RefreshTokenRecord>> {
        Ok(self.doc.read().find_refresh_token(fingerprint).cloned())
    }

    async fn delete_refresh_token(&self, fingerprint: &str) -> StoreResult<bool> {
        Ok(self.doc.write().delete_refresh_token(fingerprint))
    }

    async fn delete_all_refresh_tokens_for_user(&self, user_id: UserId) -> StoreResult<u64> {
        Ok(self.doc.write().delete_all_refresh_tokens_for_user(user_id))
    }

    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        Ok(self.doc.write().purge_expired_refresh_tokens(now))
    }
}
