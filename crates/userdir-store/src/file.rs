//! Durable file-backed credential store
//!
//! Persists the whole `AuthDocument` as one JSON file. Every operation takes
//! the store lock, reads the full document, applies its mutation, and writes
//! the full document back through a temp-file rename, so callers never
//! observe a partial write and concurrent read-modify-write cycles cannot
//! drop each other's updates. A missing file reads as the empty document
//! (first-run fallback); any other read or write failure is surfaced, never
//! swallowed.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;
use userdir_core::{
    CredentialStore, RefreshTokenRecord, StoreError, StoreResult, User, UserId,
};

use crate::document::AuthDocument;

/// File-backed credential store
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes every read-modify-write cycle on the document
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store persisting to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<AuthDocument> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).map_err(StoreError::serialization),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store file absent, starting empty");
                Ok(AuthDocument::default())
            }
            Err(e) => Err(StoreError::io(e)),
        }
    }

    fn save(&self, doc: &AuthDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::io)?;
            }
        }

        let data = serde_json::to_string_pretty(doc).map_err(StoreError::serialization)?;

        // Write-then-rename keeps the document whole even if we crash mid-write
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(StoreError::io)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::io)?;
        Ok(())
    }

    /// Run one atomic read-modify-write cycle under the store lock
    fn with_document<T>(
        &self,
        f: impl FnOnce(&mut AuthDocument) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self.lock.lock();
        let mut doc = self.load()?;
        let result = f(&mut doc)?;
        self.save(&doc)?;
        Ok(result)
    }

    /// Run a read-only operation under the store lock
    fn with_document_read<T>(
        &self,
        f: impl FnOnce(&AuthDocument) -> T,
    ) -> StoreResult<T> {
        let _guard = self.lock.lock();
        let doc = self.load()?;
        Ok(f(&doc))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.with_document_read(|doc| doc.find_user_by_username(username).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        self.with_document_read(|doc| doc.find_user_by_id(id).cloned())
    }

    async fn create_user(&self, user: &User) -> StoreResult<()> {
        self.with_document(|doc| doc.insert_user(user.clone()))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.with_document_read(|doc| doc.users.clone())
    }

    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> StoreResult<()> {
        self.with_document(|doc| {
            doc.touch_last_login(id, at);
            Ok(())
        })
    }

    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> StoreResult<()> {
        self.with_document(|doc| {
            doc.insert_refresh_token(record.clone());
            Ok(())
        })
    }

    async fn find_refresh_token(
        &self,
        fingerprint: &str,
    ) -> StoreResult<Option<RefreshTokenRecord>> {
        self.with_document_read(|doc| doc.find_refresh_token(fingerprint).cloned())
    }

    async fn delete_refresh_token(&self, fingerprint: &str) -> StoreResult<bool> {
        self.with_document(|doc| Ok(doc.delete_refresh_token(fingerprint)))
    }

    async fn delete_all_refresh_tokens_for_user(&self, user_id: UserId) -> StoreResult<u64> {
        self.with_document(|doc| Ok(doc.delete_all_refresh_tokens_for_user(user_id)))
    }

    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        self.with_document(|doc| Ok(doc.purge_expired_refresh_tokens(now)))
    }
}
