//! Service context - dependency container for services
//!
//! Holds the credential store, token codec, and session policy. Everything is
//! injected at construction so tests can run against an in-memory store with
//! short token lifetimes.

use std::sync::Arc;

use userdir_common::auth::{hash_password, JwtService};
use userdir_core::CredentialStore;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn CredentialStore>,
    jwt_service: Arc<JwtService>,
    /// Refresh token validity window in seconds
    refresh_token_expiry: i64,
    /// Argon2 hash used to equalize login latency for unknown usernames
    dummy_password_hash: Arc<str>,
}

impl ServiceContext {
    /// Get the credential store
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// Get the token codec
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Refresh token validity window in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Hash verified against when the username does not exist, so both login
    /// failure paths pay the same argon2 cost
    pub fn dummy_password_hash(&self) -> &str {
        &self.dummy_password_hash
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a ServiceContext
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn CredentialStore>>,
    jwt_service: Option<Arc<JwtService>>,
    refresh_token_expiry: i64,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            jwt_service: None,
            refresh_token_expiry: 604_800,
        }
    }

    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn refresh_token_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        let dummy_password_hash = hash_password("userdir-timing-dummy")?;

        Ok(ServiceContext {
            store: self
                .store
                .ok_or_else(|| super::error::ServiceError::validation("store is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            refresh_token_expiry: self.refresh_token_expiry,
            dummy_password_hash: dummy_password_hash.into(),
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
