//! Test helpers for integration tests
//!
//! Each test server runs in-process on an ephemeral port with its own
//! temporary store file, seeded with one admin and one regular user.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use userdir_api::{create_app, state::AppState};
use userdir_common::auth::{hash_password, JwtService};
use userdir_common::{
    AppConfig, AppSettings, CorsConfig, JwtConfig, ServerConfig, StoreConfig,
};
use userdir_core::{CredentialStore, Role, User};
use userdir_service::ServiceContextBuilder;
use userdir_store::FileCredentialStore;

/// Seeded admin credentials
pub const ADMIN_USERNAME: &str = "alice";
pub const ADMIN_PASSWORD: &str = "alice-password-1";

/// Seeded regular user credentials
pub const MEMBER_USERNAME: &str = "bob";
pub const MEMBER_PASSWORD: &str = "bob-password-1";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<FileCredentialStore>,
    _store_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with the default 15-minute access token lifetime
    pub async fn start() -> Result<Self> {
        Self::start_with_access_expiry(900).await
    }

    /// Start a test server whose access tokens live `access_token_expiry`
    /// seconds (a 1-second lifetime makes expiry scenarios testable)
    pub async fn start_with_access_expiry(access_token_expiry: i64) -> Result<Self> {
        let store_dir = TempDir::new()?;
        let store_path = store_dir.path().join("auth-users.json");

        let store = Arc::new(FileCredentialStore::new(&store_path));
        seed_user(store.as_ref(), ADMIN_USERNAME, ADMIN_PASSWORD, Role::Admin).await?;
        seed_user(store.as_ref(), MEMBER_USERNAME, MEMBER_PASSWORD, Role::User).await?;

        let config = AppConfig {
            app: AppSettings {
                name: "userdir-test".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            store: StoreConfig {
                path: store_path.to_string_lossy().into_owned(),
                sweep_interval: 3600,
            },
            jwt: JwtConfig {
                secret: "integration-test-secret".to_string(),
                access_token_expiry,
                refresh_token_expiry: 604_800,
            },
            cors: CorsConfig::default(),
        };

        let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, access_token_expiry));
        let service_context = ServiceContextBuilder::new()
            .store(store.clone())
            .jwt_service(jwt_service)
            .refresh_token_expiry(config.jwt.refresh_token_expiry)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build service context: {e}"))?;

        let app = create_app(AppState::new(service_context, config));

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            _store_dir: store_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token, no body
    pub async fn post_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }
}

/// Create a user directly in the store
pub async fn seed_user(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
    role: Role,
) -> Result<User> {
    let user = User::new(
        username.to_string(),
        hash_password(password).map_err(|e| anyhow::anyhow!("Hashing failed: {e}"))?,
        format!("{username}@example.com"),
        role,
    );
    store.create_user(&user).await?;
    Ok(user)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
