//! Server setup and initialization
//!
//! Provides the main application builder, the background token sweeper, and
//! the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};
use userdir_common::{AppConfig, AppError, JwtService};
use userdir_service::{ServiceContext, ServiceContextBuilder, SessionService};
use userdir_store::FileCredentialStore;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router, &state.config().cors);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(path = %config.store.path, "Opening credential store");
    let store = Arc::new(FileCredentialStore::new(&config.store.path));

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .jwt_service(jwt_service)
        .refresh_token_expiry(config.jwt.refresh_token_expiry)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Spawn the background task that periodically purges expired refresh tokens
///
/// Expired records are already rejected at refresh time; the sweep only keeps
/// the persisted document from accumulating dead entries.
pub fn spawn_token_sweeper(
    context: ServiceContext,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup stays quiet
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let service = SessionService::new(&context);
            if let Err(e) = service.purge_expired().await {
                error!(error = %e, "Token sweep failed");
            }
        }
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;
    let sweep_interval = Duration::from_secs(config.store.sweep_interval);

    let state = create_app_state(config)?;

    spawn_token_sweeper(state.service_context().clone(), sweep_interval);

    let app = create_app(state);

    run_server(app, addr).await
}
