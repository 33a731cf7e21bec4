//! API Integration Tests
//!
//! Fully self-contained: each test spins up an in-process server backed by a
//! temporary store file seeded with one admin and one regular user.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer, ADMIN_PASSWORD, ADMIN_USERNAME,
    MEMBER_PASSWORD, MEMBER_USERNAME,
};
use reqwest::StatusCode;
use serde_json::json;
use userdir_client::{ClientError, SessionAgent};

async fn login(server: &TestServer, username: &str, password: &str) -> AuthResponse {
    let response = server
        .post("/auth/login", &login_body(username, password))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");

    let auth = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    assert_eq!(auth.user.username, ADMIN_USERNAME);
    assert_eq!(auth.user.role, "admin");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_login_never_leaks_password_hash() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/login", &login_body(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/login", &login_body(ADMIN_USERNAME, "wrong-password"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_user_same_error_shape() {
    let server = TestServer::start().await.expect("Failed to start server");

    let known = server
        .post("/auth/login", &login_body(ADMIN_USERNAME, "wrong-password"))
        .await
        .unwrap();
    let known: ErrorResponse = assert_json(known, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = server
        .post("/auth/login", &login_body("mallory", "wrong-password"))
        .await
        .unwrap();
    let unknown: ErrorResponse = assert_json(unknown, StatusCode::UNAUTHORIZED).await.unwrap();

    // The two failure modes are indistinguishable on the wire
    assert_eq!(known.code, unknown.code);
    assert_eq!(known.error, unknown.error);
}

#[tokio::test]
async fn test_login_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/login", &login_body("", "password"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");

    let response = server
        .post("/auth/login", &json!({ "username": "alice" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Access Token Tests
// ============================================================================

#[tokio::test]
async fn test_me_returns_current_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = login(&server, MEMBER_USERNAME, MEMBER_PASSWORD).await;

    let response = server.get_auth("/auth/me", &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.username, MEMBER_USERNAME);
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn test_me_without_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/auth/me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "MISSING_TOKEN");
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get_auth("/auth/me", "not.a.token").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_access_token_reports_token_expired() {
    let server = TestServer::start_with_access_expiry(1)
        .await
        .expect("Failed to start server");
    let auth = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let response = server.get_auth("/auth/me", &auth.access_token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    // The one code clients may retry after a silent refresh
    assert_eq!(error.code, "TOKEN_EXPIRED");
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_token_pair() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = server
        .post("/auth/refresh", &refresh_body(&auth.refresh_token))
        .await
        .unwrap();
    let rotated: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_ne!(rotated.refresh_token, auth.refresh_token);
    assert!(!rotated.access_token.is_empty());

    // The rotated access token still belongs to the same user
    let response = server.get_auth("/auth/me", &rotated.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.id, auth.user.id);
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = server
        .post("/auth/refresh", &refresh_body(&auth.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Redeeming the same secret again must fail
    let response = server
        .post("/auth/refresh", &refresh_body(&auth.refresh_token))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_refresh_with_unknown_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/refresh", &refresh_body("deadbeef".repeat(8).as_str()))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_stolen_refresh_token_reuse_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = login(&server, MEMBER_USERNAME, MEMBER_PASSWORD).await;
    let stolen = auth.refresh_token.clone();

    // The thief redeems the stolen copy first and gets a fresh pair
    let response = server.post("/auth/refresh", &refresh_body(&stolen)).await.unwrap();
    let thief_pair: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!thief_pair.refresh_token.is_empty());

    // The legitimate client's copy is now dead
    let response = server
        .post("/auth/refresh", &refresh_body(&auth.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_session_and_is_idempotent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = server
        .post("/auth/logout", &logout_body(&auth.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Logging out again with the same (now unknown) token still succeeds
    let response = server
        .post("/auth/logout", &logout_body(&auth.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The revoked refresh token can no longer be redeemed
    let response = server
        .post("/auth/refresh", &refresh_body(&auth.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_logout_with_empty_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/auth/logout", &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Two sessions for the same user (two devices)
    let first = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let second = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    // One unrelated session
    let other = login(&server, MEMBER_USERNAME, MEMBER_PASSWORD).await;

    let response = server
        .post_auth("/auth/logout-all", &first.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    for dead in [&first.refresh_token, &second.refresh_token] {
        let response = server.post("/auth/refresh", &refresh_body(dead)).await.unwrap();
        assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    }

    // The unrelated user's session survives
    let response = server
        .post("/auth/refresh", &refresh_body(&other.refresh_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Role Gating Tests
// ============================================================================

#[tokio::test]
async fn test_user_listing_requires_admin() {
    let server = TestServer::start().await.expect("Failed to start server");

    let admin = login(&server, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let member = login(&server, MEMBER_USERNAME, MEMBER_PASSWORD).await;

    let response = server.get_auth("/users", &member.access_token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "ADMIN_REQUIRED");

    let response = server.get_auth("/users", &admin.access_token).await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_user_listing_without_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Session Agent Tests (silent refresh end to end)
// ============================================================================

#[tokio::test]
async fn test_agent_silently_refreshes_after_expiry() {
    let server = TestServer::start_with_access_expiry(1)
        .await
        .expect("Failed to start server");

    let agent = SessionAgent::new(server.base_url());
    let user = agent
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("Login failed");
    assert_eq!(user.username, ADMIN_USERNAME);

    // Let the access token expire, then call a protected endpoint. The agent
    // must hit 401 TOKEN_EXPIRED, refresh, and retry without surfacing it.
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let me = agent.me().await.expect("Silent refresh failed");
    assert_eq!(me.username, ADMIN_USERNAME);
    assert!(agent.is_logged_in());
}

#[tokio::test]
async fn test_agent_surfaces_session_expiry_when_refresh_fails() {
    let server = TestServer::start_with_access_expiry(1)
        .await
        .expect("Failed to start server");

    let agent = SessionAgent::new(server.base_url());
    agent
        .login(MEMBER_USERNAME, MEMBER_PASSWORD)
        .await
        .expect("Login failed");

    // Revoke every member session behind the agent's back
    let fresh = login(&server, MEMBER_USERNAME, MEMBER_PASSWORD).await;
    let response = server
        .post_auth("/auth/logout-all", &fresh.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Once the access token expires the silent refresh has nothing to redeem
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let result = agent.me().await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert!(!agent.is_logged_in());
}

#[tokio::test]
async fn test_agent_requires_login() {
    let server = TestServer::start().await.expect("Failed to start server");

    let agent = SessionAgent::new(server.base_url());
    let result = agent.me().await;
    assert!(matches!(result, Err(ClientError::AuthRequired)));
}

#[tokio::test]
async fn test_agent_logout_clears_session() {
    let server = TestServer::start().await.expect("Failed to start server");

    let agent = SessionAgent::new(server.base_url());
    agent
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("Login failed");
    assert!(agent.is_logged_in());

    agent.logout().await.expect("Logout failed");
    assert!(!agent.is_logged_in());
    assert!(matches!(agent.me().await, Err(ClientError::AuthRequired)));
}
