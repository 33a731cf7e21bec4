//! Session agent
//!
//! One agent corresponds to one logged-in principal. Tokens live only in
//! memory; dropping the agent drops the session.

use parking_lot::Mutex;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use userdir_service::{AuthResponse, RefreshResponse, UserView};

use crate::error::{ClientError, ClientResult};

/// The in-memory half of a session: the token pair and the user it belongs to
#[derive(Debug, Clone)]
struct SessionState {
    access_token: String,
    refresh_token: String,
    user: UserView,
}

/// Error body the server sends on failure: `{ "error": ..., "code": ... }`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: String,
}

/// Client session agent with silent refresh
pub struct SessionAgent {
    http: reqwest::Client,
    base_url: String,
    session: Mutex<Option<SessionState>>,
}

impl SessionAgent {
    /// Create an agent for the API at `base_url` (no trailing slash needed)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            session: Mutex::new(None),
        }
    }

    /// Whether the agent currently holds a session
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.lock().is_some()
    }

    /// The user of the current session, if any
    #[must_use]
    pub fn current_user(&self) -> Option<UserView> {
        self.session.lock().as_ref().map(|s| s.user.clone())
    }

    /// Login and store the resulting session
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserView> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = Self::parse(response).await?;
        let user = auth.user.clone();
        *self.session.lock() = Some(SessionState {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            user: auth.user,
        });

        debug!(username = %user.username, "Logged in");
        Ok(user)
    }

    /// End the current session
    ///
    /// The server-side revocation is best-effort; local state is cleared
    /// regardless, so the agent is always logged out afterwards.
    pub async fn logout(&self) -> ClientResult<()> {
        let refresh_token = self
            .session
            .lock()
            .take()
            .map(|session| session.refresh_token);

        if let Some(token) = refresh_token {
            let result = self
                .http
                .post(self.url("/auth/logout"))
                .json(&json!({ "refreshToken": token }))
                .send()
                .await;
            if let Err(e) = result {
                warn!(error = %e, "Logout request failed; session cleared locally");
            }
        }
        Ok(())
    }

    /// Revoke every session of the logged-in user, then clear local state
    pub async fn logout_all(&self) -> ClientResult<()> {
        let response = self
            .authorized_request(Method::POST, "/auth/logout-all")
            .await?;
        let _: serde_json::Value = Self::parse(response).await?;
        *self.session.lock() = None;
        Ok(())
    }

    /// Fetch the authenticated user's profile from the server
    pub async fn me(&self) -> ClientResult<UserView> {
        self.get_json("/auth/me").await
    }

    /// Authorized GET returning a deserialized JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.authorized_request(Method::GET, path).await?;
        Self::parse(response).await
    }

    /// Send an authorized request, silently refreshing the session once if
    /// the server reports an expired access token
    async fn authorized_request(&self, method: Method, path: &str) -> ClientResult<Response> {
        let access_token = self.access_token().ok_or(ClientError::AuthRequired)?;

        let response = self
            .http
            .request(method.clone(), self.url(path))
            .bearer_auth(&access_token)
            .send()
            .await?;

        if !Self::is_auth_failure(response.status()) {
            return Ok(response);
        }

        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            error: String::new(),
            code: String::new(),
        });

        // Exactly one retry, and only for the expired-access-token case
        if status == StatusCode::UNAUTHORIZED && body.code == "TOKEN_EXPIRED" {
            debug!("Access token expired; attempting silent refresh");
            self.refresh_session().await?;

            let access_token = self.access_token().ok_or(ClientError::SessionExpired)?;
            let retried = self
                .http
                .request(method, self.url(path))
                .bearer_auth(&access_token)
                .send()
                .await?;

            if Self::is_auth_failure(retried.status()) {
                *self.session.lock() = None;
                return Err(ClientError::SessionExpired);
            }
            return Ok(retried);
        }

        warn!(status = %status, code = %body.code, "Session rejected");
        *self.session.lock() = None;
        Err(ClientError::SessionExpired)
    }

    /// Redeem the held refresh token and store the rotated pair
    async fn refresh_session(&self) -> ClientResult<()> {
        let refresh_token = self
            .session
            .lock()
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(ClientError::AuthRequired)?;

        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Silent refresh rejected");
            *self.session.lock() = None;
            return Err(ClientError::SessionExpired);
        }

        let rotated: RefreshResponse = response.json().await?;
        if let Some(session) = self.session.lock().as_mut() {
            session.access_token = rotated.access_token;
            session.refresh_token = rotated.refresh_token;
        }
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.session.lock().as_ref().map(|s| s.access_token.clone())
    }

    fn is_auth_failure(status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a response into a typed body, or the server's error
    async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            error: String::new(),
            code: String::new(),
        });
        Err(ClientError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.error,
        })
    }
}

impl std::fmt::Debug for SessionAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAgent")
            .field("base_url", &self.base_url)
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}
