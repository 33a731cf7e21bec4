//! Session service
//!
//! Orchestrates the session lifecycle: login, refresh with rotation, logout,
//! logout-all, and identity lookup. Access tokens are minted by the token
//! codec; refresh tokens are opaque secrets whose fingerprints live in the
//! credential store for the validity window.

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};
use userdir_common::auth::{fingerprint, generate_refresh_secret, verify_password};
use userdir_common::AppError;
use userdir_core::{RefreshTokenRecord, User, UserId};

use crate::dto::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshResponse, RefreshTokenRequest, UserView,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session manager service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with username and password
    ///
    /// Both failure paths (unknown username, wrong password) run the full
    /// argon2 comparison so response latency does not reveal whether the
    /// username exists.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(
        &self,
        request: LoginRequest,
        device_info: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .store()
            .find_user_by_username(&request.username)
            .await?;

        let user = match user {
            Some(user) => user,
            None => {
                // Burn the same hashing cost as the real comparison
                let _ = verify_password(&request.password, self.ctx.dummy_password_hash());
                warn!("Login failed: unknown username");
                return Err(AppError::InvalidCredentials.into());
            }
        };

        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let access_token = self.ctx.jwt_service().issue_access_token(&user)?;
        let refresh_token = self.issue_refresh_token(&user, device_info).await?;

        self.ctx.store().touch_last_login(user.id, Utc::now()).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: UserView::from(&user),
        })
    }

    /// Redeem a refresh token for a new token pair
    ///
    /// Rotation: the presented record is deleted before the replacement is
    /// minted, so each secret is redeemable at most once. A lookup miss can
    /// mean a token already rotated away, which is the reuse-after-theft
    /// signature worth flagging.
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        request: RefreshTokenRequest,
        device_info: Option<String>,
    ) -> ServiceResult<RefreshResponse> {
        let fp = fingerprint(&request.refresh_token);

        let record = match self.ctx.store().find_refresh_token(&fp).await? {
            Some(record) => record,
            None => {
                warn!("Refresh token lookup miss; possible reuse after rotation");
                return Err(AppError::InvalidRefreshToken.into());
            }
        };

        let now = Utc::now();
        if record.is_expired(now) {
            self.ctx.store().delete_refresh_token(&fp).await?;
            debug!(user_id = %record.user_id, "Refresh token expired, record removed");
            return Err(AppError::RefreshTokenExpired.into());
        }

        // Single use: rotate the old record out before minting a replacement
        self.ctx.store().delete_refresh_token(&fp).await?;

        let user = match self.ctx.store().find_user_by_id(record.user_id).await? {
            Some(user) => user,
            None => {
                warn!(user_id = %record.user_id, "Refresh token subject no longer exists");
                return Err(AppError::RefreshUserNotFound.into());
            }
        };

        let access_token = self.ctx.jwt_service().issue_access_token(&user)?;
        let refresh_token = self.issue_refresh_token(&user, device_info).await?;

        info!(user_id = %user.id, "Session refreshed");

        Ok(RefreshResponse {
            access_token,
            refresh_token,
        })
    }

    /// Revoke one session; idempotent, unknown tokens are not an error
    #[instrument(skip_all)]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<()> {
        if let Some(token) = request.refresh_token {
            let removed = self
                .ctx
                .store()
                .delete_refresh_token(&fingerprint(&token))
                .await?;
            debug!(removed, "Logout processed");
        }
        Ok(())
    }

    /// Revoke every session for a user ("sign out everywhere")
    #[instrument(skip(self))]
    pub async fn logout_all(&self, user_id: UserId) -> ServiceResult<u64> {
        let count = self
            .ctx
            .store()
            .delete_all_refresh_tokens_for_user(user_id)
            .await?;
        info!(user_id = %user_id, count, "All sessions revoked");
        Ok(count)
    }

    /// Public view of the authenticated identity
    ///
    /// Fails `NotFound` if the user record was deleted after the access token
    /// was issued.
    #[instrument(skip(self))]
    pub async fn who_am_i(&self, user_id: UserId) -> ServiceResult<UserView> {
        let user = self
            .ctx
            .store()
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(UserView::from(&user))
    }

    /// Purge refresh records whose validity window has passed
    pub async fn purge_expired(&self) -> ServiceResult<u64> {
        let count = self
            .ctx
            .store()
            .purge_expired_refresh_tokens(Utc::now())
            .await?;
        if count > 0 {
            info!(count, "Purged expired refresh tokens");
        }
        Ok(count)
    }

    /// Mint a fresh refresh secret, persist its fingerprint, return the secret
    async fn issue_refresh_token(
        &self,
        user: &User,
        device_info: Option<String>,
    ) -> ServiceResult<String> {
        let secret = generate_refresh_secret();
        let record = RefreshTokenRecord::new(
            fingerprint(&secret),
            user.id,
            Utc::now() + Duration::seconds(self.ctx.refresh_token_expiry()),
            device_info,
        );
        self.ctx.store().insert_refresh_token(&record).await?;
        Ok(secret)
    }
}
