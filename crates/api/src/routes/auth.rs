//! Telegram login and session routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{ApiError, ApiResult, AppState, middleware::AuthUser};
use finreport_core::auth::TelegramAuthData;
use finreport_db::{UserRepository, entities::users};
use finreport_shared::TokenResponse;
use finreport_shared::auth::{LoginResponse, UserInfo};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/telegram", post(telegram_login))
}

/// Creates the auth routes that require a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}

/// Payload posted by the Telegram Login Widget.
#[derive(Debug, Deserialize, Validate)]
pub struct TelegramLoginRequest {
    /// Telegram user ID.
    pub id: i64,
    /// First name.
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    /// Last name.
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    /// Username.
    #[validate(length(max = 255))]
    pub username: Option<String>,
    /// Avatar URL.
    #[validate(length(max = 500))]
    pub photo_url: Option<String>,
    /// Unix timestamp of the login.
    pub auth_date: i64,
    /// Hex HMAC of the other fields.
    #[validate(length(min = 1))]
    pub hash: String,
}

impl From<TelegramLoginRequest> for TelegramAuthData {
    fn from(req: TelegramLoginRequest) -> Self {
        Self {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            photo_url: req.photo_url,
            auth_date: req.auth_date,
            hash: req.hash,
        }
    }
}

/// Current user profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Telegram user ID.
    pub telegram_id: i64,
    /// Telegram username.
    pub telegram_username: Option<String>,
    /// Telegram first name.
    pub telegram_first_name: Option<String>,
    /// Telegram last name.
    pub telegram_last_name: Option<String>,
    /// Telegram avatar URL.
    pub telegram_photo_url: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the user is an administrator.
    pub is_superuser: bool,
    /// Display name.
    pub full_name: String,
    /// Last successful login.
    pub last_login_at: Option<DateTime<FixedOffset>>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        let full_name = user.full_name();
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            telegram_username: user.telegram_username,
            telegram_first_name: user.telegram_first_name,
            telegram_last_name: user.telegram_last_name,
            telegram_photo_url: user.telegram_photo_url,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            full_name,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// POST /auth/telegram - Verify a widget payload and open a session.
async fn telegram_login(
    State(state): State<AppState>,
    Json(payload): Json<TelegramLoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    payload.validate()?;
    let data = TelegramAuthData::from(payload);

    if let Err(e) = state.telegram.verify(&data, Utc::now().timestamp()) {
        warn!(telegram_id = data.id, error = %e, "Rejected Telegram login");
        return Err(e.into());
    }

    let (user, is_new_user) = UserRepository::new((*state.db).clone())
        .upsert_from_telegram(&data)
        .await?;

    if !user.is_active {
        warn!(user_id = %user.id, "Login attempt for disabled account");
        return Err(ApiError::unauthorized("This account has been disabled"));
    }

    let access_token = state
        .jwt_service
        .generate_access_token(user.id, user.telegram_id)?;

    info!(user_id = %user.id, is_new_user, "User logged in via Telegram");

    Ok(Json(LoginResponse {
        token: TokenResponse::bearer(access_token, state.jwt_service.access_token_expires_in()),
        user: UserInfo {
            id: user.id,
            telegram_id: user.telegram_id,
            full_name: user.full_name(),
            username: user.telegram_username,
            is_active: user.is_active,
        },
        is_new_user,
    }))
}

/// GET /auth/me - Current user profile.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::unauthorized("User not found or inactive"))?;

    Ok(Json(user.into()))
}

/// POST /auth/logout - Tokens are stateless; the client discards its copy.
async fn logout(auth: AuthUser) -> Json<Value> {
    info!(user_id = %auth.user_id(), "User logged out");
    Json(json!({
        "success": true,
        "message": "Successfully logged out"
    }))
}
