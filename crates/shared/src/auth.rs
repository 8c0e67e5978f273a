//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Telegram user ID the session was opened with.
    pub telegram_id: i64,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, telegram_id: i64, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            telegram_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Bearer token returned after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Issued token.
    pub token: TokenResponse,
    /// Authenticated user info.
    pub user: UserInfo,
    /// True on the user's first login.
    pub is_new_user: bool,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Telegram user ID.
    pub telegram_id: i64,
    /// Telegram username.
    pub username: Option<String>,
    /// Display name.
    pub full_name: String,
    /// Whether the account is active.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(30);
        let before = Utc::now().timestamp();

        let claims = Claims::new(user_id, 42, expires_at);

        let after = Utc::now().timestamp();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.telegram_id, 42);
        assert!(claims.iat >= before);
        assert!(claims.iat <= after);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_bearer_token_type() {
        let token = TokenResponse::bearer("abc".to_string(), 3600);
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
    }
}
