//! Telegram Login Widget payload verification.
//!
//! See <https://core.telegram.org/widgets/login#checking-authorization>.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age of a widget payload: 24 hours.
pub const DEFAULT_MAX_AGE_SECS: i64 = 86_400;

/// Widget verification errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Hash does not match the payload.
    #[error("Invalid Telegram authentication data")]
    InvalidSignature,

    /// Payload is older than the allowed age.
    #[error("Authentication data expired")]
    Expired,
}

/// Payload posted by the Telegram Login Widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramAuthData {
    /// Telegram user ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Username without `@`.
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Unix timestamp of the login.
    pub auth_date: i64,
    /// Hex-encoded HMAC-SHA256 of the data-check-string.
    pub hash: String,
}

impl TelegramAuthData {
    /// Builds the data-check-string: every field except `hash`, absent fields
    /// omitted, sorted by key, `key=value` joined by `\n`.
    #[must_use]
    pub fn data_check_string(&self) -> String {
        // Keys listed in sorted order.
        let fields = [
            ("auth_date", Some(self.auth_date.to_string())),
            ("first_name", Some(self.first_name.clone())),
            ("id", Some(self.id.to_string())),
            ("last_name", self.last_name.clone()),
            ("photo_url", self.photo_url.clone()),
            ("username", self.username.clone()),
        ];

        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Verifies widget payloads against a bot token.
#[derive(Clone)]
pub struct TelegramVerifier {
    secret: [u8; 32],
    max_age_secs: i64,
}

impl std::fmt::Debug for TelegramVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramVerifier")
            .field("secret", &"[hidden]")
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

impl TelegramVerifier {
    /// Creates a verifier; the HMAC key is SHA-256 of the bot token.
    #[must_use]
    pub fn new(bot_token: &str, max_age_secs: i64) -> Self {
        Self {
            secret: Sha256::digest(bot_token.as_bytes()).into(),
            max_age_secs,
        }
    }

    fn mac(&self, data: &TelegramAuthData) -> Result<HmacSha256, AuthError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .map_err(|_| AuthError::InvalidSignature)?;
        mac.update(data.data_check_string().as_bytes());
        Ok(mac)
    }

    /// Computes the expected hex hash for a payload.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSignature` if the HMAC cannot be keyed.
    pub fn compute_hash(&self, data: &TelegramAuthData) -> Result<String, AuthError> {
        Ok(hex::encode(self.mac(data)?.finalize().into_bytes()))
    }

    /// Verifies the signature, then the payload age against `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidSignature` if the hash does not match
    /// - `AuthError::Expired` if `now - auth_date` exceeds the max age
    pub fn verify(&self, data: &TelegramAuthData, now: i64) -> Result<(), AuthError> {
        let supplied = hex::decode(&data.hash).map_err(|_| AuthError::InvalidSignature)?;
        self.mac(data)?
            .verify_slice(&supplied)
            .map_err(|_| AuthError::InvalidSignature)?;

        if now.saturating_sub(data.auth_date) > self.max_age_secs {
            return Err(AuthError::Expired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_TOKEN: &str = "123456:TEST-TOKEN";
    const AUTH_DATE: i64 = 1_700_000_000;

    fn payload() -> TelegramAuthData {
        TelegramAuthData {
            id: 42,
            first_name: "Ivan".to_string(),
            last_name: Some("Petrov".to_string()),
            username: Some("ivanp".to_string()),
            photo_url: None,
            auth_date: AUTH_DATE,
            hash: "c203b9c5d61c17938aec75f0d1fb542bfee5d2749cacf7efb60d45755a58f112".to_string(),
        }
    }

    fn verifier() -> TelegramVerifier {
        TelegramVerifier::new(BOT_TOKEN, DEFAULT_MAX_AGE_SECS)
    }

    #[test]
    fn test_data_check_string_sorted_and_skips_missing() {
        assert_eq!(
            payload().data_check_string(),
            "auth_date=1700000000\nfirst_name=Ivan\nid=42\nlast_name=Petrov\nusername=ivanp"
        );
    }

    #[test]
    fn test_known_hash_verifies() {
        assert_eq!(verifier().verify(&payload(), AUTH_DATE + 60), Ok(()));
    }

    #[test]
    fn test_minimal_payload_hash() {
        let data = TelegramAuthData {
            last_name: None,
            username: None,
            ..payload()
        };
        assert_eq!(
            verifier().compute_hash(&data).unwrap(),
            "58907f1e7626ba112730dae02ea549263af6ab531c7795829c9ddd74c7b21740"
        );
    }

    #[test]
    fn test_tampered_field_rejected() {
        let mut data = payload();
        data.id = 43;
        assert_eq!(
            verifier().verify(&data, AUTH_DATE),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_bot_token_rejected() {
        let other = TelegramVerifier::new("654321:OTHER", DEFAULT_MAX_AGE_SECS);
        assert_eq!(
            other.verify(&payload(), AUTH_DATE),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_non_hex_hash_rejected() {
        let mut data = payload();
        data.hash = "not-a-hash".to_string();
        assert_eq!(
            verifier().verify(&data, AUTH_DATE),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_age_boundary() {
        let v = verifier();
        assert_eq!(v.verify(&payload(), AUTH_DATE + DEFAULT_MAX_AGE_SECS), Ok(()));
        assert_eq!(
            v.verify(&payload(), AUTH_DATE + DEFAULT_MAX_AGE_SECS + 1),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_signature_checked_before_age() {
        let mut data = payload();
        data.hash = "00".repeat(32);
        assert_eq!(
            verifier().verify(&data, AUTH_DATE + 10 * DEFAULT_MAX_AGE_SECS),
            Err(AuthError::InvalidSignature)
        );
    }
}
