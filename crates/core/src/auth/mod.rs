//! Authentication.
//!
//! This module provides:
//! - Telegram Login Widget signature verification
//! - Display name derivation for Telegram users

mod telegram;

pub use telegram::{AuthError, DEFAULT_MAX_AGE_SECS, TelegramAuthData, TelegramVerifier};

/// Display name of a Telegram user.
///
/// First and last name joined by a space, else the username, else
/// `User {telegram_id}`.
#[must_use]
pub fn full_name(
    first_name: Option<&str>,
    last_name: Option<&str>,
    username: Option<&str>,
    telegram_id: i64,
) -> String {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();

    if !parts.is_empty() {
        return parts.join(" ");
    }

    match username {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("User {telegram_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_fallbacks() {
        assert_eq!(full_name(Some("Ivan"), Some("Petrov"), Some("ivanp"), 1), "Ivan Petrov");
        assert_eq!(full_name(None, Some("Petrov"), None, 1), "Petrov");
        assert_eq!(full_name(None, None, Some("ivanp"), 1), "ivanp");
        assert_eq!(full_name(Some(""), None, None, 77), "User 77");
    }
}
