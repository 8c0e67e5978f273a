//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found, or not owned by the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Financial figures rejected by the metrics engine.
    #[error("Invalid financial data: {0}")]
    InvalidFinancialData(String),

    /// Conflict (e.g., duplicate INN for the same owner).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidFinancialData(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::InvalidFinancialData(_) => "invalid_financial_data",
            Self::Conflict(_) => "conflict",
            Self::Database(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// Returns the message safe to show to API clients.
    ///
    /// Infrastructure failures are always masked.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "An error occurred".to_string(),
            Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::InvalidFinancialData(msg)
            | Self::Conflict(msg) => msg.clone(),
        }
    }

    /// Returns true for failures that should be logged at error level.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "unauthorized")]
    #[case(AppError::NotFound(String::new()), 404, "not_found")]
    #[case(AppError::Validation(String::new()), 400, "validation_error")]
    #[case(
        AppError::InvalidFinancialData(String::new()),
        422,
        "invalid_financial_data"
    )]
    #[case(AppError::Conflict(String::new()), 409, "conflict")]
    #[case(AppError::Database(String::new()), 500, "internal_error")]
    #[case(AppError::Internal(String::new()), 500, "internal_error")]
    fn test_error_status_and_code(
        #[case] error: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Unauthorized("msg".into()).to_string(),
            "Authentication failed: msg"
        );
        assert_eq!(
            AppError::InvalidFinancialData("msg".into()).to_string(),
            "Invalid financial data: msg"
        );
        assert_eq!(
            AppError::Conflict("msg".into()).to_string(),
            "Conflict: msg"
        );
    }

    #[test]
    fn test_public_message_masks_infrastructure_errors() {
        let err = AppError::Database("connection refused".into());
        assert_eq!(err.public_message(), "An error occurred");
        assert!(err.is_internal());

        let err = AppError::Validation("INN must contain only digits".into());
        assert_eq!(err.public_message(), "INN must contain only digits");
        assert!(!err.is_internal());
    }
}
