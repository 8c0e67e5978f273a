//! HTTP error responses.
//!
//! Handlers return `Result<_, ApiError>`; domain and repository errors are
//! mapped onto [`AppError`] and rendered as `{"error", "message"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finreport_core::auth::AuthError;
use finreport_core::company::CompanyError;
use finreport_core::metrics::MetricsError;
use finreport_core::statements::StatementError;
use finreport_db::repositories::{CompanyRepositoryError, PeriodRepositoryError};
use finreport_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use validator::ValidationErrors;

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Resource missing or not owned by the caller.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// Rejected request payload.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// Failed authentication.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self::unauthorized("Token has expired"),
            JwtError::DecodingError(_) => Self::unauthorized("Invalid or malformed token"),
            JwtError::EncodingError(msg) => Self(AppError::Internal(msg)),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::unauthorized(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CompanyError> for ApiError {
    fn from(err: CompanyError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<StatementError> for ApiError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::InvalidBalance(_) => {
                Self(AppError::InvalidFinancialData(err.to_string()))
            }
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<MetricsError> for ApiError {
    fn from(err: MetricsError) -> Self {
        Self(AppError::InvalidFinancialData(err.to_string()))
    }
}

impl From<CompanyRepositoryError> for ApiError {
    fn from(err: CompanyRepositoryError) -> Self {
        match err {
            CompanyRepositoryError::DuplicateInn(_) => Self(AppError::Conflict(err.to_string())),
            CompanyRepositoryError::NotFound(_) => Self::not_found("Company not found"),
            CompanyRepositoryError::Database(e) => e.into(),
        }
    }
}

impl From<PeriodRepositoryError> for ApiError {
    fn from(err: PeriodRepositoryError) -> Self {
        match err {
            PeriodRepositoryError::CompanyNotFound(_) => Self::not_found("Company not found"),
            PeriodRepositoryError::NotFound(_) => Self::not_found("Financial period not found"),
            PeriodRepositoryError::Metrics(e) => e.into(),
            PeriodRepositoryError::Database(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_internal() {
            tracing::error!(error = %err, "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": err.error_code(),
            "message": err.public_message(),
        }));
        (status, body).into_response()
    }
}
