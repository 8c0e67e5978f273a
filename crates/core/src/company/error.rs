//! Company profile errors.

use thiserror::Error;

/// Company profile validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompanyError {
    /// INN is not 10 or 12 digits.
    #[error("INN must contain only digits and be 10 (legal entity) or 12 (sole proprietor) long")]
    InvalidInn,

    /// Name is empty or too long.
    #[error("Company name must be between 1 and {max} characters")]
    InvalidName {
        /// Maximum length in characters.
        max: usize,
    },

    /// Optional field exceeds its limit.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// Unknown industry value.
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    /// Unknown company size value.
    #[error("Unknown company size: {0}")]
    UnknownSize(String),
}
