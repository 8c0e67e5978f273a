//! Statement validation errors.

use thiserror::Error;

use crate::metrics::BalanceError;

/// Errors raised while validating submitted statement figures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Field must be strictly positive.
    #[error("{field} must be greater than zero")]
    NonPositive {
        /// Offending field.
        field: &'static str,
    },

    /// Field must not be negative.
    #[error("{field} cannot be negative")]
    Negative {
        /// Offending field.
        field: &'static str,
    },

    /// Field carries more decimal places than can be stored.
    #[error("{field} must have at most {max_scale} decimal places")]
    TooPrecise {
        /// Offending field.
        field: &'static str,
        /// Maximum decimal places.
        max_scale: u32,
    },

    /// Field magnitude exceeds the storable range.
    #[error("{field} is out of range")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
    },

    /// Period name is empty or too long.
    #[error("period_name must be between 1 and {max} characters")]
    InvalidPeriodName {
        /// Maximum length in characters.
        max: usize,
    },

    /// Period starts after it ends.
    #[error("period_start must not be after period_end")]
    InvalidDateRange,

    /// Optional text field exceeds its limit.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// Accounting identity does not hold.
    #[error(transparent)]
    InvalidBalance(#[from] BalanceError),
}
