//! Metrics engine error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// The accounting identity does not hold for a balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Assets differ from liabilities plus equity by more than the tolerance.
    #[error(
        "Balance sheet does not balance: assets {assets} vs liabilities and equity {liabilities_and_equity}"
    )]
    Unbalanced {
        /// Total assets.
        assets: Decimal,
        /// Total liabilities plus equity.
        liabilities_and_equity: Decimal,
    },

    /// Total assets is zero, so the relative difference is undefined.
    #[error("Balance sheet has zero total assets")]
    ZeroAssets,

    /// Totals exceed the representable range.
    #[error("Balance sheet totals are out of range")]
    Overflow,
}

/// Errors returned by the metrics calculator.
///
/// The calculator is all-or-nothing: any error means no metric set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Input failed the balance check.
    #[error("Invalid balance: {0}")]
    InvalidBalance(#[from] BalanceError),

    /// A ratio's denominator is zero.
    #[error("Cannot compute {ratio}: {denominator} is zero")]
    DivisionByZero {
        /// Ratio being computed.
        ratio: &'static str,
        /// Zero-valued denominator.
        denominator: &'static str,
    },

    /// A ratio exceeded the decimal range.
    #[error("Cannot compute {ratio}: value out of range")]
    Overflow {
        /// Ratio being computed.
        ratio: &'static str,
    },
}
