//! Financial statements submitted for a reporting period.
//!
//! This module provides:
//! - P&L and balance sheet figures
//! - Period metadata
//! - Input validation applied before metrics are computed

pub mod error;
pub mod types;
pub mod validation;

pub use error::StatementError;
pub use types::{BalanceSheet, FinancialPeriod, PeriodMetadata, ProfitAndLoss};
pub use validation::{check_amount, validate_figures, validate_metadata};
