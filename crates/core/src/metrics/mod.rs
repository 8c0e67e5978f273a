//! Financial metrics engine.
//!
//! This module implements the derivation of ratios from a period's figures:
//! - Balance identity validation
//! - Ratio calculation with zero-denominator guards
//! - Benchmark status classification
//! - Summary and period-over-period comparison

pub mod balance;
pub mod calculator;
pub mod comparison;
pub mod error;
pub mod status;
pub mod types;


pub use balance::{BALANCE_TOLERANCE, validate_balance, validate_balance_sheet};
pub use calculator::{MetricsCalculator, RATIO_SCALE, VALUE_LIMIT, round_ratio};
pub use comparison::{MetricsComparison, MetricsSummary};
pub use error::{BalanceError, MetricsError};
pub use status::{Benchmark, ClassifiedMetric, MetricStatus};
pub use types::MetricSet;
