//! Company profiles.
//!
//! This module provides:
//! - Industry and size enums
//! - INN normalization (10 or 12 digits)
//! - Profile field rules

pub mod error;
pub mod types;
pub mod validation;

pub use error::CompanyError;
pub use types::{CompanyProfile, CompanySize, Industry};
pub use validation::{normalize_inn, validate_name, validate_optional_fields, validate_profile};
