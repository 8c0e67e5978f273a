//! Core business logic for FinReport.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `statements` - P&L and balance sheet figures and their input rules
//! - `metrics` - Balance validation, ratio calculation, benchmark statuses
//! - `company` - Company profile rules (INN, industry, size)
//! - `auth` - Telegram Login Widget verification

pub mod auth;
pub mod company;
pub mod metrics;
pub mod statements;
