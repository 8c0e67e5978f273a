//! Shared types, errors, and configuration for FinReport.
//!
//! This crate provides common types used across all other crates:
//! - Application configuration, built once at startup and passed by context
//! - Application-wide error types with HTTP status mapping
//! - JWT claims and token service
//! - Pagination types for list endpoints

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, TokenResponse};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
