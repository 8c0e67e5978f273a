//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token authentication middleware
//! - Error to response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::http::HeaderValue;
use finreport_core::auth::TelegramVerifier;
use finreport_shared::{AppConfig, JwtService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Telegram Login Widget verifier.
    pub telegram: Arc<TelegramVerifier>,
    /// Configuration loaded at startup.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the state from a loaded configuration and an open connection.
    #[must_use]
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let jwt_service = JwtService::new((&config.jwt).into());
        let telegram = TelegramVerifier::new(
            &config.telegram.bot_token,
            config.telegram.auth_max_age_secs,
        );

        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            telegram: Arc::new(telegram),
            config: Arc::new(config),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Builds the CORS layer. An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
