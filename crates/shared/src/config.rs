//! Application configuration management.
//!
//! The configuration is loaded once by the server binary and handed to every
//! consumer through the application state. Nothing reads it as a global.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application metadata.
    #[serde(default)]
    pub app: AppInfoConfig,
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Telegram Login Widget configuration.
    pub telegram: TelegramConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Pagination limits for list endpoints.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Application metadata reported by the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoConfig {
    /// Service name.
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Deployment environment (development, staging, production).
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Development mode: human-readable logs instead of JSON.
    #[serde(default)]
    pub debug: bool,
}

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: default_environment(),
            debug: false,
        }
    }
}

fn default_app_name() -> String {
    "FinReport".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime in days.
    #[serde(default = "default_access_token_expiry_days")]
    pub access_token_expiry_days: i64,
}

fn default_access_token_expiry_days() -> i64 {
    30
}

/// Telegram Login Widget configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token shared with Telegram; the widget signature key derives from it.
    pub bot_token: String,
    /// Bot username shown by the widget.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Maximum accepted age of a widget payload, in seconds.
    #[serde(default = "default_auth_max_age_secs")]
    pub auth_max_age_secs: i64,
}

fn default_bot_name() -> String {
    "FinReportBot".to_string()
}

fn default_auth_max_age_secs() -> i64 {
    86_400 // 24 hours
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

/// Pagination limits.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the client does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound on the page size a client may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    100
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default.toml`, `config/{RUN_MODE}.toml`, then `FINREPORT__*`
    /// environment variables (e.g. `FINREPORT__TELEGRAM__BOT_TOKEN`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FINREPORT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
