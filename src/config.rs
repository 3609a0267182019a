//! Configuration management for StockLens
//!
//! Loads defaults + optional config files + environment variables via .env

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Evaluation service base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token exchange endpoint
    pub url: String,
    /// Token refresh lookahead in milliseconds
    pub lookahead_ms: i64,
    /// Registered email (bare env fallback: EMAIL)
    pub email: String,
    /// Registered name (bare env fallback: NAME)
    pub name: String,
    /// Roll number (bare env fallback: ROLL_NO)
    pub roll_no: String,
    /// Access code (bare env fallback: ACCESS_CODE)
    pub access_code: String,
    /// Client ID (bare env fallback: CLIENT_ID)
    pub client_id: String,
    /// Client secret (bare env fallback: CLIENT_SECRET)
    pub client_secret: String,
}

impl AppConfig {
    /// Load configuration from defaults, files and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Upstream defaults
            .set_default(
                "upstream.base_url",
                "http://20.244.56.144/evaluation-service",
            )?
            .set_default("upstream.request_timeout_secs", 30)?
            // Auth defaults (credentials come from the environment)
            .set_default("auth.url", "http://20.244.56.144/evaluation-service/auth")?
            .set_default("auth.lookahead_ms", 10_000)?
            .set_default("auth.email", "")?
            .set_default("auth.name", "")?
            .set_default("auth.roll_no", "")?
            .set_default("auth.access_code", "")?
            .set_default("auth.client_id", "")?
            .set_default("auth.client_secret", "")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (STOCKLENS_*)
            .add_source(Environment::with_prefix("STOCKLENS").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Generate a digest of the config (without secrets) for logging
    pub fn digest(&self) -> String {
        format!(
            "bind={}:{} upstream={} lookahead_ms={}",
            self.server.host, self.server.port, self.upstream.base_url, self.auth.lookahead_ms
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
