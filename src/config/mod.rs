//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHEMOSTATS_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chemostats::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod analysis;
mod error;
mod server;

pub use ai::AiConfig;
pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Chemostats backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has working defaults, so the service starts with no
/// environment at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Analysis defaults (significance threshold, plot option)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// AI assistant configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHEMOSTATS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHEMOSTATS__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `CHEMOSTATS__AI__MODEL=gpt-5-mini` -> `ai.model = ...`
    ///
    /// The assistant key is also accepted as a bare `OPENAI_API_KEY`, the
    /// name deployments conventionally publish it under.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHEMOSTATS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.ai.api_key.is_none() {
            config.ai.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty());
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port and timeout ranges
    /// - Significance threshold and plot option ranges
    /// - AI base URL format
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.analysis.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
