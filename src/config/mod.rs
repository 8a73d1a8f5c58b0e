//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `VOTING` prefix and `__`
//! between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use voting_sessions::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod identity;
mod server;
mod voting;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use identity::IdentityConfig;
pub use server::{Environment, ServerConfig};
pub use voting::VotingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, request timeout)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Session duration default and sweep interval
    #[serde(default)]
    pub voting: VotingConfig,

    /// Voter eligibility service
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `VOTING__*` variables:
    ///
    /// - `VOTING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VOTING__DATABASE__URL=...` -> `database.url = ...`
    /// - `VOTING__IDENTITY__BASE_URL=...` -> `identity.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VOTING")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.voting.validate()?;
        self.identity.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("VOTING__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("VOTING__IDENTITY__BASE_URL", "http://localhost:9000/users/");
    }

    fn clear_env() {
        env::remove_var("VOTING__DATABASE__URL");
        env::remove_var("VOTING__IDENTITY__BASE_URL");
        env::remove_var("VOTING__SERVER__PORT");
        env::remove_var("VOTING__SERVER__ENVIRONMENT");
        env::remove_var("VOTING__VOTING__DEFAULT_SESSION_MINUTES");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.identity.base_url, "http://localhost:9000/users/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.voting.default_session_minutes, 1);
        assert_eq!(config.voting.sweep_interval_secs, 60);
        assert_eq!(config.identity.timeout_secs, 5);
        assert_eq!(config.database.pool_size, 5);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VOTING__SERVER__PORT", "3000");
        env::set_var("VOTING__VOTING__DEFAULT_SESSION_MINUTES", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.voting.default_session_minutes, 5);
    }

    #[test]
    fn test_production_requires_https_identity_service() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VOTING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::IdentityUrlMustBeHttps)
        );
    }

    #[test]
    fn test_missing_identity_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VOTING__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
