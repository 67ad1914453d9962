//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `STUDY_SESSIONS`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use study_sessions::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let policy = config.policy.to_policy().expect("Invalid policy");
//! ```

mod database;
mod error;
mod logging;
mod policy;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use policy::PolicyConfig;

use serde::Deserialize;

/// Root configuration
///
/// Every section has defaults; without `database` the in-memory store is
/// expected to be used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Interval validation limits
    #[serde(default)]
    pub policy: PolicyConfig,

    /// PostgreSQL session store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STUDY_SESSIONS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `STUDY_SESSIONS__POLICY__MAX_PAST_DAYS=14` -> `policy.max_past_days = 14`
    /// - `STUDY_SESSIONS__DATABASE__URL=...` -> `database.url = ...`
    /// - `STUDY_SESSIONS__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STUDY_SESSIONS")
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
        self.policy.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "STUDY_SESSIONS__POLICY__MAX_PAST_DAYS",
        "STUDY_SESSIONS__POLICY__MIN_DURATION_MINUTES",
        "STUDY_SESSIONS__DATABASE__URL",
        "STUDY_SESSIONS__DATABASE__MAX_CONNECTIONS",
        "STUDY_SESSIONS__LOGGING__FILTER",
        "STUDY_SESSIONS__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();

        assert_eq!(config.policy, PolicyConfig::default());
        assert!(config.database.is_none());
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("STUDY_SESSIONS__POLICY__MAX_PAST_DAYS", "14");
        env::set_var("STUDY_SESSIONS__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("STUDY_SESSIONS__DATABASE__MAX_CONNECTIONS", "4");
        env::set_var("STUDY_SESSIONS__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.policy.max_past_days, 14);
        assert_eq!(config.policy.max_duration_hours, 24);
        let database = config.database.expect("database section");
        assert_eq!(database.url, "postgresql://test@localhost/test");
        assert_eq!(database.max_connections, 4);
        assert!(config.logging.json);
    }

    #[test]
    fn validate_reports_bad_policy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("STUDY_SESSIONS__POLICY__MIN_DURATION_MINUTES", "-5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NegativeValue(_))
        ));
    }

    #[test]
    fn validate_reports_bad_database_url() {
        let config = AppConfig {
            database: Some(DatabaseConfig::for_url("mysql://localhost/test")),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
