//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CARDIO_ASSESS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cardio_assess::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let api = config.api().expect("Backend not configured");
//! println!("Backend at {}", api.base_url);
//! ```

mod api;
mod error;
mod logging;
mod progress;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use progress::ProgressConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Risk backend connection; only needed to submit
    #[serde(default)]
    pub api: Option<ApiConfig>,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Synthetic submission progress
    #[serde(default)]
    pub progress: ProgressConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CARDIO_ASSESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CARDIO_ASSESS__API__BASE_URL=https://...` -> `api.base_url = ...`
    /// - `CARDIO_ASSESS__PROGRESS__TICK_MILLIS=250` -> `progress.tick_millis = 250`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CARDIO_ASSESS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(api) = &self.api {
            api.validate()?;
        }
        self.logging.validate()?;
        self.progress.validate()?;
        Ok(())
    }

    /// Backend settings, required before anything is submitted.
    pub fn api(&self) -> Result<&ApiConfig, ValidationError> {
        self.api
            .as_ref()
            .ok_or(ValidationError::MissingRequired("api.base_url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests touching them
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CARDIO_ASSESS__API__BASE_URL", "https://api.example.com");
    }

    fn clear_env() {
        env::remove_var("CARDIO_ASSESS__API__BASE_URL");
        env::remove_var("CARDIO_ASSESS__API__TIMEOUT_SECS");
        env::remove_var("CARDIO_ASSESS__LOGGING__JSON");
        env::remove_var("CARDIO_ASSESS__PROGRESS__STEP_PERCENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.api().unwrap().base_url, "https://api.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let api = config.api().unwrap();
        assert_eq!(api.timeout_secs, 30);
        assert_eq!(api.assessments_path, "/risk-assessments");
        assert_eq!(config.logging.filter, "info,cardio_assess=debug");
        assert_eq!(config.progress.tick_millis, 400);
    }

    #[test]
    fn test_overrides_parsed() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CARDIO_ASSESS__API__TIMEOUT_SECS", "10");
        env::set_var("CARDIO_ASSESS__LOGGING__JSON", "true");
        env::set_var("CARDIO_ASSESS__PROGRESS__STEP_PERCENT", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api().unwrap().timeout_secs, 10);
        assert!(config.logging.json);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidProgressStep)
        );
    }

    #[test]
    fn test_loads_without_backend() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert!(config.api.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(
            config.api().unwrap_err(),
            ValidationError::MissingRequired("api.base_url")
        );
        assert_eq!(config.progress.tick_millis, 400);
    }

    #[test]
    fn test_partial_backend_settings_fail() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CARDIO_ASSESS__API__TIMEOUT_SECS", "10");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
