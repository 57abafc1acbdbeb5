//! Configuration management for mull.
//!
//! Everything is environment-driven: the provider API key is required and
//! the application refuses to start without it, everything else falls back
//! to a sensible default. Paths support `~` and `$VAR` expansion.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_DB_SUBPATH, DEFAULT_PROVIDER_URL, ENV_VAR_API_KEY,
    ENV_VAR_DB_PATH, ENV_VAR_MODEL, ENV_VAR_PROVIDER_URL, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};

/// Runtime configuration, resolved once at startup.
pub struct Config {
    /// SQLite database file holding users, entries, and mood trends.
    pub db_path: PathBuf,
    /// Provider API key, from `GROQ_API_KEY`.
    pub api_key: String,
    /// Provider base URL, without the endpoint path or a trailing slash.
    pub provider_url: String,
    /// Chat model identifier.
    pub model: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when `GROQ_API_KEY` is unset or a
    /// configured path cannot be expanded.
    pub fn load() -> AppResult<Self> {
        let api_key = env::var(ENV_VAR_API_KEY).map_err(|_| {
            AppError::Config(format!(
                "{ENV_VAR_API_KEY} environment variable is not set"
            ))
        })?;

        let raw_path =
            env::var(ENV_VAR_DB_PATH).unwrap_or_else(|_| format!("~/{DEFAULT_DB_SUBPATH}"));
        let expanded = shellexpand::full(&raw_path).map_err(|e| {
            AppError::Config(format!("Failed to expand database path '{raw_path}': {e}"))
        })?;
        let db_path = PathBuf::from(expanded.as_ref());

        let provider_url = env::var(ENV_VAR_PROVIDER_URL)
            .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = env::var(ENV_VAR_MODEL).unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        Ok(Config {
            db_path,
            api_key,
            provider_url,
            model,
        })
    }

    /// Checks that the resolved configuration is usable.
    pub fn validate(&self) -> AppResult<()> {
        if !self.db_path.is_absolute() {
            return Err(AppError::Config(format!(
                "Database path must be absolute, got: {}",
                self.db_path.display()
            )));
        }
        if !self.provider_url.starts_with("http") {
            return Err(AppError::Config(format!(
                "Provider URL must start with http(s), got: '{}'",
                self.provider_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name must not be empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{ENV_VAR_API_KEY} must not be empty"
            )));
        }
        Ok(())
    }
}

// The API key must never leak through debug logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .field("api_key", &REDACTED_PLACEHOLDER)
            .field("provider_url", &self.provider_url)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(ENV_VAR_API_KEY);
        env::remove_var(ENV_VAR_DB_PATH);
        env::remove_var(ENV_VAR_PROVIDER_URL);
        env::remove_var(ENV_VAR_MODEL);
    }

    #[test]
    #[serial]
    fn load_fails_without_api_key() {
        clear_env();

        let err = Config::load().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(ENV_VAR_API_KEY));
    }

    #[test]
    #[serial]
    fn load_applies_defaults() {
        clear_env();
        env::set_var(ENV_VAR_API_KEY, "test-key");

        let config = Config::load().unwrap();
        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.model, DEFAULT_CHAT_MODEL);
        assert!(config.db_path.ends_with(DEFAULT_DB_SUBPATH));

        clear_env();
    }

    #[test]
    #[serial]
    fn load_respects_overrides() {
        clear_env();
        env::set_var(ENV_VAR_API_KEY, "test-key");
        env::set_var(ENV_VAR_DB_PATH, "/tmp/mull-test/journal.db");
        env::set_var(ENV_VAR_PROVIDER_URL, "http://127.0.0.1:9999");
        env::set_var(ENV_VAR_MODEL, "test-model");

        let config = Config::load().unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/mull-test/journal.db"));
        assert_eq!(config.provider_url, "http://127.0.0.1:9999");
        assert_eq!(config.model, "test-model");

        clear_env();
    }

    #[test]
    #[serial]
    fn load_trims_trailing_slash_from_provider_url() {
        clear_env();
        env::set_var(ENV_VAR_API_KEY, "test-key");
        env::set_var(ENV_VAR_PROVIDER_URL, "http://127.0.0.1:9999/");

        let config = Config::load().unwrap();
        assert_eq!(config.provider_url, "http://127.0.0.1:9999");

        clear_env();
    }

    #[test]
    #[serial]
    fn validate_rejects_relative_db_path() {
        let config = Config {
            db_path: PathBuf::from("relative/journal.db"),
            api_key: "k".to_string(),
            provider_url: "http://localhost".to_string(),
            model: "m".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    #[serial]
    fn validate_rejects_non_http_provider_url() {
        let config = Config {
            db_path: PathBuf::from("/tmp/journal.db"),
            api_key: "k".to_string(),
            provider_url: "ftp://example.com".to_string(),
            model: "m".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn debug_output_redacts_api_key() {
        let config = Config {
            db_path: PathBuf::from("/tmp/journal.db"),
            api_key: "super-secret".to_string(),
            provider_url: "http://localhost".to_string(),
            model: "m".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains(REDACTED_PLACEHOLDER));
    }
}
