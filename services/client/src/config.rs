//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::Duration;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backend API, without a trailing slash.
    pub api_url: String,
    /// Directory holding the token file and persisted state snapshots.
    pub state_dir: PathBuf,
    pub log_level: Level,
    /// Lifetime of a stored bearer token.
    pub token_ttl: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_url = std::env::var("PAIRPAD_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        let api_url = parse_api_url(&api_url)?;

        let state_dir = std::env::var("PAIRPAD_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./.pairpad"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let ttl_str =
            std::env::var("PAIRPAD_TOKEN_TTL_HOURS").unwrap_or_else(|_| "24".to_string());
        let token_ttl = parse_ttl_hours(&ttl_str)?;

        Ok(Self {
            api_url,
            state_dir,
            log_level,
            token_ttl,
        })
    }

    pub fn token_path(&self) -> PathBuf {
        self.state_dir.join("auth-token.json")
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(
            "PAIRPAD_API_URL".to_string(),
            format!("'{}' is not an http(s) URL", raw),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_ttl_hours(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
        _ => Err(ConfigError::InvalidValue(
            "PAIRPAD_TOKEN_TTL_HOURS".to_string(),
            format!("'{}' is not a positive number of hours", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_loses_its_trailing_slash() {
        assert_eq!(
            parse_api_url("http://localhost:8000/api/").unwrap(),
            "http://localhost:8000/api"
        );
        assert!(matches!(
            parse_api_url("localhost:8000"),
            Err(ConfigError::InvalidValue(..))
        ));
    }

    #[test]
    fn ttl_must_be_positive_hours() {
        assert_eq!(parse_ttl_hours("24").unwrap(), Duration::hours(24));
        assert!(parse_ttl_hours("0").is_err());
        assert!(parse_ttl_hours("soon").is_err());
    }
}
