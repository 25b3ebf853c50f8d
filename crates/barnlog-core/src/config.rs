//! Configuration module
//!
//! Runtime settings for the server process, sourced from `BARNLOG_*` environment
//! variables. Upload size policy is not configured here; see [`crate::constants`].

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};

const DEFAULT_ENV: &str = "dev";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PHOTO_STORE_DIR: &str = "data/photos";
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    environment: String,
    http_addr: String,
    log_level: tracing::Level,
    shutdown_timeout: Duration,
    request_timeout: Duration,
    photo_store_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let log_level_raw = get("BARNLOG_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
        let log_level = tracing::Level::from_str(&log_level_raw.to_lowercase())
            .map_err(|_| anyhow!("parse BARNLOG_LOG_LEVEL: unknown level {:?}", log_level_raw))?;

        let config = Config {
            environment: get("BARNLOG_ENV").unwrap_or_else(|| DEFAULT_ENV.into()),
            http_addr: get("BARNLOG_HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.into()),
            log_level,
            shutdown_timeout: parse_secs(
                get("BARNLOG_SHUTDOWN_TIMEOUT_SECS"),
                "BARNLOG_SHUTDOWN_TIMEOUT_SECS",
                SHUTDOWN_TIMEOUT_SECS,
            )?,
            request_timeout: parse_secs(
                get("BARNLOG_REQUEST_TIMEOUT_SECS"),
                "BARNLOG_REQUEST_TIMEOUT_SECS",
                REQUEST_TIMEOUT_SECS,
            )?,
            photo_store_dir: PathBuf::from(
                get("BARNLOG_PHOTO_STORE_DIR").unwrap_or_else(|| DEFAULT_PHOTO_STORE_DIR.into()),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.http_addr.is_empty() {
            return Err(anyhow!("BARNLOG_HTTP_ADDR must not be empty"));
        }

        if self.photo_store_dir.as_os_str().is_empty() {
            return Err(anyhow!("BARNLOG_PHOTO_STORE_DIR must not be empty"));
        }

        if self.shutdown_timeout.is_zero() {
            return Err(anyhow!("BARNLOG_SHUTDOWN_TIMEOUT_SECS must be greater than zero"));
        }

        if self.request_timeout.is_zero() {
            return Err(anyhow!("BARNLOG_REQUEST_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(())
    }

    /// Local and dev environments get human-readable logs.
    pub fn is_local(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "local" | "dev")
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn http_addr(&self) -> &str {
        &self.http_addr
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn photo_store_dir(&self) -> &Path {
        &self.photo_store_dir
    }
}

fn parse_secs(raw: Option<String>, key: &str, default: u64) -> Result<Duration, anyhow::Error> {
    match raw {
        Some(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("parse {}: {:?} is not a whole number of seconds", key, value)),
        None => Ok(Duration::from_secs(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[
            ("BARNLOG_ENV", ""),
            ("BARNLOG_HTTP_ADDR", "  "),
            ("BARNLOG_LOG_LEVEL", ""),
        ])
        .unwrap();

        assert_eq!(cfg.environment(), "dev");
        assert_eq!(cfg.http_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.log_level(), tracing::Level::INFO);
        assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.photo_store_dir(), Path::new("data/photos"));
        assert!(cfg.is_local());
    }

    #[test]
    fn test_custom_values() {
        let cfg = load(&[
            ("BARNLOG_ENV", "prod"),
            ("BARNLOG_HTTP_ADDR", "127.0.0.1:9090"),
            ("BARNLOG_LOG_LEVEL", "DEBUG"),
            ("BARNLOG_SHUTDOWN_TIMEOUT_SECS", "3"),
            ("BARNLOG_REQUEST_TIMEOUT_SECS", "5"),
            ("BARNLOG_PHOTO_STORE_DIR", "/var/lib/barnlog/photos"),
        ])
        .unwrap();

        assert_eq!(cfg.environment(), "prod");
        assert_eq!(cfg.http_addr(), "127.0.0.1:9090");
        assert_eq!(cfg.log_level(), tracing::Level::DEBUG);
        assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.photo_store_dir(), Path::new("/var/lib/barnlog/photos"));
        assert!(!cfg.is_local());
    }

    #[test]
    fn test_invalid_log_level() {
        let err = load(&[("BARNLOG_LOG_LEVEL", "not-a-level")]).unwrap_err();
        assert!(err.to_string().contains("BARNLOG_LOG_LEVEL"));
    }

    #[test]
    fn test_invalid_shutdown_timeout() {
        let err = load(&[("BARNLOG_SHUTDOWN_TIMEOUT_SECS", "definitely-not-a-duration")])
            .unwrap_err();
        assert!(err.to_string().contains("BARNLOG_SHUTDOWN_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let err = load(&[("BARNLOG_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("BARNLOG_REQUEST_TIMEOUT_SECS"));
    }
}
