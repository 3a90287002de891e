use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_dir: String,
    pub db_max_connections: u32,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source; `from_env` is the
    /// process-environment case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgresql://{}:{}@{}:{}/{}",
                var("DB_USER", "postgres"),
                var("DB_PASS", "secret"),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "cake_store"),
            ),
        };

        let log_format = match var("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            database_url,
            server_port: parse(&lookup, "API_PORT", 3000)?,
            log_level: var("RUST_LOG", "info"),
            log_format,
            log_dir: var("LOG_DIR", "./logs"),
            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            request_timeout: Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 5)?),
            shutdown_timeout: Duration::from_secs(parse(&lookup, "SHUTDOWN_TIMEOUT_SECS", 10)?),
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError { key, value }),
    }
}
