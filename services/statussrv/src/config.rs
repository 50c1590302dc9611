//! Environment-sourced configuration
//!
//! Loaded once at startup and validated before anything else runs; the
//! process exits with code 1 on invalid config. Variable names follow the
//! deployment contract: `__DEV__`, `API_TOKEN`, `PORT`, `DATABASE_URL`,
//! `LOG_LEVEL`, `LOG_FILE_PATH`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 7080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Development mode: bearer auth is disabled entirely.
    pub dev_mode: bool,
    /// Static bearer token compared against the Authorization header.
    pub api_token: String,
    /// HTTP listen port.
    pub port: u16,
    /// SQLite connection URL, e.g. `sqlite://statussrv.db`.
    pub database_url: String,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Optional file sink in addition to the console.
    pub file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive string for the tracing env filter.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(()),
        }
    }
}

impl Config {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Load from an explicit variable map. Tests feed maps directly instead
    /// of mutating the process environment.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let dev_mode = match vars.get("__DEV__").map(String::as_str) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "__DEV__",
                    value: other.to_string(),
                });
            },
        };

        // The token is never checked in dev mode, so it may be omitted there.
        let api_token = match vars.get("API_TOKEN").filter(|t| !t.is_empty()) {
            Some(token) => token.clone(),
            None if dev_mode => String::new(),
            None => return Err(ConfigError::Missing("API_TOKEN")),
        };

        let port = match vars.get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
        };

        let database_url = vars
            .get("DATABASE_URL")
            .filter(|u| !u.is_empty())
            .cloned()
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let level = match vars.get("LOG_LEVEL") {
            None => LogLevel::Info,
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "LOG_LEVEL",
                value: raw.clone(),
            })?,
        };

        let file_path = vars
            .get("LOG_FILE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            dev_mode,
            api_token,
            port,
            database_url,
            log: LogConfig { level, file_path },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            ("API_TOKEN".to_string(), "secret".to_string()),
            (
                "DATABASE_URL".to_string(),
                "sqlite://statussrv.db".to_string(),
            ),
        ])
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&base_vars()).unwrap();
        assert!(!config.dev_mode);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.log.file_path.is_none());
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut vars = base_vars();
        vars.remove("API_TOKEN");
        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::Missing("API_TOKEN"))
        ));
    }

    #[test]
    fn test_missing_token_allowed_in_dev_mode() {
        let mut vars = base_vars();
        vars.remove("API_TOKEN");
        vars.insert("__DEV__".to_string(), "1".to_string());

        let config = Config::from_vars(&vars).unwrap();
        assert!(config.dev_mode);
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let mut vars = base_vars();
        vars.remove("DATABASE_URL");
        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_dev_flag_parsing() {
        let mut vars = base_vars();
        vars.insert("__DEV__".to_string(), "true".to_string());
        assert!(Config::from_vars(&vars).unwrap().dev_mode);

        vars.insert("__DEV__".to_string(), "0".to_string());
        assert!(!Config::from_vars(&vars).unwrap().dev_mode);

        vars.insert("__DEV__".to_string(), "yes".to_string());
        assert!(Config::from_vars(&vars).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut vars = base_vars();
        vars.insert("PORT".to_string(), "seventy".to_string());
        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        let mut vars = base_vars();
        vars.insert("LOG_LEVEL".to_string(), "warning".to_string());
        let config = Config::from_vars(&vars).unwrap();
        assert_eq!(config.log.level, LogLevel::Warning);
        assert_eq!(config.log.level.as_filter(), "warn");

        vars.insert("LOG_LEVEL".to_string(), "verbose".to_string());
        assert!(Config::from_vars(&vars).is_err());
    }
}
