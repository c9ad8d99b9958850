//! Process configuration loaded from environment variables
//!
//! All required settings are validated once at startup; every missing
//! variable is reported in a single aggregated error.

use std::time::Duration;

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Default table scanned by the quality checks
pub const DEFAULT_CHECK_TABLE: &str = "records";
/// Default interval between scheduled runs
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname
    pub server: String,
    /// Relay port (STARTTLS)
    pub port: u16,
    /// Login user, also the From address
    pub user: String,
    /// Login password
    pub password: String,
    /// Recipient address
    pub receiver: String,
}

/// Full process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URI (driver selected by scheme)
    pub database_uri: String,
    /// Table the fixed quality query reads
    pub check_table: String,
    /// Interval between scheduled runs
    pub check_interval: Duration,
    /// Mail settings
    pub smtp: SmtpConfig,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &str| match lookup(name) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                missing.push(name.to_string());
                None
            }
        };

        let database_uri = require("DATABASE_URI");
        let server = require("SMTP_SERVER");
        let user = require("EMAIL_USER");
        let password = require("EMAIL_PASSWORD");
        let receiver = require("EMAIL_RECEIVER");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = parse_or_default(&lookup, "SMTP_PORT", DEFAULT_SMTP_PORT)?;
        let interval_secs = parse_or_default(
            &lookup,
            "CHECK_INTERVAL_SECS",
            DEFAULT_CHECK_INTERVAL_SECS,
        )?;
        let check_table = lookup("CHECK_TABLE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CHECK_TABLE.to_string());

        // The requires above all succeeded once `missing` is empty.
        Ok(Self {
            database_uri: database_uri.unwrap_or_default(),
            check_table,
            check_interval: Duration::from_secs(interval_secs),
            smtp: SmtpConfig {
                server: server.unwrap_or_default(),
                port,
                user: user.unwrap_or_default(),
                password: password.unwrap_or_default(),
                receiver: receiver.unwrap_or_default(),
            },
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) if !raw.is_empty() => raw.parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
        _ => Ok(default),
    }
}

/// Startup configuration errors; fatal before the scheduler loop starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("DATABASE_URI", "postgres://localhost/app"),
            ("SMTP_SERVER", "smtp.example.com"),
            ("EMAIL_USER", "bot@example.com"),
            ("EMAIL_PASSWORD", "hunter2"),
            ("EMAIL_RECEIVER", "ops@example.com"),
        ])
    }

    #[test]
    fn test_loads_with_defaults() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.database_uri, "postgres://localhost/app");
        assert_eq!(config.smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.check_table, DEFAULT_CHECK_TABLE);
        assert_eq!(config.check_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_missing_variables_aggregate() {
        let vars = env(&[("DATABASE_URI", "postgres://localhost/app")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();

        match err {
            ConfigError::Missing(names) => {
                assert_eq!(
                    names,
                    vec!["SMTP_SERVER", "EMAIL_USER", "EMAIL_PASSWORD", "EMAIL_RECEIVER"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_counts_as_missing() {
        let mut vars = full_env();
        vars.insert("DATABASE_URI".to_string(), String::new());
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(names) if names == vec!["DATABASE_URI"]));
    }

    #[test]
    fn test_overrides() {
        let mut vars = full_env();
        vars.insert("SMTP_PORT".to_string(), "2525".to_string());
        vars.insert("CHECK_TABLE".to_string(), "users".to_string());
        vars.insert("CHECK_INTERVAL_SECS".to_string(), "60".to_string());

        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.check_table, "users");
        assert_eq!(config.check_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = full_env();
        vars.insert("SMTP_PORT".to_string(), "not-a-port".to_string());

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == "SMTP_PORT"));
    }
}
