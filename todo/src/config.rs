//! Configuration for the todo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use todo_runtime::{DEFAULT_MAX_FEEDBACK_ACTIONS, StoreConfig};

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used
    #[error("Invalid value `{value}` for {key}: {reason}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// The offending value
        value: String,
        /// What was expected instead
        reason: &'static str,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level used when `RUST_LOG` is not set (trace, debug, info, warn, error)
    pub log_level: String,
    /// Answer every confirmation prompt with yes instead of asking
    pub assume_yes: bool,
    /// Bound on actions fed back by effects during one send
    pub max_feedback_actions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            assume_yes: false,
            max_feedback_actions: DEFAULT_MAX_FEEDBACK_ACTIONS,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let assume_yes = match lookup("TODO_ASSUME_YES") {
            Some(value) => parse_flag("TODO_ASSUME_YES", &value)?,
            None => defaults.assume_yes,
        };

        let max_feedback_actions = match lookup("TODO_MAX_FEEDBACK_ACTIONS") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit >= 1 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TODO_MAX_FEEDBACK_ACTIONS",
                        value,
                        reason: "expected a positive integer",
                    });
                },
            },
            None => defaults.max_feedback_actions,
        };

        Ok(Self {
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
            assume_yes,
            max_feedback_actions,
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}
