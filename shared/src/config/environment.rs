//! Deployment environment and its logging presets

use serde::{Deserialize, Serialize};
use std::env;

/// Variables naming the environment, first match wins
const ENVIRONMENT_VARS: [&str; 2] = ["WALLET_USERS_ENV", "ENVIRONMENT"];

/// Deployment environment selecting configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Environment named by `WALLET_USERS_ENV` (or `ENVIRONMENT`)
    ///
    /// Unset or unknown names select development.
    pub fn from_env() -> Self {
        ENVIRONMENT_VARS
            .iter()
            .find_map(|name| env::var(name).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Name of the optional TOML file layered over the preset
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config.development.toml",
            Environment::Staging => "config.staging.toml",
            Environment::Production => "config.production.toml",
        }
    }

    /// Whether logs are read by machines rather than a terminal
    pub fn is_deployed(&self) -> bool {
        !matches!(self, Environment::Development)
    }

    /// Least severe level logged by default
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// JSON for deployed environments, pretty output otherwise
    pub fn for_environment(env: Environment) -> Self {
        if env.is_deployed() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level directive, overridden by `RUST_LOG`
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// ANSI colors, ignored by the JSON format
    #[serde(default)]
    pub colored: bool,

    /// Include file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Preset for an environment
    pub fn for_environment(env: Environment) -> Self {
        let terminal = !env.is_deployed();
        Self {
            level: env.default_log_level().to_string(),
            format: LogFormat::for_environment(env),
            colored: terminal,
            source_location: terminal,
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::for_environment(Environment::default())
}
