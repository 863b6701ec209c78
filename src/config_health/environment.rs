//! Runtime environment named by `NODE_ENV`

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not one of the known environments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid environment '{0}'. Valid values are: development, production, test")]
pub struct ParseEnvironmentError(pub String);

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Production environment
    Production,
    /// Test environment
    Test,
}

impl Environment {
    /// Every accepted environment, in the order reported to users
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Production,
        Environment::Test,
    ];

    /// Convert the environment to a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    /// Comma separated list of the accepted names
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(Environment::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

/// Parsing is exact: no aliases, no case folding.
impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| ParseEnvironmentError(s.to_string()))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
