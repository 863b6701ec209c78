//! Typed validation rules for the monitored settings.
//!
//! Every rule runs independently and reports its own [`ValidationError`];
//! a failing rule never stops the others from running.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::snapshot::{ConfigSnapshot, ConfigValue};
use super::{HOST, NODE_ENV, PORT};

/// Lowest accepted port
pub const MIN_PORT: i64 = 1;

/// Highest accepted port
pub const MAX_PORT: i64 = 65535;

/// A setting that failed its rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidationError {
    /// Name of the setting
    pub variable: String,
    /// The offending value
    pub value: ConfigValue,
    /// Human readable reason
    pub error: String,
}

impl ValidationError {
    pub fn new(variable: &str, value: &ConfigValue, error: impl Into<String>) -> Self {
        Self {
            variable: variable.to_string(),
            value: value.clone(),
            error: error.into(),
        }
    }
}

/// Outcome of validating a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no rule failed
    pub is_valid: bool,
    /// Failures in rule order
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Build a result from the collected errors
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate the monitored settings of `config`.
///
/// A setting missing from `config` is skipped; the manager always fills
/// all three with defaults before validating.
pub fn validate_config(config: &ConfigSnapshot) -> ValidationResult {
    let errors = [
        config.get(PORT).and_then(validate_port),
        config.get(NODE_ENV).and_then(validate_node_env),
        config.get(HOST).and_then(validate_host),
    ]
    .into_iter()
    .flatten()
    .collect();

    ValidationResult::from_errors(errors)
}

/// PORT must be a base-10 integer between 1 and 65535 inclusive
pub fn validate_port(value: &ConfigValue) -> Option<ValidationError> {
    let port = match value {
        ConfigValue::Number(n) => *n,
        ConfigValue::Text(raw) => match raw.trim().parse::<i64>() {
            Ok(n) => n,
            // Digits too large for i64 are still a number, just out of range
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Some(port_range_error(value));
            }
            Err(_) => {
                return Some(ValidationError::new(
                    PORT,
                    value,
                    "PORT must be a valid number",
                ));
            }
        },
    };

    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        return Some(port_range_error(value));
    }

    None
}

fn port_range_error(value: &ConfigValue) -> ValidationError {
    ValidationError::new(
        PORT,
        value,
        format!("PORT must be between {} and {}", MIN_PORT, MAX_PORT),
    )
}

/// NODE_ENV must name one of the known environments exactly
pub fn validate_node_env(value: &ConfigValue) -> Option<ValidationError> {
    match value.to_string().parse::<Environment>() {
        Ok(_) => None,
        Err(_) => Some(ValidationError::new(
            NODE_ENV,
            value,
            format!("NODE_ENV must be one of: {}", Environment::allowed_values()),
        )),
    }
}

/// HOST must be non-empty once surrounding whitespace is removed
pub fn validate_host(value: &ConfigValue) -> Option<ValidationError> {
    if value.to_string().trim().is_empty() {
        return Some(ValidationError::new(
            HOST,
            value,
            "HOST must be a non-empty string",
        ));
    }
    None
}
