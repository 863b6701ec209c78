//! Alerts raised by failed configuration checks and the sinks that receive them.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::drift::DriftResult;
use super::validation::ValidationResult;

/// Which check produced an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Validation,
    Drift,
}

impl AlertType {
    /// Severity is fixed per type: validation failures are errors, drift is a warning
    pub fn severity(&self) -> Severity {
        match self {
            AlertType::Validation => Severity::Error,
            AlertType::Drift => Severity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Validation => "validation",
            AlertType::Drift => "drift",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The check result carried by an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertData {
    Validation(ValidationResult),
    Drift(DriftResult),
}

impl From<ValidationResult> for AlertData {
    fn from(result: ValidationResult) -> Self {
        AlertData::Validation(result)
    }
}

impl From<DriftResult> for AlertData {
    fn from(result: DriftResult) -> Self {
        AlertData::Drift(result)
    }
}

/// Structured record of a failed check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub data: AlertData,
}

impl Alert {
    /// Build an alert stamped with the current time
    pub fn new(alert_type: AlertType, data: AlertData) -> Self {
        Self {
            timestamp: Timestamp::now(),
            alert_type,
            severity: alert_type.severity(),
            data,
        }
    }
}

/// Consumer of alerts.
///
/// Emitting must not fail from the caller's point of view: a sink that
/// cannot deliver handles that on its own.
pub trait AlertSink: Send + Sync {
    fn emit(&self, alert: &Alert);
}

/// Default sink: one structured log event per alert
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn emit(&self, alert: &Alert) {
        let data = serde_json::to_string(&alert.data)
            .unwrap_or_else(|e| format!("<unserializable alert data: {}>", e));

        match alert.severity {
            Severity::Error => tracing::error!(
                alert_type = %alert.alert_type,
                severity = %alert.severity,
                timestamp = %alert.timestamp,
                data = %data,
                "Configuration alert"
            ),
            Severity::Warning => tracing::warn!(
                alert_type = %alert.alert_type,
                severity = %alert.severity,
                timestamp = %alert.timestamp,
                data = %data,
                "Configuration alert"
            ),
        }
    }
}

/// Sink that keeps every alert in memory
#[derive(Debug, Default)]
pub struct MemoryAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the alerts received so far, oldest first
    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return all alerts received so far
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.lock())
    }

    // A poisoned lock only means another emitter panicked; the alerts are intact
    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertSink for MemoryAlertSink {
    fn emit(&self, alert: &Alert) {
        self.lock().push(alert.clone());
    }
}

impl<T: AlertSink + ?Sized> AlertSink for std::sync::Arc<T> {
    fn emit(&self, alert: &Alert) {
        (**self).emit(alert)
    }
}
