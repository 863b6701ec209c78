//! The configuration manager: startup snapshot, validation, drift detection
//! and alerting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::alert::{Alert, AlertData, AlertSink, AlertType, TracingAlertSink};
use super::drift::{self, DriftResult};
use super::snapshot::{ConfigSnapshot, ConfigValue};
use super::source::{EnvironmentSource, ProcessEnvironment};
use super::validation::{self, ValidationResult};
use super::{DEFAULT_HOST, DEFAULT_NODE_ENV, DEFAULT_PORT, HOST, NODE_ENV, PORT};

/// Combined outcome of validation and drift detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResult {
    pub validation: ValidationResult,
    pub drift: DriftResult,
    /// True only if validation passed and no drift was found
    pub healthy: bool,
}

/// Tracks the configuration the process started with.
///
/// The environment is read once at construction. That reading becomes both
/// the working configuration and the frozen snapshot used as the drift
/// baseline. Neither changes afterwards, so a manager can be shared behind
/// an `Arc` and checked from any number of request handlers.
pub struct ConfigurationManager {
    source: Arc<dyn EnvironmentSource>,
    sink: Arc<dyn AlertSink>,
    config: ConfigSnapshot,
    initial_config: ConfigSnapshot,
    drift_detected: AtomicBool,
}

impl ConfigurationManager {
    /// Read the monitored settings from `source` and freeze the snapshot.
    ///
    /// Missing settings take their defaults. No validation happens here.
    pub fn new(source: Arc<dyn EnvironmentSource>, sink: Arc<dyn AlertSink>) -> Self {
        let config = load_config(source.as_ref());
        let initial_config = config.clone();

        tracing::debug!(
            port = %setting(&config, PORT),
            node_env = %setting(&config, NODE_ENV),
            host = %setting(&config, HOST),
            "Configuration snapshot taken"
        );

        Self {
            source,
            sink,
            config,
            initial_config,
            drift_detected: AtomicBool::new(false),
        }
    }

    /// Manager over the process environment that logs its alerts
    pub fn from_process_env() -> Self {
        Self::new(Arc::new(ProcessEnvironment), Arc::new(TracingAlertSink))
    }

    /// Check every rule against the working configuration
    pub fn validate(&self) -> ValidationResult {
        validation::validate_config(&self.config)
    }

    /// Compare live values against the startup snapshot.
    ///
    /// Also records whether drift was found; see [`Self::drift_detected`].
    pub fn detect_drift(&self) -> DriftResult {
        let result = drift::detect_drift(&self.initial_config, &self.config, self.source.as_ref());
        self.drift_detected
            .store(result.drift_detected, Ordering::Relaxed);
        result
    }

    /// Build an alert, hand it to the sink and return it
    pub fn trigger_alert(&self, alert_type: AlertType, data: AlertData) -> Alert {
        let alert = Alert::new(alert_type, data);
        self.sink.emit(&alert);
        alert
    }

    /// Run validation and drift detection, alerting on each failure.
    ///
    /// Drift detection runs even when validation fails, and both alerts
    /// may fire from one call.
    pub fn run_config_check(&self) -> HealthResult {
        let validation = self.validate();
        let drift = self.detect_drift();

        if !validation.is_valid {
            self.trigger_alert(AlertType::Validation, validation.clone().into());
        }
        if drift.drift_detected {
            self.trigger_alert(AlertType::Drift, drift.clone().into());
        }

        let healthy = validation.is_valid && !drift.drift_detected;
        tracing::debug!(
            healthy,
            validation_errors = validation.errors.len(),
            drift_changes = drift.changes.len(),
            "Configuration check completed"
        );

        HealthResult {
            validation,
            drift,
            healthy,
        }
    }

    /// Copy of the working configuration
    pub fn get_config(&self) -> ConfigSnapshot {
        self.config.clone()
    }

    /// The frozen startup snapshot
    pub fn initial_config(&self) -> &ConfigSnapshot {
        &self.initial_config
    }

    /// Whether the most recent drift check found drift
    pub fn drift_detected(&self) -> bool {
        self.drift_detected.load(Ordering::Relaxed)
    }

    /// Host and port from the working configuration, if the port is usable
    pub fn bind_address(&self) -> Option<(String, u16)> {
        let host = self.config.get(HOST)?.to_string().trim().to_string();
        let port = self.config.get(PORT)?.to_string().trim().parse::<u16>().ok()?;
        if host.is_empty() || port == 0 {
            return None;
        }
        Some((host, port))
    }

    #[cfg(test)]
    pub(crate) fn working_config_mut(&mut self) -> &mut ConfigSnapshot {
        &mut self.config
    }
}

impl std::fmt::Debug for ConfigurationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("config", &self.config)
            .field("initial_config", &self.initial_config)
            .field("drift_detected", &self.drift_detected())
            .finish_non_exhaustive()
    }
}

fn load_config(source: &dyn EnvironmentSource) -> ConfigSnapshot {
    let mut config = ConfigSnapshot::new();
    config.insert(
        PORT,
        source
            .get(PORT)
            .map(ConfigValue::Text)
            .unwrap_or(ConfigValue::Number(DEFAULT_PORT)),
    );
    config.insert(
        NODE_ENV,
        source.get(NODE_ENV).unwrap_or_else(|| DEFAULT_NODE_ENV.to_string()),
    );
    config.insert(
        HOST,
        source.get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
    );
    config
}

/// String form of a setting for log fields; empty when missing
fn setting(config: &ConfigSnapshot, name: &str) -> String {
    config.get(name).map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_health::alert::{MemoryAlertSink, Severity};
    use crate::config_health::source::MapEnvironment;

    fn manager_with(
        vars: &[(&str, &str)],
    ) -> (ConfigurationManager, Arc<MapEnvironment>, Arc<MemoryAlertSink>) {
        let env = Arc::new(vars.iter().copied().collect::<MapEnvironment>());
        let sink = Arc::new(MemoryAlertSink::new());
        let manager = ConfigurationManager::new(env.clone(), sink.clone());
        (manager, env, sink)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_defaults_when_environment_empty() {
        let (manager, _, _) = manager_with(&[]);
        let config = manager.get_config();
        assert_eq!(config.get(PORT), Some(&ConfigValue::Number(3000)));
        assert_eq!(config.get(NODE_ENV), Some(&ConfigValue::from("development")));
        assert_eq!(config.get(HOST), Some(&ConfigValue::from("localhost")));

        let names: Vec<&str> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["PORT", "NODE_ENV", "HOST"]);
    }

    #[test]
    fn test_environment_values_override_defaults() {
        let (manager, _, _) = manager_with(&[("PORT", "8080"), ("HOST", "0.0.0.0")]);
        let config = manager.get_config();
        assert_eq!(config.get(PORT), Some(&ConfigValue::from("8080")));
        assert_eq!(config.get(HOST), Some(&ConfigValue::from("0.0.0.0")));
        assert_eq!(config.get(NODE_ENV), Some(&ConfigValue::from("development")));
    }

    #[test]
    fn test_construction_does_not_validate_or_alert() {
        let (manager, _, sink) = manager_with(&[("PORT", "invalid")]);
        assert!(sink.is_empty());
        assert!(!manager.drift_detected());
    }

    #[test]
    fn test_setting_log_field() {
        let (manager, _, _) = manager_with(&[("HOST", "0.0.0.0")]);
        let config = manager.get_config();
        assert_eq!(setting(&config, PORT), "3000");
        assert_eq!(setting(&config, HOST), "0.0.0.0");
        assert_eq!(setting(&config, "MISSING"), "");
    }

    // ========================================================================
    // validate
    // ========================================================================

    #[test]
    fn test_validate_defaults() {
        let (manager, _, _) = manager_with(&[]);
        let result = manager.validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_validate_invalid_port() {
        let (manager, _, _) = manager_with(&[("PORT", "invalid")]);
        let result = manager.validate();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].variable, "PORT");
        assert!(result.errors[0].error.contains("valid number"));
    }

    #[test]
    fn test_validate_port_out_of_range() {
        let (manager, _, _) = manager_with(&[("PORT", "99999")]);
        let result = manager.validate();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].error.contains("between 1 and 65535"));
    }

    #[test]
    fn test_validate_via_working_config_escape_hatch() {
        let (mut manager, _, _) = manager_with(&[]);
        manager.working_config_mut().insert(HOST, "   ");
        let result = manager.validate();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].variable, "HOST");
    }

    #[test]
    fn test_validate_does_not_accumulate() {
        let (manager, _, _) = manager_with(&[("NODE_ENV", "staging")]);
        assert_eq!(manager.validate().errors.len(), 1);
        assert_eq!(manager.validate().errors.len(), 1);
    }

    // ========================================================================
    // detect_drift
    // ========================================================================

    #[test]
    fn test_no_drift_after_construction() {
        let (manager, _, _) = manager_with(&[("PORT", "4000")]);
        let result = manager.detect_drift();
        assert!(!result.drift_detected);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_port_drift_against_default() {
        let (manager, env, _) = manager_with(&[]);
        env.set("PORT", "8080");

        let result = manager.detect_drift();
        assert!(result.drift_detected);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].variable, "PORT");
        assert_eq!(result.changes[0].initial_value, ConfigValue::Number(3000));
        assert_eq!(result.changes[0].current_value, ConfigValue::from("8080"));
        assert!(manager.drift_detected());
    }

    #[test]
    fn test_setting_default_explicitly_is_not_drift() {
        let (manager, env, _) = manager_with(&[]);
        env.set("PORT", "3000");
        assert!(!manager.detect_drift().drift_detected);
    }

    #[test]
    fn test_unset_after_startup_is_not_drift() {
        let (manager, env, _) = manager_with(&[("HOST", "example.com")]);
        env.remove("HOST");
        assert!(!manager.detect_drift().drift_detected);
    }

    #[test]
    fn test_drift_flag_tracks_latest_check() {
        let (manager, env, _) = manager_with(&[]);
        env.set("NODE_ENV", "production");
        assert!(manager.detect_drift().drift_detected);
        assert!(manager.drift_detected());

        env.remove("NODE_ENV");
        assert!(!manager.detect_drift().drift_detected);
        assert!(!manager.drift_detected());
    }

    #[test]
    fn test_snapshot_unchanged_across_drift_checks() {
        let (manager, env, _) = manager_with(&[]);
        let before = manager.initial_config().clone();

        env.set("PORT", "8080");
        manager.detect_drift();
        manager.detect_drift();
        manager.run_config_check();

        assert_eq!(manager.initial_config(), &before);
        assert_eq!(manager.get_config(), before);
    }

    // ========================================================================
    // trigger_alert
    // ========================================================================

    #[test]
    fn test_trigger_alert_severity_and_sink() {
        let (manager, _, sink) = manager_with(&[]);

        let alert = manager.trigger_alert(AlertType::Validation, manager.validate().into());
        assert_eq!(alert.severity, Severity::Error);

        let alert = manager.trigger_alert(AlertType::Drift, manager.detect_drift().into());
        assert_eq!(alert.severity, Severity::Warning);

        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1], alert);
    }

    #[test]
    fn test_alert_timestamp_is_parseable() {
        let (manager, _, _) = manager_with(&[]);
        let alert = manager.trigger_alert(AlertType::Drift, manager.detect_drift().into());
        let json = serde_json::to_value(&alert).unwrap();
        let parsed: jiff::Timestamp = json["timestamp"].as_str().unwrap().parse().unwrap();
        assert_eq!(parsed, alert.timestamp);
    }

    // ========================================================================
    // run_config_check
    // ========================================================================

    #[test]
    fn test_healthy_check_emits_no_alerts() {
        let (manager, _, sink) = manager_with(&[]);
        let result = manager.run_config_check();
        assert!(result.healthy);
        assert!(result.validation.is_valid);
        assert!(!result.drift.drift_detected);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_invalid_configuration_is_unhealthy() {
        let (manager, _, sink) = manager_with(&[("NODE_ENV", "staging")]);
        let result = manager.run_config_check();
        assert!(!result.healthy);
        assert!(!result.drift.drift_detected);

        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Validation);
        assert_eq!(alerts[0].severity, Severity::Error);
    }

    #[test]
    fn test_drift_alone_is_unhealthy() {
        let (manager, env, sink) = manager_with(&[]);
        env.set("HOST", "elsewhere");
        let result = manager.run_config_check();
        assert!(!result.healthy);
        assert!(result.validation.is_valid);

        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Drift);
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_and_drifted_emits_both_alerts() {
        let (manager, env, sink) = manager_with(&[("PORT", "invalid")]);
        env.set("PORT", "8080");

        let result = manager.run_config_check();
        assert!(!result.healthy);
        assert!(!result.validation.is_valid);
        assert!(result.drift.drift_detected);

        let types: Vec<AlertType> = sink.alerts().iter().map(|a| a.alert_type).collect();
        assert_eq!(types, vec![AlertType::Validation, AlertType::Drift]);
    }

    #[test]
    fn test_health_result_serialization() {
        let (manager, _, _) = manager_with(&[]);
        let json = serde_json::to_value(manager.run_config_check()).unwrap();
        assert_eq!(json["healthy"], true);
        assert_eq!(json["validation"]["isValid"], true);
        assert_eq!(json["drift"]["driftDetected"], false);
    }

    // ========================================================================
    // get_config
    // ========================================================================

    #[test]
    fn test_get_config_returns_copy() {
        let (manager, _, _) = manager_with(&[]);
        let mut copy = manager.get_config();
        copy.insert(PORT, "1");
        copy.insert("EXTRA", "value");

        let fresh = manager.get_config();
        assert_eq!(fresh.get(PORT), Some(&ConfigValue::Number(3000)));
        assert!(fresh.get("EXTRA").is_none());
    }

    #[test]
    fn test_bind_address() {
        let (manager, _, _) = manager_with(&[("HOST", "0.0.0.0"), ("PORT", "8080")]);
        assert_eq!(manager.bind_address(), Some(("0.0.0.0".to_string(), 8080)));

        let (manager, _, _) = manager_with(&[("PORT", "invalid")]);
        assert_eq!(manager.bind_address(), None);
    }

    #[test]
    fn test_manager_is_shareable_across_threads() {
        let (manager, env, sink) = manager_with(&[]);
        let manager = Arc::new(manager);
        env.set("PORT", "9000");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || manager.run_config_check().healthy)
            })
            .collect();

        for handle in handles {
            assert!(!handle.join().unwrap());
        }
        assert_eq!(sink.len(), 4);
    }
}
