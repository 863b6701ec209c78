//! Drift detection between the startup snapshot and live values.

use serde::{Deserialize, Serialize};

use super::snapshot::{ConfigSnapshot, ConfigValue};
use super::source::EnvironmentSource;

/// A setting whose live value differs from its startup value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriftChange {
    pub variable: String,
    pub initial_value: ConfigValue,
    pub current_value: ConfigValue,
}

/// Outcome of a drift check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriftResult {
    pub drift_detected: bool,
    /// Changes in snapshot order
    pub changes: Vec<DriftChange>,
}

impl DriftResult {
    pub fn from_changes(changes: Vec<DriftChange>) -> Self {
        Self {
            drift_detected: !changes.is_empty(),
            changes,
        }
    }
}

/// Compare every snapshot entry with its live value.
///
/// The live value comes from `source`; when the source no longer has the
/// setting, the value in `working` is used instead, so a setting that was
/// unset after startup does not count as drift.
pub fn detect_drift(
    snapshot: &ConfigSnapshot,
    working: &ConfigSnapshot,
    source: &dyn EnvironmentSource,
) -> DriftResult {
    let changes = snapshot
        .iter()
        .filter_map(|(name, initial)| {
            let current = match source.get(name) {
                Some(live) => ConfigValue::Text(live),
                None => working.get(name)?.clone(),
            };

            if initial.same_as(&current) {
                None
            } else {
                Some(DriftChange {
                    variable: name.to_string(),
                    initial_value: initial.clone(),
                    current_value: current,
                })
            }
        })
        .collect();

    DriftResult::from_changes(changes)
}
