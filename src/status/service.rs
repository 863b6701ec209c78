//! Status service gathering dashboard metadata.

use std::collections::BTreeMap;
use std::time::Duration;

use jiff::Timestamp;
use serde::Serialize;

use super::commit::{CommitInfo, read_last_commit};
use super::dependencies::{DependencyList, read_dependencies};
use super::deployment::{DeploymentStatus, read_deployment_status};
use super::error::StatusResult;
use crate::config::StatusConfig;
use crate::config_health::{ConfigSnapshot, ConfigurationManager, HealthResult};

/// Everything the dashboard shows, gathered in one pass.
///
/// A collaborator that fails leaves its field empty and records the reason
/// under `errors`, keyed by section name.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StatusOverview {
    pub application: String,
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: Timestamp,
    #[schema(value_type = Object)]
    pub config: ConfigSnapshot,
    pub health: HealthResult,
    pub dependencies: Option<DependencyList>,
    pub commit: Option<CommitInfo>,
    #[schema(value_type = Option<Object>)]
    pub deployment: Option<DeploymentStatus>,
    pub errors: BTreeMap<String, String>,
}

/// Reads dependency, commit and deployment metadata
#[derive(Debug, Clone)]
pub struct StatusService {
    config: StatusConfig,
}

impl StatusService {
    pub fn new(config: StatusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub async fn dependencies(&self) -> StatusResult<DependencyList> {
        read_dependencies(&self.config.manifest_path).await
    }

    pub async fn last_commit(&self) -> StatusResult<CommitInfo> {
        read_last_commit(
            &self.config.repository_path,
            Duration::from_secs(self.config.git_timeout),
        )
        .await
    }

    pub async fn deployment(&self) -> StatusResult<DeploymentStatus> {
        read_deployment_status(&self.config.deployment_status_path).await
    }

    /// Gather all sections; runs a configuration check on `manager`
    pub async fn overview(
        &self,
        application: &str,
        version: &str,
        manager: &ConfigurationManager,
    ) -> StatusOverview {
        let (dependencies, commit, deployment) =
            tokio::join!(self.dependencies(), self.last_commit(), self.deployment());

        let mut errors = BTreeMap::new();
        let dependencies = record(&mut errors, "dependencies", dependencies);
        let commit = record(&mut errors, "commit", commit);
        let deployment = record(&mut errors, "deployment", deployment);

        StatusOverview {
            application: application.to_string(),
            version: version.to_string(),
            timestamp: Timestamp::now(),
            config: manager.get_config(),
            health: manager.run_config_check(),
            dependencies,
            commit,
            deployment,
            errors,
        }
    }
}

fn record<T>(
    errors: &mut BTreeMap<String, String>,
    section: &str,
    result: StatusResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(section, error = %e, "Status section unavailable");
            errors.insert(section.to_string(), e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_health::{MapEnvironment, MemoryAlertSink};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> StatusService {
        StatusService::new(StatusConfig {
            manifest_path: dir.path().join("package.json"),
            repository_path: dir.path().to_path_buf(),
            deployment_status_path: dir.path().join("deployment-status.json"),
            git_timeout: 5,
        })
    }

    fn manager() -> ConfigurationManager {
        ConfigurationManager::new(
            Arc::new(MapEnvironment::new()),
            Arc::new(MemoryAlertSink::new()),
        )
    }

    #[tokio::test]
    async fn test_overview_collects_available_sections() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "dependencies": { "express": "^4.18.2" } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("deployment-status.json"),
            r#"{ "status": "deployed" }"#,
        )
        .unwrap();

        let overview = service_in(&dir).overview("statusboard", "0.1.0", &manager()).await;

        assert_eq!(overview.application, "statusboard");
        assert!(overview.health.healthy);
        assert_eq!(
            overview.dependencies.unwrap().dependencies["express"],
            "^4.18.2"
        );
        assert_eq!(overview.deployment.unwrap()["status"], "deployed");
        // The temp dir is not a git repository
        assert!(overview.commit.is_none());
        assert!(overview.errors.contains_key("commit"));
    }

    #[tokio::test]
    async fn test_overview_records_missing_files() {
        let dir = TempDir::new().unwrap();
        let overview = service_in(&dir).overview("statusboard", "0.1.0", &manager()).await;

        assert!(overview.dependencies.is_none());
        assert!(overview.deployment.is_none());
        assert!(overview.errors["dependencies"].contains("File not found"));
        assert!(overview.errors["deployment"].contains("File not found"));
    }

    #[tokio::test]
    async fn test_overview_serializes_config_in_order() {
        let dir = TempDir::new().unwrap();
        let overview = service_in(&dir).overview("statusboard", "0.1.0", &manager()).await;

        let json = serde_json::to_value(&overview).unwrap();
        let keys: Vec<&String> = json["config"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["PORT", "NODE_ENV", "HOST"]);
        assert_eq!(json["health"]["healthy"], true);
    }
}
