//! Dependency list read from a `package.json` style manifest.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{StatusError, StatusResult};

/// Dependencies declared by the manifest, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyList {
    /// Package name, if the manifest declares one
    pub name: Option<String>,
    /// Package version, if the manifest declares one
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Read and parse the manifest at `path`
pub async fn read_dependencies(path: &Path) -> StatusResult<DependencyList> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StatusError::from_io(path, e))?;
    parse_manifest(path, &content)
}

/// Parse manifest JSON. Missing sections are empty.
pub fn parse_manifest(path: &Path, content: &str) -> StatusResult<DependencyList> {
    serde_json::from_str(content).map_err(|e| StatusError::parse(path, e.to_string()))
}
