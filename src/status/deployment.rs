//! Deployment status read from a JSON file written by the deploy pipeline.

use std::path::Path;

use serde_json::{Map, Value};

use super::error::{StatusError, StatusResult};

/// Free-form deployment status; keys keep file order
pub type DeploymentStatus = Map<String, Value>;

/// Read the deployment status file. The top level must be a JSON object.
pub async fn read_deployment_status(path: &Path) -> StatusResult<DeploymentStatus> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StatusError::from_io(path, e))?;
    parse_deployment_status(path, &content)
}

pub fn parse_deployment_status(path: &Path, content: &str) -> StatusResult<DeploymentStatus> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StatusError::parse(path, "expected a JSON object")),
        Err(e) => Err(StatusError::parse(path, e.to_string())),
    }
}
