//! Process metadata shown on the dashboard.
//!
//! Thin readers over the outside world:
//! - `dependencies` parses the `package.json` manifest
//! - `commit` asks git for the last commit
//! - `deployment` reads the deployment status file

pub mod commit;
pub mod dependencies;
pub mod deployment;
pub mod error;
pub mod service;

pub use commit::CommitInfo;
pub use dependencies::DependencyList;
pub use deployment::DeploymentStatus;
pub use error::{StatusError, StatusResult};
pub use service::{StatusOverview, StatusService};
