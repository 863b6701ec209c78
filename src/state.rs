//! Application state for Axum web framework.

use std::sync::Arc;

use crate::config::Settings;
use crate::config_health::ConfigurationManager;
use crate::status::StatusService;

/// Shared state handed to every request handler.
///
/// Cloning is cheap: the manager and settings sit behind `Arc` and the
/// status service only holds paths.
#[derive(Clone)]
pub struct AppState {
    /// Configuration manager holding the startup snapshot
    pub manager: Arc<ConfigurationManager>,
    /// Readers for dependency, commit and deployment metadata
    pub status: StatusService,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(manager: Arc<ConfigurationManager>, settings: Settings) -> Self {
        Self {
            status: StatusService::new(settings.status.clone()),
            manager,
            settings: Arc::new(settings),
        }
    }
}
