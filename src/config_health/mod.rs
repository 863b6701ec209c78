//! Configuration health monitoring.
//!
//! The [`ConfigurationManager`] takes a snapshot of the monitored settings
//! when it is built and can afterwards:
//! - validate them against typed rules
//! - detect drift between live values and the snapshot
//! - raise [`Alert`]s through an injected [`AlertSink`]
//!
//! Monitored settings and their defaults:
//!
//! | Setting    | Default       | Rule                                   |
//! |------------|---------------|----------------------------------------|
//! | `PORT`     | `3000`        | integer in 1..=65535                   |
//! | `NODE_ENV` | `development` | one of development, production, test   |
//! | `HOST`     | `localhost`   | non-empty after trimming               |

pub mod alert;
pub mod drift;
pub mod environment;
pub mod manager;
pub mod snapshot;
pub mod source;
pub mod validation;

pub use alert::{
    Alert, AlertData, AlertSink, AlertType, MemoryAlertSink, Severity, TracingAlertSink,
};
pub use drift::{DriftChange, DriftResult};
pub use environment::Environment;
pub use manager::{ConfigurationManager, HealthResult};
pub use snapshot::{ConfigSnapshot, ConfigValue};
pub use source::{EnvironmentSource, MapEnvironment, ProcessEnvironment};
pub use validation::{ValidationError, ValidationResult};

/// Name of the port setting
pub const PORT: &str = "PORT";

/// Name of the environment setting
pub const NODE_ENV: &str = "NODE_ENV";

/// Name of the host setting
pub const HOST: &str = "HOST";

pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_NODE_ENV: &str = "development";
pub const DEFAULT_HOST: &str = "localhost";
