//! Environment sources the configuration manager reads settings from.
//!
//! The manager never touches `std::env` directly. Production code passes a
//! [`ProcessEnvironment`]; tests and embedders pass a [`MapEnvironment`] whose
//! values can be changed after construction to simulate drift.

use std::collections::HashMap;
use std::sync::RwLock;

/// Lookup capability over named configuration values.
///
/// Implementations must be `Send + Sync` so a manager can be shared between
/// request handlers.
pub trait EnvironmentSource: Send + Sync {
    /// Returns the current value of `name`, or `None` if it is not set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads values from the process environment at call time
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        // Non-unicode values are treated as unset
        std::env::var(name).ok()
    }
}

/// In-memory environment backed by a map
#[derive(Debug, Default)]
pub struct MapEnvironment {
    values: RwLock<HashMap<String, String>>,
}

impl MapEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(name.into(), value.into());
        }
    }

    /// Remove `name`, returning its previous value
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values
            .write()
            .ok()
            .and_then(|mut values| values.remove(name))
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl EnvironmentSource for MapEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .ok()
            .and_then(|values| values.get(name).cloned())
    }
}

impl<T: EnvironmentSource + ?Sized> EnvironmentSource for std::sync::Arc<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}
