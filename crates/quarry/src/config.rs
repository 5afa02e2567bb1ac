use crate::manager::DEFAULT_MAX_RELATION_DEPTH;

use quarry_core::{Error, Result};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Connection and manager settings, typically loaded from a JSON file.
///
/// ```
/// let config = quarry::Config::from_json(r#"{
///     "connections": { "main": "sqlite::memory:" },
///     "default_connection": "main",
///     "table_name_prefix": "app_"
/// }"#).unwrap();
///
/// assert_eq!(config.default_url().unwrap(), "sqlite::memory:");
/// assert_eq!(config.max_relation_depth, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Connection URLs by name.
    pub connections: BTreeMap<String, String>,
    pub default_connection: Option<String>,
    pub table_name_prefix: String,
    pub max_relation_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connections: BTreeMap::new(),
            default_connection: None,
            table_name_prefix: String::new(),
            max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// URL of the connection registered under `name`.
    pub fn url(&self, name: &str) -> Result<&str> {
        self.connections
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::invalid_argument(format!("unknown connection `{name}`")))
    }

    pub fn default_url(&self) -> Result<&str> {
        let name = self
            .default_connection
            .as_deref()
            .ok_or_else(|| Error::invalid_argument("no default connection configured"))?;
        self.url(name)
    }
}
