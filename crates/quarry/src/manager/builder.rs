use super::EntityManager;
use crate::{driver, Config, Result};

use quarry_core::Connection;

/// How deep relation hydration recurses unless configured otherwise.
pub const DEFAULT_MAX_RELATION_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct Builder {
    table_name_prefix: String,
    max_relation_depth: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            table_name_prefix: String::new(),
            max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
        }
    }
}

impl Builder {
    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = prefix.to_owned();
        self
    }

    /// Set how many levels of relations a select hydrates
    pub fn max_relation_depth(&mut self, depth: usize) -> &mut Self {
        self.max_relation_depth = depth;
        self
    }

    /// Takes every setting from `config`.
    pub fn config(&mut self, config: &Config) -> &mut Self {
        self.table_name_prefix(&config.table_name_prefix)
            .max_relation_depth(config.max_relation_depth)
    }

    /// Opens a connection to `url`, picking the driver by URL scheme.
    pub fn connect(&self, url: &str) -> Result<EntityManager> {
        let connection = driver::connect(url)?;
        self.open(connection)
    }

    /// Opens the connection registered under `name` in `config`.
    pub fn connect_named(&self, config: &Config, name: &str) -> Result<EntityManager> {
        self.connect(config.url(name)?)
    }

    /// Opens the configured default connection.
    pub fn connect_default(&self, config: &Config) -> Result<EntityManager> {
        self.connect(config.default_url()?)
    }

    /// Wraps an already open connection.
    pub fn build(&self, connection: impl Connection + 'static) -> Result<EntityManager> {
        self.open(Box::new(connection))
    }

    fn open(&self, connection: Box<dyn Connection>) -> Result<EntityManager> {
        EntityManager::open(
            connection,
            self.table_name_prefix.clone(),
            self.max_relation_depth,
        )
    }
}
