//! Connection and keyspace settings.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `CASSETTE_`-prefixed environment variables. Nested keys use `__` as the
//! separator, so `CASSETTE_KEYSPACE=orders` and
//! `CASSETTE_CONTACT_POINTS=[10.0.0.1,10.0.0.2]` both work.
//!
//! ```yaml
//! keyspace: orders
//! contact_points:
//!   - 10.0.0.1
//! port: 9042
//! replication_factor: 3
//! ```

use crate::{CqlIdentifier, Error, Result};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Keyspace the mapped tables live in
    pub keyspace: String,

    pub contact_points: Vec<String>,

    pub port: u16,

    /// Replication factor used when the keyspace is created
    pub replication_factor: u32,

    /// Prepended to every table name
    pub table_name_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyspace: "test".to_string(),
            contact_points: vec!["127.0.0.1".to_string()],
            port: 9042,
            replication_factor: 1,
            table_name_prefix: None,
        }
    }
}

impl Config {
    /// Loads the configuration, reading `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path).extract().map_err(|err| {
            Error::from(anyhow::Error::from(err)).context(crate::err!("loading configuration"))
        })
    }

    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed("CASSETTE_").split("__"))
    }

    pub fn keyspace(&self) -> Result<CqlIdentifier> {
        CqlIdentifier::unquoted(&self.keyspace)
    }

    /// `host:port` for every contact point.
    pub fn contact_addresses(&self) -> Vec<String> {
        self.contact_points
            .iter()
            .map(|host| format!("{host}:{}", self.port))
            .collect()
    }
}
