use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use toml::{Table, Value};

use super::{VersionedConfig, path};
use crate::config_store::ConfigError;

/// Top-level key holding a document's version.
pub const VERSION_KEY: &str = "version";

/// Schema-less configuration backed by a TOML table.
///
/// Useful when the concrete configuration type is unknown, e.g. for tooling
/// that inspects or edits arbitrary store files.
///
/// Decoding rejects a `version` that is not a non-negative integer, so a file
/// can never report a version it does not contain. A missing `version` reads
/// as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    table: Table,
}

impl Document {
    /// Wraps an existing table.
    ///
    /// The table is not validated; an invalid `version` entry reads as 0
    /// until [`VersionedConfig::set_version`] overwrites it.
    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    /// Returns the underlying table.
    pub fn as_table(&self) -> &Table {
        &self.table
    }

    /// Retrieves the value at a dot-separated path (e.g. "server.port" or "peers.0.host").
    ///
    /// # Errors
    /// * `ConfigError::InvalidPath` - If the path doesn't exist
    pub fn get_by_path(&self, path: &str) -> Result<&Value, ConfigError> {
        path::lookup(&self.table, &path::segments(path)?)
    }

    /// Sets the value at a dot-separated path, creating missing tables on the way.
    ///
    /// # Errors
    /// * `ConfigError::InvalidPath` - If the path crosses a scalar or an invalid array index
    pub fn set_by_path(&mut self, path: &str, value: Value) -> Result<(), ConfigError> {
        path::assign(&mut self.table, &path::segments(path)?, value)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = Table::deserialize(deserializer)?;

        match table.get(VERSION_KEY) {
            None => {}
            Some(Value::Integer(version)) if *version >= 0 => {}
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "'{VERSION_KEY}' must be a non-negative integer, found {other}"
                )));
            }
        }

        Ok(Self { table })
    }
}

impl VersionedConfig for Document {
    fn version(&self) -> u64 {
        self.table
            .get(VERSION_KEY)
            .and_then(Value::as_integer)
            .and_then(|version| u64::try_from(version).ok())
            .unwrap_or(0)
    }

    fn set_version(&mut self, version: u64) {
        let version = i64::try_from(version).unwrap_or(i64::MAX);
        self.table
            .insert(VERSION_KEY.to_string(), Value::Integer(version));
    }
}
