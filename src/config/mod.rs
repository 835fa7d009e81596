//! Configuration value contract and serialization.
//!
//! The store never looks inside a configuration beyond its version and its
//! defaulting hook. Equality comes from `PartialEq`, the empty instance from
//! `Default`, and copies are made by a serializer round-trip.

mod document;
mod path;
mod serializer;


use serde::{Serialize, de::DeserializeOwned};

pub use document::{Document, VERSION_KEY};
pub use serializer::{JsonSerializer, Serializer, TomlSerializer};

/// A configuration value that carries an optimistic-concurrency version.
pub trait VersionedConfig: Serialize + DeserializeOwned + PartialEq + Default {
    /// Returns the version recorded in this value.
    fn version(&self) -> u64;

    /// Overwrites the version recorded in this value.
    fn set_version(&mut self, version: u64);

    /// Fills in defaults for unset fields. Called before every save.
    fn apply_defaults(&mut self) {}
}
