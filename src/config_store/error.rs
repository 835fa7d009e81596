use std::path::PathBuf;

/// Errors that can occur while synchronizing a configuration with its file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The backing file could not be stat-ed.
    #[error("unable to stat config file '{path}': {details}")]
    Stat {
        /// Path of the backing file
        path: PathBuf,
        /// Underlying I/O error details
        details: String,
    },

    /// Opening, reading or writing the backing file failed.
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where the I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The bytes on disk could not be decoded into a configuration.
    #[error("failed to decode config from '{path}': {details}")]
    Decode {
        /// Path of the file that was read
        path: PathBuf,
        /// Decoder error details
        details: String,
    },

    /// The configuration could not be serialized.
    #[error("failed to encode config: {details}")]
    Encode {
        /// Encoder error details
        details: String,
    },

    /// The obfuscation key cannot initialize the block cipher.
    #[error("unable to initialize AES for obfuscation: invalid key length {length}")]
    KeyInit {
        /// Length in bytes of the rejected key
        length: usize,
    },

    /// The version on disk diverged from the version held in memory.
    #[error("version of config on disk did not match expected: expected {expected}, found {found}")]
    VersionConflict {
        /// Version held in memory
        expected: u64,
        /// Version found on disk
        found: u64,
    },

    /// Copying the in-memory configuration through the serializer failed.
    #[error("unable to copy config for comparison: {details}")]
    Copy {
        /// Round-trip error details
        details: String,
    },

    /// The specified document path does not exist or cannot be navigated.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),
}

impl ConfigError {
    /// Returns `true` if this error reports a version conflict between memory and disk.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, ConfigError::VersionConflict { .. })
    }
}
