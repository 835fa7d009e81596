//! Optional obfuscation of configuration bytes at rest.
//!
//! A [`Transform`] is selected once when a manager is built and applied
//! uniformly by the disk reader and writer. The stream variant runs AES in
//! output-feedback mode with an all-zero IV; no IV is stored in the file.

mod stream;

#[cfg(test)]
mod tests;

use std::{fmt, io::Read};

use zeroize::Zeroizing;

pub use stream::{CipherReader, CipherStream};

use crate::config_store::ConfigError;

/// Secret used to derive the obfuscation keystream.
///
/// The bytes are wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct ObfuscationKey(Zeroizing<Vec<u8>>);

impl ObfuscationKey {
    /// Creates a key from raw bytes. Length is checked when a stream is derived.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Returns the key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derives a fresh keystream for one read or write.
    ///
    /// # Errors
    /// * `ConfigError::KeyInit` - If the key length is not a valid AES key size
    pub fn stream(&self) -> Result<CipherStream, ConfigError> {
        CipherStream::derive(&self.0)
    }
}

impl fmt::Debug for ObfuscationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObfuscationKey([REDACTED; {}])", self.0.len())
    }
}

impl From<&str> for ObfuscationKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<&[u8]> for ObfuscationKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl From<Vec<u8>> for ObfuscationKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

/// Byte transform applied around serialization.
#[derive(Debug, Clone, Default)]
pub enum Transform {
    /// Bytes are stored as produced by the serializer.
    #[default]
    Identity,
    /// Bytes are passed through an AES-OFB keystream.
    Stream(ObfuscationKey),
}

impl Transform {
    /// Returns `true` for the stream cipher variant.
    pub fn is_obfuscating(&self) -> bool {
        matches!(self, Transform::Stream(_))
    }

    /// Wraps `inner` so reads yield plaintext.
    ///
    /// # Errors
    /// * `ConfigError::KeyInit` - If the keystream cannot be derived
    pub fn reader<'a, R: Read + 'a>(&self, inner: R) -> Result<Box<dyn Read + 'a>, ConfigError> {
        match self {
            Transform::Identity => Ok(Box::new(inner)),
            Transform::Stream(key) => Ok(Box::new(CipherReader::new(key.stream()?, inner))),
        }
    }

    /// Applies the transform to an in-memory buffer.
    ///
    /// # Errors
    /// * `ConfigError::KeyInit` - If the keystream cannot be derived
    pub fn apply(&self, bytes: &mut [u8]) -> Result<(), ConfigError> {
        if let Transform::Stream(key) = self {
            key.stream()?.apply(bytes);
        }
        Ok(())
    }
}
