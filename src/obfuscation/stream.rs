use std::io::{self, Read};

use aes::{Aes128, Aes192, Aes256};
use ofb::{
    Ofb,
    cipher::{KeyIvInit, StreamCipher},
};

use crate::config_store::ConfigError;

/// AES block size in bytes, which is also the length of the OFB initialization vector.
const BLOCK_SIZE: usize = 16;

/// Output-feedback keystream over AES, sized by the key it was derived from.
///
/// The transform is symmetric: applying the same freshly derived stream to
/// ciphertext restores the plaintext.
pub enum CipherStream {
    /// AES-128 (16 byte key)
    Aes128(Ofb<Aes128>),
    /// AES-192 (24 byte key)
    Aes192(Ofb<Aes192>),
    /// AES-256 (32 byte key)
    Aes256(Ofb<Aes256>),
}

impl CipherStream {
    /// Derives a new keystream from `key` with an all-zero initialization vector.
    ///
    /// The zero IV is reused on every derivation, so two files obfuscated with
    /// the same key share a keystream. This is inherited on-disk behavior and
    /// should not be copied into new formats.
    ///
    /// # Errors
    /// * `ConfigError::KeyInit` - If `key` is not 16, 24 or 32 bytes long
    pub fn derive(key: &[u8]) -> Result<Self, ConfigError> {
        let iv = [0u8; BLOCK_SIZE];
        let invalid = |_| ConfigError::KeyInit { length: key.len() };

        match key.len() {
            16 => Ofb::<Aes128>::new_from_slices(key, &iv)
                .map(CipherStream::Aes128)
                .map_err(invalid),
            24 => Ofb::<Aes192>::new_from_slices(key, &iv)
                .map(CipherStream::Aes192)
                .map_err(invalid),
            32 => Ofb::<Aes256>::new_from_slices(key, &iv)
                .map(CipherStream::Aes256)
                .map_err(invalid),
            length => Err(ConfigError::KeyInit { length }),
        }
    }

    /// XORs the next `buf.len()` keystream bytes into `buf`.
    pub fn apply(&mut self, buf: &mut [u8]) {
        match self {
            CipherStream::Aes128(stream) => stream.apply_keystream(buf),
            CipherStream::Aes192(stream) => stream.apply_keystream(buf),
            CipherStream::Aes256(stream) => stream.apply_keystream(buf),
        }
    }
}

/// Reader that deciphers bytes pulled from the wrapped reader.
pub struct CipherReader<R> {
    stream: CipherStream,
    inner: R,
}

impl<R: Read> CipherReader<R> {
    /// Wraps `inner` so every byte read passes through `stream`.
    pub fn new(stream: CipherStream, inner: R) -> Self {
        Self { stream, inner }
    }
}

impl<R: Read> Read for CipherReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.stream.apply(&mut buf[..read]);
        Ok(read)
    }
}
