use serde::{Serialize, de::DeserializeOwned};

/// Encodes configuration values to bytes and decodes them back.
///
/// Errors are reported as plain detail strings; the caller attaches the
/// file path and the failure category.
pub trait Serializer {
    /// Serializes `value` into bytes.
    ///
    /// # Errors
    /// Returns the encoder's error message if `value` cannot be represented.
    fn encode<C: Serialize>(&self, value: &C) -> Result<Vec<u8>, String>;

    /// Deserializes a fresh value from `bytes`.
    ///
    /// # Errors
    /// Returns the decoder's error message on malformed input.
    fn decode<C: DeserializeOwned>(&self, bytes: &[u8]) -> Result<C, String>;
}

/// Pretty-printed TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSerializer;

impl Serializer for TomlSerializer {
    fn encode<C: Serialize>(&self, value: &C) -> Result<Vec<u8>, String> {
        toml::to_string_pretty(value)
            .map(String::into_bytes)
            .map_err(|e| e.to_string())
    }

    fn decode<C: DeserializeOwned>(&self, bytes: &[u8]) -> Result<C, String> {
        let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}"))?;
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn encode<C: Serialize>(&self, value: &C) -> Result<Vec<u8>, String> {
        serde_json::to_vec_pretty(value).map_err(|e| e.to_string())
    }

    fn decode<C: DeserializeOwned>(&self, bytes: &[u8]) -> Result<C, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}
