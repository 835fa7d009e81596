use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::Path,
};

use crate::{
    config::{Serializer, VersionedConfig},
    obfuscation::Transform,
};

use super::{ConfigError, FileSnapshot};

/// Reads and decodes the file at `path`, passing its bytes through `transform`.
///
/// The file handle is released before returning on every path.
///
/// # Errors
/// * `ConfigError::Io` - If the file cannot be opened or read
/// * `ConfigError::KeyInit` - If the transform's keystream cannot be derived
/// * `ConfigError::Decode` - If the bytes are not a valid configuration
pub(super) fn read_config<C, S>(
    path: &Path,
    transform: &Transform,
    serializer: &S,
) -> Result<C, ConfigError>
where
    C: VersionedConfig,
    S: Serializer,
{
    let file = File::open(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        details: format!("unable to open for reading: {e}"),
    })?;

    let mut bytes = Vec::new();
    transform
        .reader(file)?
        .read_to_end(&mut bytes)
        .map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            details: format!("error reading config: {e}"),
        })?;

    serializer
        .decode(&bytes)
        .map_err(|details| ConfigError::Decode {
            path: path.to_path_buf(),
            details,
        })
}

/// Encodes `config`, writes it through `transform`, and re-stats the file.
///
/// Returns the snapshot of the written file. If the final stat fails the bytes
/// are already on disk but the error is still reported.
///
/// # Errors
/// * `ConfigError::Encode` - If `config` cannot be serialized
/// * `ConfigError::Io` - If the file cannot be opened, written or stat-ed
/// * `ConfigError::KeyInit` - If the transform's keystream cannot be derived
pub(super) fn write_config<C, S>(
    path: &Path,
    transform: &Transform,
    serializer: &S,
    config: &C,
) -> Result<FileSnapshot, ConfigError>
where
    C: VersionedConfig,
    S: Serializer,
{
    let mut bytes = serializer
        .encode(config)
        .map_err(|details| ConfigError::Encode { details })?;

    // Obfuscate before opening so a bad key never truncates the existing file.
    transform.apply(&mut bytes)?;

    let io_error = |action: &str, e: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        details: format!("{action}: {e}"),
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io_error("unable to open for writing", e))?;

    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|e| io_error("unable to write config", e))?;
    drop(file);

    FileSnapshot::capture(path).map_err(|e| io_error("unable to stat after write", e))
}
