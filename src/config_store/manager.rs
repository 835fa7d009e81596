use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    config::{Serializer, TomlSerializer, VersionedConfig},
    obfuscation::{ObfuscationKey, Transform},
};

use super::{
    ConfigError, FileSnapshot, SyncEvent, SyncObserver, TracingObserver,
    arbiter::{self, LoadVerdict},
    disk,
};

/// In-memory configuration together with the file state it was synchronized from.
struct Synced<C> {
    config: C,
    snapshot: FileSnapshot,
}

/// Result of reading the backing file.
struct Loaded<C> {
    config: C,
    plain_fallback: bool,
}

/// Result of a reload, with the detail `init` needs for migration.
struct ReloadOutcome {
    changed: bool,
    plain_fallback: bool,
}

/// Keeps a configuration value synchronized with a single file.
///
/// The manager is the only writer of its in-memory value. Callers hand in and
/// receive copies, never references to the live value. Periodic change checks
/// are driven by the caller invoking [`Manager::reload`].
///
/// No locking is performed: at most one thread may drive a manager at a time,
/// and other processes writing the same file are detected only through the
/// version check.
pub struct Manager<C, S = TomlSerializer> {
    path: PathBuf,
    transform: Transform,
    serializer: S,
    observer: Box<dyn SyncObserver>,
    state: Option<Synced<C>>,
}

impl<C: VersionedConfig> Manager<C, TomlSerializer> {
    /// Creates a manager for `path` storing plain TOML and reporting through `tracing`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transform: Transform::Identity,
            serializer: TomlSerializer,
            observer: Box::new(TracingObserver),
            state: None,
        }
    }
}

impl<C: VersionedConfig, S: Serializer> Manager<C, S> {
    /// Obfuscates the file with an AES-OFB stream keyed by `key`.
    pub fn with_obfuscation_key(self, key: impl Into<ObfuscationKey>) -> Self {
        self.with_transform(Transform::Stream(key.into()))
    }

    /// Replaces the byte transform applied around serialization.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Switches the on-disk encoding.
    pub fn with_serializer<T: Serializer>(self, serializer: T) -> Manager<C, T> {
        Manager {
            path: self.path,
            transform: self.transform,
            serializer,
            observer: self.observer,
            state: self.state,
        }
    }

    /// Routes sync events to `observer` instead of `tracing`.
    pub fn with_observer(mut self, observer: impl SyncObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if file contents are obfuscated.
    pub fn is_obfuscated(&self) -> bool {
        self.transform.is_obfuscating()
    }

    /// Version of the in-memory value, if one has been loaded or saved.
    pub fn version(&self) -> Option<u64> {
        self.state.as_ref().map(|state| state.config.version())
    }

    /// Returns a copy of the in-memory value.
    ///
    /// # Errors
    /// * `ConfigError::Copy` - If the serializer round-trip fails
    pub fn current(&self) -> Result<Option<C>, ConfigError> {
        self.state
            .as_ref()
            .map(|state| self.copy(&state.config))
            .transpose()
    }

    /// Reports whether the file's size or modification time moved since the
    /// last synchronization.
    ///
    /// Returns `false` when the file cannot be stat-ed. Before the first
    /// synchronization any observable file counts as changed.
    pub fn has_changed_on_disk(&self) -> bool {
        match &self.state {
            Some(state) => state.snapshot.has_changed(),
            None => FileSnapshot::capture(&self.path).is_ok(),
        }
    }

    /// Loads the file if it changed since the last synchronization.
    ///
    /// Returns `Ok(true)` when a different value was adopted from disk.
    ///
    /// # Errors
    /// * `ConfigError::Stat` - If the file cannot be stat-ed
    /// * `ConfigError::Io` / `ConfigError::Decode` / `ConfigError::KeyInit` - If
    ///   the file cannot be read; with obfuscation enabled this is the error of
    ///   the obfuscated attempt
    /// * `ConfigError::VersionConflict` - If the file's version differs from
    ///   memory; the in-memory value is kept and written back to the file
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn reload(&mut self) -> Result<bool, ConfigError> {
        self.sync_from_disk().map(|outcome| outcome.changed)
    }

    /// Saves `updated` if its content differs from memory, bumping the version.
    ///
    /// Defaults are applied first and versions are ignored in the comparison.
    /// Returns `Ok(false)` without touching the file when nothing changed. On
    /// failure the in-memory value is left as it was.
    ///
    /// # Errors
    /// * `ConfigError::Copy` - If the in-memory value cannot be copied for comparison
    /// * `ConfigError::Encode` / `ConfigError::Io` / `ConfigError::KeyInit` - If
    ///   the file cannot be written
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn save(&mut self, mut updated: C) -> Result<bool, ConfigError> {
        updated.apply_defaults();

        let original = match &self.state {
            Some(state) => {
                let mut copy = self.copy(&state.config)?;
                copy.set_version(0);
                Some(copy)
            }
            None => None,
        };

        let Some(next_version) = arbiter::judge_save(original.as_ref(), self.version(), &mut updated)
        else {
            self.observer.on_event(&SyncEvent::SaveUnchanged);
            return Ok(false);
        };

        updated.set_version(next_version);
        self.observer.on_event(&SyncEvent::Saving {
            version: next_version,
        });

        let snapshot = disk::write_config(&self.path, &self.transform, &self.serializer, &updated)?;
        self.state = Some(Synced {
            config: updated,
            snapshot,
        });

        Ok(true)
    }

    /// Applies `mutate` to a copy of the current value (or the default) and saves it.
    ///
    /// # Errors
    /// Same as [`Manager::current`] and [`Manager::save`].
    pub fn update<F>(&mut self, mutate: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(&mut C),
    {
        let mut updated = self.current()?.unwrap_or_default();
        mutate(&mut updated);
        self.save(updated)
    }

    /// Performs the first synchronization and returns a copy of the adopted value.
    ///
    /// A missing file is created from the default configuration, or from the
    /// in-memory value if one was already synchronized. With
    /// obfuscation enabled, a file that could only be read as plain text is
    /// rewritten obfuscated.
    ///
    /// # Errors
    /// Same as [`Manager::reload`] for an existing file and [`Manager::save`]
    /// for a missing one.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn init(&mut self) -> Result<C, ConfigError> {
        match fs::metadata(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if self.state.is_some() {
                    self.restore_missing_file()?;
                } else if self.save(C::default())? {
                    self.observer
                        .on_event(&SyncEvent::DefaultsWritten { path: &self.path });
                }
            }
            _ => {
                let outcome = self.sync_from_disk()?;
                if outcome.plain_fallback && self.transform.is_obfuscating() {
                    self.rewrite_obfuscated()?;
                }
            }
        }

        Ok(self.current()?.unwrap_or_default())
    }

    fn sync_from_disk(&mut self) -> Result<ReloadOutcome, ConfigError> {
        let snapshot = FileSnapshot::capture(&self.path).map_err(|e| ConfigError::Stat {
            path: self.path.clone(),
            details: e.to_string(),
        })?;

        if self
            .state
            .as_ref()
            .is_some_and(|state| state.snapshot == snapshot)
        {
            self.observer
                .on_event(&SyncEvent::SnapshotUnchanged { path: &self.path });
            return Ok(ReloadOutcome {
                changed: false,
                plain_fallback: false,
            });
        }

        let loaded = self.load()?;
        let current = self.state.as_ref().map(|state| &state.config);

        match arbiter::judge_load(current, &loaded.config) {
            LoadVerdict::Conflict { expected, found } => {
                self.observer
                    .on_event(&SyncEvent::VersionMismatch { expected, found });
                self.write_back();
                Err(ConfigError::VersionConflict { expected, found })
            }
            LoadVerdict::Unchanged => {
                // Snapshot stays stale, so the next reload decodes the file again.
                self.observer.on_event(&SyncEvent::ContentUnchanged);
                Ok(ReloadOutcome {
                    changed: false,
                    plain_fallback: loaded.plain_fallback,
                })
            }
            LoadVerdict::Accept => {
                self.observer.on_event(&SyncEvent::ChangedOnDisk {
                    version: loaded.config.version(),
                });
                self.state = Some(Synced {
                    config: loaded.config,
                    snapshot,
                });
                Ok(ReloadOutcome {
                    changed: true,
                    plain_fallback: loaded.plain_fallback,
                })
            }
        }
    }

    fn load(&self) -> Result<Loaded<C>, ConfigError> {
        if !self.transform.is_obfuscating() {
            self.observer
                .on_event(&SyncEvent::ReadingPlain { path: &self.path });
            return disk::read_config(&self.path, &self.transform, &self.serializer).map(
                |config| Loaded {
                    config,
                    plain_fallback: false,
                },
            );
        }

        self.observer
            .on_event(&SyncEvent::ReadingObfuscated { path: &self.path });
        let obfuscated_error =
            match disk::read_config(&self.path, &self.transform, &self.serializer) {
                Ok(config) => {
                    return Ok(Loaded {
                        config,
                        plain_fallback: false,
                    });
                }
                Err(e) => e,
            };

        self.observer.on_event(&SyncEvent::ObfuscatedReadFailed {
            path: &self.path,
            error: &obfuscated_error,
        });
        self.observer
            .on_event(&SyncEvent::ReadingPlain { path: &self.path });

        disk::read_config(&self.path, &Transform::Identity, &self.serializer)
            .map(|config| Loaded {
                config,
                plain_fallback: true,
            })
            .map_err(|_| obfuscated_error)
    }

    /// Best effort: a failure is reported to the observer only.
    fn write_back(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match disk::write_config(&self.path, &self.transform, &self.serializer, &state.config) {
            Ok(snapshot) => state.snapshot = snapshot,
            Err(error) => self
                .observer
                .on_event(&SyncEvent::CorrectiveWriteFailed { error: &error }),
        }
    }

    /// Recreates a file that disappeared after the first synchronization.
    fn restore_missing_file(&mut self) -> Result<(), ConfigError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        state.snapshot =
            disk::write_config(&self.path, &self.transform, &self.serializer, &state.config)?;
        self.observer
            .on_event(&SyncEvent::MissingFileRestored { path: &self.path });

        Ok(())
    }

    fn rewrite_obfuscated(&mut self) -> Result<(), ConfigError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        state.snapshot =
            disk::write_config(&self.path, &self.transform, &self.serializer, &state.config)?;
        self.observer
            .on_event(&SyncEvent::MigratedToObfuscated { path: &self.path });

        Ok(())
    }

    fn copy(&self, config: &C) -> Result<C, ConfigError> {
        let bytes = self
            .serializer
            .encode(config)
            .map_err(|details| ConfigError::Copy { details })?;

        self.serializer
            .decode(&bytes)
            .map_err(|details| ConfigError::Copy { details })
    }
}
