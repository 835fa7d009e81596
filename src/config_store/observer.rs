use std::path::Path;

use tracing::{Level, debug, error, info, trace, warn};

use super::ConfigError;

/// Decision points reached while synchronizing a configuration with its file.
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// Size and modification time match the last snapshot; nothing was read.
    SnapshotUnchanged {
        /// Backing file
        path: &'a Path,
    },
    /// Reading the file through the obfuscation transform.
    ReadingObfuscated {
        /// Backing file
        path: &'a Path,
    },
    /// The obfuscated read failed; a plain read follows.
    ObfuscatedReadFailed {
        /// Backing file
        path: &'a Path,
        /// Failure of the obfuscated attempt
        error: &'a ConfigError,
    },
    /// Reading the file as plain bytes.
    ReadingPlain {
        /// Backing file
        path: &'a Path,
    },
    /// The version on disk differs from memory; the in-memory value is written back.
    VersionMismatch {
        /// Version held in memory
        expected: u64,
        /// Version found on disk
        found: u64,
    },
    /// Writing the in-memory value back after a version mismatch failed.
    CorrectiveWriteFailed {
        /// Failure of the corrective write
        error: &'a ConfigError,
    },
    /// The decoded file equals the in-memory value.
    ContentUnchanged,
    /// The decoded file differs from memory and was adopted.
    ChangedOnDisk {
        /// Version of the adopted value
        version: u64,
    },
    /// A save was requested with content identical to memory.
    SaveUnchanged,
    /// A changed value is being written.
    Saving {
        /// Version assigned to the written value
        version: u64,
    },
    /// No file existed, so a default configuration was written.
    DefaultsWritten {
        /// Backing file
        path: &'a Path,
    },
    /// The file vanished after synchronization and was rewritten from memory.
    MissingFileRestored {
        /// Backing file
        path: &'a Path,
    },
    /// A plain file was rewritten in obfuscated form.
    MigratedToObfuscated {
        /// Backing file
        path: &'a Path,
    },
}

impl SyncEvent<'_> {
    /// Severity at which the event should be reported.
    pub fn level(&self) -> Level {
        match self {
            SyncEvent::SnapshotUnchanged { .. }
            | SyncEvent::ReadingObfuscated { .. }
            | SyncEvent::ObfuscatedReadFailed { .. }
            | SyncEvent::ReadingPlain { .. }
            | SyncEvent::ContentUnchanged
            | SyncEvent::SaveUnchanged => Level::TRACE,
            SyncEvent::ChangedOnDisk { .. } | SyncEvent::Saving { .. } => Level::DEBUG,
            SyncEvent::DefaultsWritten { .. }
            | SyncEvent::MissingFileRestored { .. }
            | SyncEvent::MigratedToObfuscated { .. } => Level::INFO,
            SyncEvent::VersionMismatch { .. } => Level::WARN,
            SyncEvent::CorrectiveWriteFailed { .. } => Level::ERROR,
        }
    }
}

/// Receives [`SyncEvent`]s from a manager.
pub trait SyncObserver: Send + Sync {
    /// Called synchronously at each decision point.
    fn on_event(&self, event: &SyncEvent<'_>);
}

/// Forwards events to `tracing` at their own level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent<'_>) {
        match event.level() {
            Level::TRACE => trace!(?event, "config sync"),
            Level::DEBUG => debug!(?event, "config sync"),
            Level::INFO => info!(?event, "config sync"),
            Level::WARN => warn!(?event, "config sync"),
            _ => error!(?event, "config sync"),
        }
    }
}
