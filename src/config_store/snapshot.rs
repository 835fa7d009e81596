use std::{
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// File metadata observed when the in-memory configuration was last synchronized.
///
/// Two snapshots are considered equal when size and modification time match;
/// the path is carried for re-stat-ing but does not take part in the comparison.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
}

impl FileSnapshot {
    /// Stats `path` and records its size and modification time.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the file cannot be stat-ed or the
    /// platform does not report modification times.
    pub fn capture(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: metadata.modified()?,
        })
    }

    /// Path that was stat-ed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Re-stats the file and reports whether it differs from this snapshot.
    ///
    /// Best effort: if the file cannot be observed, no change is reported.
    pub fn has_changed(&self) -> bool {
        match FileSnapshot::capture(&self.path) {
            Ok(current) => current != *self,
            Err(_) => false,
        }
    }
}

impl PartialEq for FileSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.modified == other.modified
    }
}

impl Eq for FileSnapshot {}
