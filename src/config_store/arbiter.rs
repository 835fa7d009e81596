use crate::config::VersionedConfig;

/// Outcome of comparing a freshly loaded value against memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LoadVerdict {
    /// Loaded value equals memory, version included.
    Unchanged,
    /// Memory holds a different version than the file.
    Conflict {
        /// Version held in memory
        expected: u64,
        /// Version found on disk
        found: u64,
    },
    /// Loaded value should replace memory.
    Accept,
}

/// Decides what a reload should do with `loaded` given the in-memory value.
pub(super) fn judge_load<C: VersionedConfig>(current: Option<&C>, loaded: &C) -> LoadVerdict {
    let Some(current) = current else {
        return LoadVerdict::Accept;
    };

    if current.version() != loaded.version() {
        return LoadVerdict::Conflict {
            expected: current.version(),
            found: loaded.version(),
        };
    }

    if current == loaded {
        LoadVerdict::Unchanged
    } else {
        LoadVerdict::Accept
    }
}

/// Compares a candidate against the version-zeroed in-memory copy.
///
/// `updated` has its version zeroed as a side effect. Returns the version to
/// assign if the content differs, or `None` when saving would be a no-op.
pub(super) fn judge_save<C: VersionedConfig>(
    original: Option<&C>,
    current_version: Option<u64>,
    updated: &mut C,
) -> Option<u64> {
    updated.set_version(0);

    if original == Some(&*updated) {
        return None;
    }

    Some(current_version.map_or(0, |version| version.saturating_add(1)))
}
