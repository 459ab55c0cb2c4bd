/// When mutations of a [`FileDefaults`](crate::FileDefaults) reach disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Rewrite the file on every mutation.
    #[default]
    Immediate,
    /// Mark the store dirty; write on `synchronize()` or drop.
    Deferred,
}

/// Flush/sync strategy for file writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` the new file before it replaces the old one.
    EveryWrite,
    /// Rely on OS page-cache buffering.
    #[default]
    OsDefault,
}

/// Configuration for a file-backed defaults store.
#[derive(Clone, Debug, Default)]
pub struct FileDefaultsConfig {
    /// When mutations are written out.
    pub write_mode: WriteMode,
    /// Whether writes are fsynced.
    pub sync_mode: SyncMode,
}

impl FileDefaultsConfig {
    /// Config with deferred writes and default syncing.
    pub fn deferred() -> Self {
        Self {
            write_mode: WriteMode::Deferred,
            ..Self::default()
        }
    }
}
