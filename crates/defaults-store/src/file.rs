//! File-backed defaults store.
//!
//! The whole key space is kept in memory and written to a single file. Each
//! write replaces the file atomically, so a crash leaves either the old or
//! the new contents on disk, never a torn mix.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::{FileDefaultsConfig, SyncMode, WriteMode};
use crate::error::{StoreError, StoreResult};
use crate::traits::DefaultsStore;
use crate::value::Encoded;

/// File magic identifying a defaults file.
const MAGIC: [u8; 4] = *b"UDEF";

/// Header size: 4 bytes magic + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Suffix appended to a file that failed to decode on open.
const CORRUPT_SUFFIX: &str = ".corrupt";

struct FileState {
    values: BTreeMap<String, Encoded>,
    /// Mutations not yet written to disk.
    dirty: bool,
}

/// Durable defaults store persisted to a single file.
///
/// On-disk format:
/// ```text
/// [4 bytes: magic "UDEF"]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized BTreeMap<String, Encoded>)]
/// ```
///
/// A file that fails the magic, CRC, or payload checks on open is renamed
/// to `<name>.corrupt` and the store starts empty.
pub struct FileDefaults {
    path: PathBuf,
    state: Mutex<FileState>,
    config: FileDefaultsConfig,
}

impl FileDefaults {
    /// Open (or create) a defaults file at the given path.
    ///
    /// A missing file is an empty store; nothing is written until the first
    /// mutation.
    pub fn open(path: impl AsRef<Path>, config: FileDefaultsConfig) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(parent_dir(&path))?;

        let values = load(&path)?;
        debug!(path = %path.display(), keys = values.len(), "opened defaults file");

        Ok(Self {
            path,
            state: Mutex::new(FileState {
                values,
                dirty: false,
            }),
            config,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the lock was poisoned, as does [`is_dirty`](Self::is_dirty);
    /// trait methods report [`StoreError::LockPoisoned`] instead.
    pub fn len(&self) -> usize {
        self.state.lock().expect("lock poisoned").values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if there are mutations not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.state.lock().expect("lock poisoned").dirty
    }

    /// Apply `f` to the key space and write it out per the write mode.
    ///
    /// A change stays in memory even if the immediate write fails; the store
    /// is then left dirty so `synchronize()` or drop retries the write.
    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, Encoded>) -> (R, bool),
    ) -> StoreResult<R> {
        let mut state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        let (result, changed) = f(&mut state.values);
        if changed {
            state.dirty = true;
            if self.config.write_mode == WriteMode::Immediate {
                write_out(&self.path, self.config.sync_mode, &mut state)?;
            }
        }
        Ok(result)
    }
}

impl DefaultsStore for FileDefaults {
    fn value(&self, key: &str) -> StoreResult<Option<Encoded>> {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.values.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: Option<Encoded>) -> StoreResult<()> {
        self.mutate(|values| match value {
            Some(value) => {
                values.insert(key.to_string(), value);
                ((), true)
            }
            None => ((), values.remove(key).is_some()),
        })
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        self.mutate(|values| {
            let existed = values.remove(key).is_some();
            (existed, existed)
        })
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.values.contains_key(key))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.values.keys().cloned().collect())
    }

    fn synchronize(&self) -> StoreResult<()> {
        let mut state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        if state.dirty {
            write_out(&self.path, self.config.sync_mode, &mut state)?;
        }
        Ok(())
    }
}

impl Drop for FileDefaults {
    fn drop(&mut self) {
        let Ok(state) = self.state.get_mut() else {
            return;
        };
        if state.dirty {
            if let Err(e) = write_out(&self.path, self.config.sync_mode, state) {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to write defaults on drop"
                );
            }
        }
    }
}

impl std::fmt::Debug for FileDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDefaults")
            .field("path", &self.path)
            .field("key_count", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load(path: &Path) -> StoreResult<BTreeMap<String, Encoded>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };

    match decode_file(&bytes) {
        Ok(values) => Ok(values),
        Err(reason) => {
            let mut aside = OsString::from(path.as_os_str());
            aside.push(CORRUPT_SUFFIX);
            let aside = PathBuf::from(aside);
            warn!(
                path = %path.display(),
                moved_to = %aside.display(),
                %reason,
                "corrupt defaults file; starting empty"
            );
            fs::rename(path, &aside).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("{reason}; could not move aside: {e}"),
            })?;
            Ok(BTreeMap::new())
        }
    }
}

fn decode_file(bytes: &[u8]) -> Result<BTreeMap<String, Encoded>, String> {
    if bytes.len() < HEADER_SIZE {
        return Err(format!("file too short: {} bytes", bytes.len()));
    }
    if bytes[0..4] != MAGIC {
        return Err("bad magic".into());
    }
    let expected_crc = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let payload = &bytes[HEADER_SIZE..];
    let computed_crc = crc32fast::hash(payload);
    if computed_crc != expected_crc {
        return Err(format!(
            "CRC mismatch: expected {expected_crc:#010x}, computed {computed_crc:#010x}"
        ));
    }
    bincode::deserialize(payload).map_err(|e| e.to_string())
}

fn encode_file(values: &BTreeMap<String, Encoded>) -> StoreResult<Vec<u8>> {
    let payload =
        bincode::serialize(values).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let crc = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&MAGIC);
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

fn write_out(path: &Path, sync_mode: SyncMode, state: &mut FileState) -> StoreResult<()> {
    let bytes = encode_file(&state.values)?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    if sync_mode == SyncMode::EveryWrite {
        tmp.as_file().sync_all()?;
    }
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    state.dirty = false;
    debug!(path = %path.display(), len = bytes.len(), "defaults file written");
    Ok(())
}
