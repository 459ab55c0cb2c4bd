//! In-memory defaults store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::DefaultsStore;
use crate::value::Encoded;

/// In-memory, HashMap-based defaults store.
///
/// Intended for tests and embedding. Values live behind a `RwLock` and are
/// cloned on read. Data is lost when the store is dropped.
pub struct InMemoryDefaults {
    values: RwLock<HashMap<String, Encoded>>,
}

impl InMemoryDefaults {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the lock was poisoned; trait methods report
    /// [`StoreError::LockPoisoned`] instead.
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key.
    pub fn clear(&self) -> StoreResult<()> {
        self.values
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

impl Default for InMemoryDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultsStore for InMemoryDefaults {
    fn value(&self, key: &str) -> StoreResult<Option<Encoded>> {
        let map = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: Option<Encoded>) -> StoreResult<()> {
        let mut map = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
        match value {
            Some(value) => {
                map.insert(key.to_string(), value);
            }
            None => {
                map.remove(key);
            }
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.remove(key).is_some())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let map = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(key))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for InMemoryDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDefaults")
            .field("key_count", &self.len())
            .finish()
    }
}
