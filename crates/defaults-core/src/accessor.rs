use std::marker::PhantomData;
use std::sync::Arc;

use defaults_store::DefaultsStore;
use tracing::{debug, warn};

use crate::standard::standard_store;
use crate::storable::Storable;

/// A key in a defaults store bound to a value type.
///
/// The accessor holds no state beyond the binding; every call goes straight
/// to the store. Create one per logical setting and keep it around. Always
/// read a key through the same `T` it was written with: a mismatched type
/// reads back as `None`.
///
/// None of the operations fail from the caller's point of view. A value
/// that cannot be encoded is written as absence, and store errors are
/// logged and dropped.
pub struct UserDefault<T> {
    key: String,
    store: Arc<dyn DefaultsStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Storable> UserDefault<T> {
    /// Bind `key` in `store` to `T`.
    pub fn new(key: impl Into<String>, store: Arc<dyn DefaultsStore>) -> Self {
        Self {
            key: key.into(),
            store,
            _marker: PhantomData,
        }
    }

    /// Bind `key` in the process-wide standard store to `T`.
    pub fn standard(key: impl Into<String>) -> Self {
        Self::new(key, standard_store())
    }

    /// The key this accessor reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The store this accessor is bound to.
    pub fn store(&self) -> &Arc<dyn DefaultsStore> {
        &self.store
    }

    /// Write `value`, or remove the key when `value` is `None`.
    pub fn persist(&self, value: Option<&T>) {
        let encoded = match value {
            Some(value) => {
                let encoded = value.encode();
                if encoded.is_none() {
                    debug!(key = %self.key, "value has no encoded form; clearing key");
                }
                encoded
            }
            None => None,
        };

        if let Err(e) = self.store.set_value(&self.key, encoded) {
            warn!(key = %self.key, error = %e, "failed to write default");
        }
    }

    /// Write `value`.
    pub fn set(&self, value: &T) {
        self.persist(Some(value));
    }

    /// Read the stored value.
    ///
    /// Returns `None` if the key is missing or the stored value does not
    /// decode as `T`.
    pub fn get(&self) -> Option<T> {
        let encoded = match self.store.value(&self.key) {
            Ok(Some(encoded)) => encoded,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read default");
                return None;
            }
        };

        let kind = encoded.kind();
        let value = T::decode(encoded);
        if value.is_none() {
            debug!(key = %self.key, %kind, "stored value did not decode");
        }
        value
    }

    /// Read the stored value, or `default` if there is none.
    pub fn get_or(&self, default: T) -> T {
        self.get().unwrap_or(default)
    }

    /// Read the stored value, or compute a fallback if there is none.
    pub fn get_or_else(&self, f: impl FnOnce() -> T) -> T {
        self.get().unwrap_or_else(f)
    }

    /// Remove the stored value.
    pub fn clear(&self) {
        self.persist(None);
    }
}

impl<T> Clone for UserDefault<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for UserDefault<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDefault")
            .field("key", &self.key)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
