use crate::error::StoreResult;
use crate::value::Encoded;

/// Untyped key-value defaults store.
///
/// All implementations must satisfy these invariants:
/// - Writing `None` for a key is equivalent to removing it.
/// - Individual reads and writes are safe to call from any thread.
/// - There is no transactional read-modify-write; concurrent writers to the
///   same key race and the last write wins.
/// - The store never interprets values beyond their [`Encoded`] variant.
pub trait DefaultsStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn value(&self, key: &str) -> StoreResult<Option<Encoded>>;

    /// Store `value` under `key`, or remove the key when `value` is `None`.
    fn set_value(&self, key: &str, value: Option<Encoded>) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if a value was stored.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Check whether a value is stored under `key`.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.value(key)?.is_some())
    }

    /// All keys currently stored, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Flush pending writes to durable storage.
    ///
    /// Backends without deferred writes need not override this.
    fn synchronize(&self) -> StoreResult<()> {
        Ok(())
    }
}
