//! The process-wide standard defaults store.

use std::sync::{Arc, OnceLock};

use defaults_store::{DefaultsStore, InMemoryDefaults};
use tracing::debug;

static STANDARD: OnceLock<Arc<dyn DefaultsStore>> = OnceLock::new();

/// The process-wide standard store.
///
/// If no store was installed with [`install_standard_store`] before the
/// first call, an [`InMemoryDefaults`] is installed.
pub fn standard_store() -> Arc<dyn DefaultsStore> {
    let store = STANDARD.get_or_init(|| -> Arc<dyn DefaultsStore> {
        debug!("no standard store installed; using in-memory defaults");
        Arc::new(InMemoryDefaults::new())
    });
    Arc::clone(store)
}

/// Install the process-wide standard store.
///
/// Succeeds only once, and only before [`standard_store`] is first called.
/// On failure the rejected store is handed back.
pub fn install_standard_store(
    store: Arc<dyn DefaultsStore>,
) -> Result<(), Arc<dyn DefaultsStore>> {
    STANDARD.set(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserDefault;

    #[test]
    fn standard_store_is_shared() {
        let a = standard_store();
        let b = standard_store();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn install_after_first_use_is_rejected() {
        let _ = standard_store();
        let rejected = install_standard_store(Arc::new(InMemoryDefaults::new()));
        assert!(rejected.is_err());
    }

    #[test]
    fn standard_accessor_uses_shared_store() {
        let key = "standard-store-test-launch-count";
        UserDefault::<i64>::standard(key).set(&3);
        assert_eq!(UserDefault::<i64>::standard(key).get(), Some(3));
        assert!(standard_store().contains(key).unwrap());
        UserDefault::<i64>::standard(key).clear();
    }
}
