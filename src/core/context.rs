// ============================================================================
// lumen-store - Default Store Context
// Thread-local process-default store instance
// ============================================================================
//
// Call sites that want a shared registry without explicit construction reach
// it through default_store(). Tests construct isolated DataStore instances
// instead, so no state leaks across them.
// ============================================================================

use crate::store::facade::DataStore;

thread_local! {
    static DEFAULT_STORE: DataStore = DataStore::new();
}

/// Get a handle to the thread's default store.
///
/// The handle is a cheap clone; every call site on the same thread observes
/// the same underlying registry.
///
/// # Example
/// ```
/// use lumen_store::default_store;
/// use serde_json::json;
///
/// default_store().update("answer", json!(42)).unwrap();
/// assert_eq!(default_store().get("answer").unwrap(), json!(42));
/// ```
pub fn default_store() -> DataStore {
    DEFAULT_STORE.with(|store| store.clone())
}

// =============================================================================
// TESTS
// =============================================================================
