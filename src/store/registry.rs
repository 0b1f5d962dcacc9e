// ============================================================================
// lumen-store - Value Registry
// Named mutable value slots with lazy initialization
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::core::errors::StoreError;

// =============================================================================
// VALUE ENTRY
// =============================================================================

/// A named mutable slot and its selector back-references.
///
/// Entries are created on first reference and live for the life of the
/// registry; there is no destroy operation.
pub struct ValueEntry {
    /// The current value.
    pub data: Value,

    /// Qualified names of selectors that depend on this value, in the order
    /// the dependency edges were registered. Duplicate-free.
    ///
    /// Edges from a superseded selector definition are left in place, so a
    /// redefined selector may be recomputed on values it no longer reads.
    /// Recomputation re-reads the current dependency list, so the result is
    /// still correct.
    pub dependent_selectors: Vec<String>,
}

// =============================================================================
// VALUE REGISTRY
// =============================================================================

/// The registry of named values.
#[derive(Default)]
pub struct ValueRegistry {
    entries: RefCell<HashMap<String, ValueEntry>>,
}

impl ValueRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entry for `name` if it does not exist yet.
    ///
    /// Idempotent: an existing entry is left untouched, including its value.
    /// A missing `default` initializes the slot to `Null`.
    pub fn ensure_initialized(&self, name: &str, default: Option<Value>) {
        let mut entries = self.entries.borrow_mut();
        entries.entry(name.to_string()).or_insert_with(|| ValueEntry {
            data: default.unwrap_or(Value::Null),
            dependent_selectors: Vec::new(),
        });
    }

    /// Whether `name` has ever been initialized.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    /// Read the current value of `name`.
    ///
    /// A name initialized to `Null` reads back `Null`; only a name the
    /// registry has never seen fails.
    pub fn get(&self, name: &str) -> Result<Value, StoreError> {
        self.entries
            .borrow()
            .get(name)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| StoreError::NotInitialized(name.to_string()))
    }

    /// Replace the stored value of `name`, returning the previous value.
    ///
    /// Raw slot replacement - diffing and notification are the facade's job.
    pub fn replace(&self, name: &str, value: Value) -> Result<Value, StoreError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| StoreError::NotInitialized(name.to_string()))?;
        Ok(std::mem::replace(&mut entry.data, value))
    }

    /// Record that `selector` depends on the value `name`.
    ///
    /// Idempotent: a selector already present in the dependent list is not
    /// added again, so repeated definitions don't multiply notifications.
    pub fn register_dependent(&self, name: &str, selector: &str) {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.get_mut(name) {
            if !entry.dependent_selectors.iter().any(|s| s == selector) {
                entry.dependent_selectors.push(selector.to_string());
            }
        }
    }

    /// Qualified names of the selectors depending on `name`, in registration
    /// order. Empty for unknown names.
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.entries
            .borrow()
            .get(name)
            .map(|entry| entry.dependent_selectors.clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================
