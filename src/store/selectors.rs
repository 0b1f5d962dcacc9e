// ============================================================================
// lumen-store - Selector Engine
// Named pure derivations over raw values
// ============================================================================
//
// Selectors are one level deep: they depend on raw values only, never on
// other selectors. Computation is on demand and unmemoized - every read
// re-reads the current dependency values and re-applies the transformer.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::core::errors::StoreError;
use crate::core::types::TransformFn;
use crate::store::registry::ValueRegistry;

// =============================================================================
// SELECTOR ENTRY
// =============================================================================

/// A selector definition: its transformer and ordered dependency names.
struct SelectorEntry {
    transform: TransformFn,
    deps: Vec<String>,
}

// =============================================================================
// SELECTOR ENGINE
// =============================================================================

/// The registry of selector definitions, keyed by qualified name.
#[derive(Default)]
pub struct SelectorEngine {
    entries: RefCell<HashMap<String, SelectorEntry>>,
}

impl SelectorEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a selector definition, replacing any prior entry under the
    /// same qualified name.
    pub fn define(&self, qualified: String, deps: Vec<String>, transform: TransformFn) {
        self.entries
            .borrow_mut()
            .insert(qualified, SelectorEntry { transform, deps });
    }

    /// Install a placeholder definition: zero dependencies, transformer
    /// returning `Null`. Used by bulk initialization; expected to be
    /// redefined with a real transformer later.
    pub fn define_placeholder(&self, qualified: String) {
        self.define(qualified, Vec::new(), std::rc::Rc::new(|_| Value::Null));
    }

    /// Whether a selector is defined under `qualified`.
    pub fn contains(&self, qualified: &str) -> bool {
        self.entries.borrow().contains_key(qualified)
    }

    /// Compute the current value of the selector `qualified`.
    ///
    /// Reads each dependency's current value from `values` in declared
    /// order and applies the transformer positionally. Pure with respect to
    /// store state, and recomputed from scratch on every call.
    ///
    /// No borrow of the definition table is held while the transformer
    /// runs, so a transformer reading through the facade cannot deadlock.
    pub fn compute(&self, qualified: &str, values: &ValueRegistry) -> Result<Value, StoreError> {
        let (transform, deps) = {
            let entries = self.entries.borrow();
            let entry = entries
                .get(qualified)
                .ok_or_else(|| StoreError::UndefinedSelector(qualified.to_string()))?;
            (entry.transform.clone(), entry.deps.clone())
        };

        let mut inputs = Vec::with_capacity(deps.len());
        for dep in &deps {
            inputs.push(values.get(dep)?);
        }

        Ok(transform(&inputs))
    }
}

// =============================================================================
// TESTS
// =============================================================================
