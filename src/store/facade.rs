// ============================================================================
// lumen-store - Store Facade
// The coordinating object tying registry, comparator, selectors, listeners
// ============================================================================
//
// Update propagation, in order, fully synchronous within the caller's stack
// frame:
//   1. Ensure the name is initialized.
//   2. Diff against the stored value; bail silently if unchanged.
//   3. Replace the stored value.
//   4. Fire direct listeners with (new, previous).
//   5. For each dependent selector, in registration order: recompute and
//      fire that selector's listeners with the recomputed value.
//
// There is no batching and no reentrancy guard: a listener that updates the
// store re-enters this algorithm before the outer pass's remaining captured
// listeners fire.
// ============================================================================

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::errors::StoreError;
use crate::core::types::{qualify_selector, NameKind, SelectorDeps};
use crate::store::comparator::has_changed;
use crate::store::listeners::{ListenerRegistry, SubscriptionHandle};
use crate::store::registry::ValueRegistry;
use crate::store::selectors::SelectorEngine;

// =============================================================================
// DATA STORE
// =============================================================================

/// The inner state shared by all handles to one store.
struct StoreInner {
    values: ValueRegistry,
    selectors: SelectorEngine,
    value_listeners: ListenerRegistry,
    selector_listeners: ListenerRegistry,
}

/// An observable key-value store with derived selectors.
///
/// `DataStore` is a cheap-clone handle: clones share the **same** registry.
/// Construct isolated instances with [`DataStore::new`], or reach the
/// thread's shared instance through
/// [`default_store`](crate::core::context::default_store).
///
/// # Example
///
/// ```
/// use lumen_store::DataStore;
/// use serde_json::json;
///
/// let store = DataStore::new();
/// store.update("x", json!(1)).unwrap();
/// store.define_selector("double", "x", |inputs| {
///     json!(inputs[0].as_i64().unwrap_or(0) * 2)
/// }).unwrap();
///
/// assert_eq!(store.get("selector::double").unwrap(), json!(2));
/// ```
#[derive(Clone)]
pub struct DataStore {
    inner: Rc<StoreInner>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                values: ValueRegistry::new(),
                selectors: SelectorEngine::new(),
                value_listeners: ListenerRegistry::new(),
                selector_listeners: ListenerRegistry::new(),
            }),
        }
    }

    /// Bulk pre-register raw values and placeholder selectors.
    ///
    /// `initial` must be a JSON object; each key becomes a value slot.
    /// Values already present keep their current data. Every name in
    /// `selector_names` (bare or qualified) gets a placeholder definition -
    /// zero dependencies, computing to `Null` - expected to be filled in by
    /// [`define_selector`](Self::define_selector) later. Listed selectors
    /// that already have a real definition are reset to the placeholder.
    pub fn initialize(&self, initial: Value, selector_names: &[&str]) -> Result<(), StoreError> {
        let Value::Object(values) = initial else {
            return Err(StoreError::InvalidArgument(
                "bulk initialization expects an object payload".to_string(),
            ));
        };

        for (name, value) in values {
            self.inner.values.ensure_initialized(&name, Some(value));
        }

        for name in selector_names {
            let qualified = qualify_selector(name);
            trace!(selector = %qualified, "registering placeholder selector");
            self.inner.selectors.define_placeholder(qualified);
        }

        Ok(())
    }

    /// Read the current value under `name`.
    ///
    /// Names carrying the selector prefix are computed on demand; all other
    /// names read the raw value slot. Fails with
    /// [`StoreError::NotInitialized`] for an unknown raw name and
    /// [`StoreError::UndefinedSelector`] for an unknown selector.
    pub fn get(&self, name: &str) -> Result<Value, StoreError> {
        match NameKind::of(name) {
            NameKind::Selector => self.inner.selectors.compute(name, &self.inner.values),
            NameKind::Value => self.inner.values.get(name),
        }
    }

    /// Write `value` under the raw name `name` and propagate the change.
    ///
    /// A never-seen name is initialized first, so updating a fresh name
    /// always succeeds. If the comparator reports no semantic change the
    /// call is a complete no-op - no mutation, no notification. Otherwise
    /// direct listeners fire with `(new, Some(previous))`, then each
    /// dependent selector is recomputed and its listeners fire with the
    /// recomputed value, all before this call returns.
    pub fn update(&self, name: &str, value: Value) -> Result<(), StoreError> {
        self.inner.values.ensure_initialized(name, None);

        let current = self.inner.values.get(name)?;
        if !has_changed(&current, &value) {
            trace!(name, "update ignored: value unchanged");
            return Ok(());
        }

        let previous = self.inner.values.replace(name, value.clone())?;
        debug!(name, "value updated");

        self.inner
            .value_listeners
            .notify(name, &value, Some(&previous));

        for selector in self.inner.values.dependents_of(name) {
            let computed = self.inner.selectors.compute(&selector, &self.inner.values)?;
            trace!(selector = %selector, "dependent selector recomputed");
            self.inner.selector_listeners.notify(&selector, &computed, None);
        }

        Ok(())
    }

    /// Define (or redefine) a selector.
    ///
    /// `name` may be bare or qualified; `deps` accepts a single value name
    /// or a sequence. Every dependency must already be a known value -
    /// forward references fail with [`StoreError::InvalidArgument`]. A
    /// prior definition under the same name is replaced wholesale.
    ///
    /// # Example
    ///
    /// ```
    /// use lumen_store::DataStore;
    /// use serde_json::json;
    ///
    /// let store = DataStore::new();
    /// store.update("first", json!("Ada")).unwrap();
    /// store.update("last", json!("Lovelace")).unwrap();
    ///
    /// store.define_selector("full_name", ["first", "last"], |inputs| {
    ///     json!(format!(
    ///         "{} {}",
    ///         inputs[0].as_str().unwrap_or(""),
    ///         inputs[1].as_str().unwrap_or("")
    ///     ))
    /// }).unwrap();
    ///
    /// assert_eq!(store.get("selector::full_name").unwrap(), json!("Ada Lovelace"));
    /// ```
    pub fn define_selector(
        &self,
        name: &str,
        deps: impl Into<SelectorDeps>,
        transform: impl Fn(&[Value]) -> Value + 'static,
    ) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "selector name must not be empty".to_string(),
            ));
        }

        let qualified = qualify_selector(name);
        let deps = deps.into().into_names();

        for dep in &deps {
            if !self.inner.values.contains(dep) {
                return Err(StoreError::InvalidArgument(format!(
                    "selector dependency '{dep}' is not a known value"
                )));
            }
        }

        // Record the dependency edges. Edges registered by a previous
        // definition of this selector are left in place.
        for dep in &deps {
            self.inner.values.register_dependent(dep, &qualified);
        }

        debug!(selector = %qualified, deps = deps.len(), "selector defined");
        self.inner.selectors.define(qualified, deps, Rc::new(transform));

        Ok(())
    }

    /// Subscribe to changes of the raw value `name`.
    ///
    /// The name is initialized (to `Null`) if it was never seen. On each
    /// qualifying update the listener receives `(new, Some(previous))`.
    /// With `execute_immediately`, the listener is additionally invoked
    /// once, synchronously before this call returns, with the current value
    /// and `None` for the previous value.
    pub fn subscribe_to_value(
        &self,
        name: &str,
        on_change: impl Fn(&Value, Option<&Value>) + 'static,
        execute_immediately: bool,
    ) -> Result<SubscriptionHandle, StoreError> {
        self.inner.values.ensure_initialized(name, None);

        if execute_immediately {
            let current = self.inner.values.get(name)?;
            on_change(&current, None);
        }

        Ok(self
            .inner
            .value_listeners
            .list_for(name)
            .push(Rc::new(on_change)))
    }

    /// Subscribe to recomputations of the selector `name` (bare or
    /// qualified).
    ///
    /// The selector must already be defined. The listener receives the
    /// recomputed value whenever any of the selector's registered
    /// dependencies changes. With `execute_immediately`, the listener is
    /// invoked once with the current computed value before this call
    /// returns.
    pub fn subscribe_to_selector(
        &self,
        name: &str,
        on_change: impl Fn(&Value) + 'static,
        execute_immediately: bool,
    ) -> Result<SubscriptionHandle, StoreError> {
        let qualified = qualify_selector(name);
        if !self.inner.selectors.contains(&qualified) {
            return Err(StoreError::UndefinedSelector(qualified));
        }

        if execute_immediately {
            let current = self.inner.selectors.compute(&qualified, &self.inner.values)?;
            on_change(&current);
        }

        Ok(self
            .inner
            .selector_listeners
            .list_for(&qualified)
            .push(Rc::new(move |value, _previous| on_change(value))))
    }
}

// =============================================================================
// TESTS
// =============================================================================
