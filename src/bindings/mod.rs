// ============================================================================
// lumen-store - Binding Adapters
// Glue from store subscriptions into a host UI framework's state primitives
// ============================================================================
//
// This is the only seam where the store touches a UI framework, and the
// framework side is abstracted behind the StateBackend trait so tests can
// inject a fake. The core never depends on any real framework.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::core::errors::StoreError;
use crate::core::types::NameKind;
use crate::store::facade::DataStore;
use crate::store::listeners::SubscriptionHandle;

// =============================================================================
// STATE BACKEND
// =============================================================================

/// The host framework's reactive-state primitive.
///
/// Implementations forward a store change into whatever the framework uses
/// for component state. Must be cheaply cloneable, since one clone is
/// captured per bound name.
pub trait StateBackend {
    /// Write the new value for `name` into the host's state.
    fn write(&self, name: &str, value: &Value);
}

// =============================================================================
// STORE BINDING
// =============================================================================

/// A prepared binding between a store and a host state backend.
///
/// Created by [`bind_store`]. Holds the initial state mapping captured at
/// bind time; [`mount`](Self::mount) subscribes one forwarding listener per
/// bound name and [`unmount`](Self::unmount) removes them all, matching a
/// host component's lifecycle hooks.
pub struct StoreBinding<S: StateBackend> {
    store: DataStore,
    backend: S,
    names: Vec<String>,
    state: HashMap<String, Value>,
    handles: RefCell<Vec<SubscriptionHandle>>,
}

/// Bind `names` from `store` to a host state backend.
///
/// Each name is read once to build the initial state mapping - raw values
/// directly, selector-prefixed names through recomputation - so every bound
/// raw value must be initialized and every bound selector defined.
///
/// # Example
///
/// ```
/// use lumen_store::{bind_store, DataStore, StateBackend};
/// use serde_json::{json, Value};
/// use std::cell::RefCell;
/// use std::collections::HashMap;
/// use std::rc::Rc;
///
/// #[derive(Clone, Default)]
/// struct FakeBackend(Rc<RefCell<HashMap<String, Value>>>);
///
/// impl StateBackend for FakeBackend {
///     fn write(&self, name: &str, value: &Value) {
///         self.0.borrow_mut().insert(name.to_string(), value.clone());
///     }
/// }
///
/// let store = DataStore::new();
/// store.update("title", json!("hello")).unwrap();
///
/// let backend = FakeBackend::default();
/// let binding = bind_store(&store, backend.clone(), &["title"]).unwrap();
/// assert_eq!(binding.state()["title"], json!("hello"));
///
/// binding.mount().unwrap();
/// store.update("title", json!("world")).unwrap();
/// assert_eq!(backend.0.borrow()["title"], json!("world"));
///
/// binding.unmount();
/// ```
pub fn bind_store<S>(
    store: &DataStore,
    backend: S,
    names: &[&str],
) -> Result<StoreBinding<S>, StoreError>
where
    S: StateBackend + Clone + 'static,
{
    let mut state = HashMap::new();
    for name in names {
        state.insert(name.to_string(), store.get(name)?);
    }

    Ok(StoreBinding {
        store: store.clone(),
        backend,
        names: names.iter().map(|n| n.to_string()).collect(),
        state,
        handles: RefCell::new(Vec::new()),
    })
}

impl<S> StoreBinding<S>
where
    S: StateBackend + Clone + 'static,
{
    /// The state mapping captured at bind time, keyed by bound name.
    pub fn state(&self) -> &HashMap<String, Value> {
        &self.state
    }

    /// Subscribe a forwarding listener for every bound name.
    ///
    /// Subsequent store changes are written into the backend. Calling
    /// `mount` while already mounted is a no-op.
    pub fn mount(&self) -> Result<(), StoreError> {
        let mut handles = self.handles.borrow_mut();
        if !handles.is_empty() {
            return Ok(());
        }

        for name in &self.names {
            let backend = self.backend.clone();
            let target = name.clone();
            let handle = match NameKind::of(name) {
                NameKind::Selector => self.store.subscribe_to_selector(
                    name,
                    move |value| backend.write(&target, value),
                    false,
                )?,
                NameKind::Value => self.store.subscribe_to_value(
                    name,
                    move |value, _previous| backend.write(&target, value),
                    false,
                )?,
            };
            handles.push(handle);
        }

        debug!(count = handles.len(), "binding mounted");
        Ok(())
    }

    /// Remove every listener subscribed by [`mount`](Self::mount).
    ///
    /// Changes after this call no longer reach the backend. Idempotent.
    pub fn unmount(&self) {
        let mut handles = self.handles.borrow_mut();
        for handle in handles.drain(..) {
            handle.remove();
        }
        debug!("binding unmounted");
    }
}

// =============================================================================
// TESTS
// =============================================================================
