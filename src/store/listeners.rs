// ============================================================================
// lumen-store - Listener Registry
// Ordered subscription lists with tombstone-based removal
// ============================================================================
//
// Each watched name owns one ordered list of listener entries. Removal marks
// the entry as a tombstone and immediately compacts that single list, never
// the whole registry. Notification snapshots the list up front, so a removal
// issued from inside a callback cannot skip or double-invoke a sibling in
// the same pass - and entries already captured for the pass still fire.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::core::types::ListenerFn;

// =============================================================================
// LISTENER ENTRY
// =============================================================================

/// A single registered listener.
struct ListenerEntry {
    /// Stable identifier within the owning list.
    id: u64,

    /// The callback. Shared and immutably callable, so a notification pass
    /// can invoke it through a snapshot reference even while a nested pass
    /// is running the same entry.
    on_change: ListenerFn,

    /// Tombstone flag set by [`SubscriptionHandle::remove`].
    removed: Cell<bool>,
}

type EntrySlot = Rc<RefCell<Vec<Rc<ListenerEntry>>>>;

// =============================================================================
// LISTENER LIST
// =============================================================================

/// The ordered listener list for one watched name.
///
/// Cloning a `ListenerList` creates a new handle to the **same** entries.
#[derive(Clone, Default)]
pub struct ListenerList {
    entries: EntrySlot,
    next_id: Rc<Cell<u64>>,
}

impl ListenerList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener, returning its removal handle.
    pub fn push(&self, on_change: ListenerFn) -> SubscriptionHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.entries.borrow_mut().push(Rc::new(ListenerEntry {
            id,
            on_change,
            removed: Cell::new(false),
        }));

        SubscriptionHandle {
            entries: Rc::downgrade(&self.entries),
            id,
        }
    }

    /// Invoke every listener registered at the start of this pass, in
    /// registration order.
    ///
    /// The list is snapshotted before the first invocation: listeners added
    /// by a callback fire on the next pass, and a handle removed by a
    /// callback still fires if it was captured for this pass. No borrow of
    /// the list or of any callback is held while callbacks run, so callbacks
    /// may freely subscribe, remove, or re-enter the store - including an
    /// update to the name this very pass is notifying, which invokes the
    /// running listener recursively.
    pub fn notify(&self, value: &Value, previous: Option<&Value>) {
        let snapshot: Vec<Rc<ListenerEntry>> = self.entries.borrow().clone();
        for entry in snapshot {
            (entry.on_change)(value, previous);
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

// =============================================================================
// SUBSCRIPTION HANDLE
// =============================================================================

/// Removal token for a registered listener.
///
/// Holds a stable identifier into the owning list rather than captured
/// mutable state. Removal is explicit: dropping the handle does **not**
/// unsubscribe.
pub struct SubscriptionHandle {
    entries: Weak<RefCell<Vec<Rc<ListenerEntry>>>>,
    id: u64,
}

impl SubscriptionHandle {
    /// Remove the listener this handle was issued for.
    ///
    /// Marks the entry as a tombstone, then rewrites the owning list to
    /// drop all tombstoned entries. Takes effect for any notification
    /// triggered after this call returns; a pass already in flight fires
    /// its captured entries regardless. Idempotent, and a no-op once the
    /// owning store is gone.
    pub fn remove(&self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };

        for entry in entries.borrow().iter() {
            if entry.id == self.id {
                entry.removed.set(true);
            }
        }

        entries.borrow_mut().retain(|entry| !entry.removed.get());
    }
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

/// Per-name listener lists for one kind of subscription target.
///
/// The facade keeps two of these: one keyed by raw value names, one keyed by
/// qualified selector names.
#[derive(Default)]
pub struct ListenerRegistry {
    lists: RefCell<HashMap<String, ListenerList>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The listener list for `name`, created on first use.
    pub fn list_for(&self, name: &str) -> ListenerList {
        self.lists
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    /// Notify every listener registered for `name`.
    pub fn notify(&self, name: &str, value: &Value, previous: Option<&Value>) {
        // Release the map borrow before firing so callbacks can subscribe
        let list = self.lists.borrow().get(name).cloned();
        if let Some(list) = list {
            list.notify(value, previous);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
