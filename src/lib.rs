// ============================================================================
// lumen-store - An Observable Key-Value Store for Rust
// ============================================================================
//
// Named mutable values, pure derived selectors over them, and synchronous
// change notification with diffing to suppress redundant fan-out. Single
// threaded and fully in-memory; selector dependencies are one level deep
// (selectors read raw values only, never other selectors).
// ============================================================================

pub mod bindings;
pub mod core;
pub mod store;

// Re-export core items at crate root for ergonomic access
pub use crate::core::constants::SELECTOR_PREFIX;
pub use crate::core::context::default_store;
pub use crate::core::errors::StoreError;
pub use crate::core::types::{qualify_selector, NameKind, SelectorDeps, TransformFn};

// Re-export the store surface at crate root
pub use crate::store::comparator::has_changed;
pub use crate::store::facade::DataStore;
pub use crate::store::listeners::SubscriptionHandle;

// Re-export the binding adapter seam
pub use crate::bindings::{bind_store, StateBackend, StoreBinding};

// =============================================================================
// TESTS
// =============================================================================
