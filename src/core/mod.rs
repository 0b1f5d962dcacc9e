// ============================================================================
// lumen-store - Core Module
// Constants, errors, shared types, and the default-store context
// ============================================================================

pub mod constants;
pub mod context;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use constants::SELECTOR_PREFIX;
pub use context::default_store;
pub use errors::StoreError;
pub use types::{qualify_selector, ListenerFn, NameKind, SelectorDeps, TransformFn};
