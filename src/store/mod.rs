// ============================================================================
// lumen-store - Store Module
// Value registry, change comparator, selector engine, listeners, and facade
// ============================================================================

pub mod comparator;
pub mod facade;
pub mod listeners;
pub mod registry;
pub mod selectors;

// Re-export the public surface; everything else stays behind its module
pub use comparator::has_changed;
pub use facade::DataStore;
pub use listeners::SubscriptionHandle;
