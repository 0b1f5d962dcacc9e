// ============================================================================
// lumen-store - Errors
// Failure signals surfaced by store operations
// ============================================================================
//
// Every failure is synchronous and propagates to the immediate caller.
// Nothing is retried internally and nothing is swallowed - the store has no
// I/O and no async boundary across which an error could be lost.
// ============================================================================

use thiserror::Error;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A raw value was read before it was ever initialized.
    ///
    /// A name created with an explicit `null` is initialized; this error is
    /// reserved for names the store has never seen.
    #[error("value '{0}' has never been initialized")]
    NotInitialized(String),

    /// A selector was read or subscribed to before it was defined.
    #[error("selector '{0}' is not defined")]
    UndefinedSelector(String),

    /// A malformed argument was passed to a store operation, such as a
    /// selector dependency that names no known value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// TESTS
// =============================================================================
