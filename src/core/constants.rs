// ============================================================================
// lumen-store - Constants
// Reserved name markers for the store's naming scheme
// ============================================================================

/// Reserved prefix that distinguishes selector names from raw value names.
///
/// Public APIs that take a selector name accept the bare form and qualify it
/// automatically, so `"double"` and `"selector::double"` refer to the same
/// selector.
pub const SELECTOR_PREFIX: &str = "selector::";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stable() {
        // Stored state and subscriptions key off this string; changing it
        // would orphan every qualified name.
        assert_eq!(SELECTOR_PREFIX, "selector::");
    }
}
