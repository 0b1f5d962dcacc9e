// ============================================================================
// lumen-store - Type Definitions
// Name classification and shared function types for the store
// ============================================================================

use std::rc::Rc;

use serde_json::Value;

use super::constants::SELECTOR_PREFIX;

// =============================================================================
// FUNCTION TYPES
// =============================================================================

/// A pure selector transformer.
///
/// Receives the current values of the selector's dependencies, positionally
/// in declared order, and returns the derived value. Must not mutate store
/// state.
pub type TransformFn = Rc<dyn Fn(&[Value]) -> Value>;

/// An internal change listener.
///
/// Called with the new value and, for raw-value updates, the previous value.
/// Selector notifications and immediate invocations pass `None` for the
/// previous value.
///
/// Shared and immutably callable so a notification pass can re-enter the
/// same listener recursively; listeners keep their own state via interior
/// mutability in their captures.
pub type ListenerFn = Rc<dyn Fn(&Value, Option<&Value>)>;

// =============================================================================
// NAME KIND
// =============================================================================

/// Classification of a store name, resolved once at the public boundary.
///
/// Replaces string-sniffing at every call site: the prefix is inspected a
/// single time and the rest of the store dispatches on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A raw mutable value slot.
    Value,
    /// A derived selector.
    Selector,
}

impl NameKind {
    /// Classify a name by its reserved prefix.
    ///
    /// # Example
    /// ```
    /// use lumen_store::NameKind;
    ///
    /// assert_eq!(NameKind::of("uuid"), NameKind::Value);
    /// assert_eq!(NameKind::of("selector::formatted"), NameKind::Selector);
    /// ```
    pub fn of(name: &str) -> Self {
        if name.starts_with(SELECTOR_PREFIX) {
            NameKind::Selector
        } else {
            NameKind::Value
        }
    }
}

/// Qualify a selector name with the reserved prefix, if it is not already.
///
/// # Example
/// ```
/// use lumen_store::qualify_selector;
///
/// assert_eq!(qualify_selector("double"), "selector::double");
/// assert_eq!(qualify_selector("selector::double"), "selector::double");
/// ```
pub fn qualify_selector(name: &str) -> String {
    if name.starts_with(SELECTOR_PREFIX) {
        name.to_string()
    } else {
        format!("{SELECTOR_PREFIX}{name}")
    }
}

// =============================================================================
// SELECTOR DEPENDENCIES
// =============================================================================

/// Dependency list for a selector definition.
///
/// Callers may pass a single value name or a sequence of names; both
/// normalize to an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorDeps {
    /// A single dependency name.
    One(String),
    /// An ordered sequence of dependency names.
    Many(Vec<String>),
}

impl SelectorDeps {
    /// Normalize to an ordered list of names.
    pub fn into_names(self) -> Vec<String> {
        match self {
            SelectorDeps::One(name) => vec![name],
            SelectorDeps::Many(names) => names,
        }
    }
}

impl From<&str> for SelectorDeps {
    fn from(name: &str) -> Self {
        SelectorDeps::One(name.to_string())
    }
}

impl From<String> for SelectorDeps {
    fn from(name: String) -> Self {
        SelectorDeps::One(name)
    }
}

impl From<Vec<String>> for SelectorDeps {
    fn from(names: Vec<String>) -> Self {
        SelectorDeps::Many(names)
    }
}

impl From<Vec<&str>> for SelectorDeps {
    fn from(names: Vec<&str>) -> Self {
        SelectorDeps::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SelectorDeps {
    fn from(names: &[&str]) -> Self {
        SelectorDeps::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectorDeps {
    fn from(names: [&str; N]) -> Self {
        SelectorDeps::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
