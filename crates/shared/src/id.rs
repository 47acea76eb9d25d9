//! Common ID Types
//!
//! Type-safe wrappers over the numeric ids the stores assign (BIGSERIAL).
//! The marker parameter keeps a `UserId` from being passed where a
//! `SnippetId` is expected.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::from_i64(1);
/// assert_eq!(id.as_i64(), 1);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a store-assigned id
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying numeric id
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: deriving would put bounds on T, which is only a marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Snippet IDs
    pub struct Snippet;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type SnippetId = Id<markers::Snippet>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_id: UserId = Id::from_i64(1);
        let snippet_id: SnippetId = Id::from_i64(1);

        // These are different types, cannot be mixed
        let _u: i64 = user_id.into();
        let _s: i64 = snippet_id.into();
    }

    #[test]
    fn test_id_roundtrip() {
        let id: UserId = Id::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id, UserId::from(42));
        assert_eq!(id.to_string(), "42");
    }
}
