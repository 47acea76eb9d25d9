//! Cross-cutting form validation rules
//!
//! Field-level validation happens at the handler boundary, before any store
//! call. [`FieldErrors`] collects per-field messages for re-rendering a form
//! with 422; the first error recorded for a field wins.

use std::collections::BTreeMap;

/// Per-field validation errors, ordered by field name for stable rendering
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field; keeps the first one if called twice
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Record an error unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// True when the value contains at least one non-whitespace character
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value holds at least `min` Unicode code points
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// True when the value holds at most `max` Unicode code points
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True when the value is one of the permitted options
pub fn permitted<T: PartialEq>(value: &T, options: &[T]) -> bool {
    options.contains(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("a"));
        assert!(not_blank("  a  "));
        assert!(!not_blank(""));
        assert!(!not_blank("   "));
        assert!(!not_blank("\t\n"));
    }

    #[test]
    fn test_char_counts_are_unicode_aware() {
        // 4 code points, 12 bytes
        assert!(min_chars("日本語だ", 4));
        assert!(!min_chars("日本語だ", 5));
        assert!(max_chars("日本語だ", 4));
        assert!(!max_chars("日本語だ", 3));
    }

    #[test]
    fn test_permitted() {
        assert!(permitted(&7, &[1, 7, 365]));
        assert!(!permitted(&2, &[1, 7, 365]));
    }

    #[test]
    fn test_field_errors_first_wins() {
        let mut errors = FieldErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
    }

    #[test]
    fn test_field_errors_check() {
        let mut errors = FieldErrors::new();
        errors.check(true, "name", "unused");
        errors.check(false, "name", "This field cannot be blank");
        assert!(!errors.is_empty());
        assert_eq!(errors.get("name"), Some("This field cannot be blank"));
        assert_eq!(errors.get("email"), None);
    }
}
