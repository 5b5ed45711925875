//! Form input handling: sanitization and accumulating validation.
//!
//! Raw form structs hold exactly what the browser posted. `sanitized()`
//! scrubs markup-significant characters before anything enters form
//! state, and `validate()` checks every rule, collecting all failures
//! instead of stopping at the first, so the re-rendered form can show an
//! inline message under each offending field.

pub mod onboarding;
pub mod waitlist;

pub use onboarding::{AddressForm, PreferencesForm};
pub use waitlist::WaitlistForm;

/// Accumulated per-field validation errors.
///
/// Insertion order is preserved; one message per field (the first rule
/// that fails for a field wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record an error for a field. A second error for the same field is
    /// ignored so the user sees one message at a time.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if !self.has(field) {
            self.errors.push((field, message.into()));
        }
    }

    /// Whether the field has an error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    /// The message for a field, or an empty string.
    ///
    /// Returning `&str` keeps template usage to a simple
    /// `{% if errors.has(...) %}` / `{{ errors.msg(...) }}` pair.
    #[must_use]
    pub fn msg(&self, field: &str) -> &str {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map_or("", |(_, m)| m.as_str())
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Strip markup-significant characters from raw input before it enters
/// form state, so a value echoed back into a later display context cannot
/// smuggle tags.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// Sanitize then trim; empty becomes `None`.
#[must_use]
pub fn sanitize_optional(input: &str) -> Option<String> {
    let cleaned = sanitize(input);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(sanitize("<script>alert(1)</script>"), "scriptalert(1)/script");
        assert_eq!(sanitize("plain text"), "plain text");
        assert_eq!(sanitize("a < b > c"), "a  b  c");
    }

    #[test]
    fn test_sanitize_optional() {
        assert_eq!(sanitize_optional("  "), None);
        assert_eq!(sanitize_optional("<>"), None);
        assert_eq!(sanitize_optional(" note "), Some("note".to_owned()));
    }

    #[test]
    fn test_field_errors_accumulate_in_order() {
        let mut errors = FieldErrors::new();
        errors.push("email", "bad email");
        errors.push("name", "bad name");

        assert_eq!(errors.len(), 2);
        assert!(errors.has("email"));
        assert!(errors.has("name"));
        assert_eq!(errors.msg("email"), "bad email");
        assert_eq!(errors.msg("missing"), "");
    }

    #[test]
    fn test_field_errors_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.push("email", "first");
        errors.push("email", "second");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.msg("email"), "first");
    }
}
