//! Checks for the details entered during onboarding.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Whether `text` is usable as a first name.
///
/// A valid name is non-empty after trimming and only contains letters and
/// whitespace, e.g. "Mary Ann". Letters from any script are accepted.
pub fn is_valid_name(text: &str) -> bool {
    let trimmed = text.trim();

    !trimmed.is_empty() && NAME_RE.is_match(trimmed)
}

/// Whether `text` looks like an email address: `local@domain.tld` with no
/// whitespace and exactly one `@`.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// The onboarding form as sent by the browser.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OnboardingForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
}

impl OnboardingForm {
    /// Whether both fields are valid, i.e. the user may continue.
    pub fn is_valid(&self) -> bool {
        is_valid_name(&self.first_name) && is_valid_email(&self.email)
    }
}

#[cfg(test)]
mod name_validation_tests {
    use super::is_valid_name;

    #[test]
    fn accepts_plain_name() {
        assert!(is_valid_name("John"));
    }

    #[test]
    fn accepts_name_with_space() {
        assert!(is_valid_name("Mary Ann"));
    }

    #[test]
    fn accepts_non_ascii_letters() {
        assert!(is_valid_name("Zoë"));
        assert!(is_valid_name("José"));
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert!(is_valid_name("  John "));
    }

    #[test]
    fn rejects_digits() {
        assert!(!is_valid_name("John3"));
    }

    #[test]
    fn rejects_punctuation() {
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name("Jo-Ann"));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("  "));
    }
}
