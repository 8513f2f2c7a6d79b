//! Field and header rules for roster rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use rosterload::validation::is_valid_email;
//!
//! assert!(is_valid_email("a@b.c"));
//! assert!(!is_valid_email("a@b"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Headers that must be present, in reporting order.
pub const REQUIRED_HEADERS: [&str; 2] = ["name", "email"];

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check an email against the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Required headers absent from the normalized header set.
pub fn missing_required_headers<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == *required))
        .collect()
}

/// Both required fields carry a value.
pub fn has_required_fields(name: &str, email: &str) -> bool {
    !name.trim().is_empty() && !email.trim().is_empty()
}
