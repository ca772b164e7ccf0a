//! Pure predicates over form input values.
//!
//! These are UX conveniences only. The server re-validates everything it
//! receives.

use lazy_static::lazy_static;
use regex::Regex;

/// Minimum trimmed length of a typed legal name on the waiver
pub const MIN_LEGAL_NAME_LEN: usize = 3;
/// Minimum trimmed length of the client name on a standalone waiver
pub const MIN_CLIENT_NAME_LEN: usize = 2;
/// Minimum trimmed length of a contact form message
pub const MIN_CONTACT_MESSAGE_LEN: usize = 10;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn is_valid_legal_name(value: &str) -> bool {
    trimmed_len(value) >= MIN_LEGAL_NAME_LEN
}

pub fn is_valid_client_name(value: &str) -> bool {
    trimmed_len(value) >= MIN_CLIENT_NAME_LEN
}

/// Loose email check used by the waiver gate: the value only has to contain `@`.
pub fn has_email_marker(value: &str) -> bool {
    value.contains('@')
}

/// Strict email shape used by the contact and generic forms.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Contact form input as typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Returns the user-facing errors, empty when the form may be submitted.
    pub fn validate(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push("Please enter a valid email address");
        }
        if trimmed_len(&self.message) < MIN_CONTACT_MESSAGE_LEN {
            errors.push("Message must be at least 10 characters long");
        }
        errors
    }
}
