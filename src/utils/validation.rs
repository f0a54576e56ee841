use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld, no whitespace and exactly one '@'.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Shape check only; not wired to a form yet.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
