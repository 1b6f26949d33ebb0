//! Utility functions and types.

use std::fmt;

/// Redact hides a secret when it is formatted.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 bytes is fully hidden as `***`.
/// - Longer input keeps its first and last three characters so different
///   secrets can still be told apart in logs.
#[derive(Clone, Copy)]
pub struct Redact<'a>(&'a str);

impl<'a> Redact<'a> {
    /// Wrap a secret for formatting.
    pub fn new(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        if s.is_empty() {
            return f.write_str("EMPTY");
        }
        // Slicing on char boundaries only.
        match (s.get(..3), s.get(s.len().saturating_sub(3)..)) {
            (Some(head), Some(tail)) if s.len() >= 12 => write!(f, "{head}***{tail}"),
            _ => f.write_str("***"),
        }
    }
}
