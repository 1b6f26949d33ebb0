use http::header::HOST;
use http::HeaderName;

use crate::constants::*;
use ebgsign_core::{Error, Result};

/// HeaderMatcher decides which headers participate in signing.
///
/// A header is signed when its name starts with the configured prefix or is
/// exactly `host`, both compared case-insensitively. The prefix is validated
/// and lower-cased once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatcher {
    prefix: String,
}

impl Default for HeaderMatcher {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_HEADER_PREFIX.to_string(),
        }
    }
}

impl HeaderMatcher {
    /// Create a matcher for the given header prefix.
    ///
    /// Fails if the prefix is empty or cannot start a header name.
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::config_invalid("header prefix must not be empty"));
        }
        let prefix = prefix.to_ascii_lowercase();
        HeaderName::from_bytes(format!("{prefix}{PARAM_HEADER_SUFFIX}").as_bytes()).map_err(
            |e| Error::config_invalid(format!("invalid header prefix: {prefix}")).with_source(e),
        )?;

        Ok(Self { prefix })
    }

    /// The lower-cased prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the full header name for a suffix, e.g. `x-ebg-` + `param`.
    pub fn header_name(&self, suffix: &str) -> Result<HeaderName> {
        Ok(HeaderName::from_bytes(
            format!("{}{suffix}", self.prefix).as_bytes(),
        )?)
    }

    /// Check whether a header with this name participates in signing.
    pub fn matches(&self, name: &str) -> bool {
        if name.eq_ignore_ascii_case(HOST.as_str()) {
            return true;
        }

        name.get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix))
    }
}
