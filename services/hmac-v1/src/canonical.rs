//! Canonical request construction.

use std::fmt::{self, Display, Write};

use ebgsign_core::hash::hex_sha256;
use ebgsign_core::{Result, SigningRequest};
use percent_encoding::percent_encode;

use crate::constants::QUERY_ENCODE_SET;
use crate::header::HeaderMatcher;

/// CanonicalRequest is the deterministic form of a request that gets signed.
///
/// ## Format
///
/// ```text
/// Method + "\n" +
/// Path + "\n" +
/// SortedQueryString + "\n" +
/// CanonicalHeaders + "\n" +
/// "\n" +
/// SignedHeaders + "\n" +
/// ContentHash
/// ```
///
/// Absent fields render as empty lines so every field keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method, as sent.
    pub method: String,
    /// URL path, empty if the request has none.
    pub path: String,
    /// Sorted and percent encoded `name=value` pairs joined by `&`.
    pub query: String,
    /// Sorted `name:value` lines of the signed headers.
    pub headers: String,
    /// Sorted names of the signed headers joined by `;`.
    pub signed_headers: String,
    /// Hex encoded SHA256 of the body.
    pub content_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical form of `req`.
    ///
    /// Only headers accepted by `matcher` take part. Fails if one of them
    /// has a value that is not valid UTF-8.
    pub fn build(
        req: &SigningRequest,
        body: Option<&[u8]>,
        matcher: &HeaderMatcher,
    ) -> Result<Self> {
        let headers = req.header_to_vec_with_filter(|k| matcher.matches(k))?;

        Ok(Self {
            method: req.method.as_str().to_string(),
            path: req.path.clone().unwrap_or_default(),
            query: canonical_query_string(&req.query),
            signed_headers: signed_headers(&headers),
            headers: SigningRequest::header_to_string(headers, ":", "\n"),
            content_hash: content_hash(body),
        })
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.headers)?;
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.content_hash)
    }
}

/// Build the canonical request string of `req`.
pub fn canonical_request_string(
    req: &SigningRequest,
    body: Option<&[u8]>,
    matcher: &HeaderMatcher,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut s = String::with_capacity(256);
    write!(s, "{}", CanonicalRequest::build(req, body, matcher)?)?;
    Ok(s)
}

/// Hex encoded SHA256 of the body, a missing body hashes as empty bytes.
pub fn content_hash(body: Option<&[u8]>) -> String {
    hex_sha256(body.unwrap_or_default())
}

/// Sort query pairs by name then value and join them as `name=value&...`.
///
/// Pairs are compared and encoded as raw bytes, so the result carries
/// exactly the bytes that are on the wire. A flag-only parameter renders as
/// `name=`.
pub fn canonical_query_string(query: &[(Vec<u8>, Option<Vec<u8>>)]) -> String {
    let mut pairs: Vec<(&[u8], &[u8])> = query
        .iter()
        .map(|(k, v)| (k.as_slice(), v.as_deref().unwrap_or_default()))
        .collect();
    pairs.sort();

    pairs
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                percent_encode(k, &QUERY_ENCODE_SET),
                percent_encode(v, &QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn signed_headers(headers: &[(String, String)]) -> String {
    let mut names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
    names.sort_unstable();
    names.join(";")
}
