use std::mem;

use http::uri::Authority;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use percent_encoding::percent_decode_str;

use crate::Result;

/// Signing context for request.
///
/// An immutable view of the parts of an outbound request that participate in
/// signing. Headers are moved out of the request while signing and moved back
/// by [`SigningRequest::apply`]; the URI is never rewritten.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority, absent for origin-form URIs.
    pub authority: Option<Authority>,
    /// Percent decoded HTTP path without query, absent when the URI carries
    /// no path.
    pub path: Option<String>,
    /// Percent decoded query pairs in the order they appear in the URI.
    ///
    /// Kept as raw bytes since an escape like `%FF` need not be UTF-8.
    /// A flag-only parameter (`?verbose`) has a `None` value.
    pub query: Vec<(Vec<u8>, Option<Vec<u8>>)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let paq = parts.uri.path_and_query();

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority: parts.uri.authority().cloned(),
            path: paq.map(|v| Self::decode_path(v.path())).transpose()?,
            query: paq
                .and_then(|v| v.query())
                .map(Self::parse_query)
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        Ok(())
    }

    /// Percent decode a URI path.
    ///
    /// Fails if the decoded bytes are not valid UTF-8.
    pub fn decode_path(path: &str) -> Result<String> {
        Ok(percent_decode_str(path).decode_utf8()?.into_owned())
    }

    /// Split a raw query string into percent decoded pairs.
    ///
    /// `+` is kept as is, empty segments (`a=1&&b=2`) are skipped.
    pub fn parse_query(query: &str) -> Vec<(Vec<u8>, Option<Vec<u8>>)> {
        query
            .split('&')
            .filter(|v| !v.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (percent_decode(k), Some(percent_decode(v))),
                None => (percent_decode(pair), None),
            })
            .collect()
    }

    /// The target hostname without port, taken from the URI authority.
    pub fn host(&self) -> Option<&str> {
        self.authority.as_ref().map(|v| v.host())
    }

    /// Get header value by name as str.
    ///
    /// Header values are opaque bytes on the wire; this fails if they are
    /// not valid UTF-8 instead of silently dropping them.
    pub fn header_value_to_str(value: &HeaderValue) -> Result<&str> {
        Ok(std::str::from_utf8(value.as_bytes())?)
    }

    /// Trim leading and trailing spaces and tabs from a header value.
    pub fn header_value_trim(v: &str) -> &str {
        v.trim_matches(|c| c == ' ' || c == '\t')
    }

    /// Get (name, trimmed value) pairs of headers whose name passes the filter.
    ///
    /// Header names are always lower-cased by `http`. A header sent several
    /// times yields one pair whose trimmed values are joined by `,` in the
    /// order they were added.
    pub fn header_to_vec_with_filter(
        &self,
        filter: impl Fn(&str) -> bool,
    ) -> Result<Vec<(String, String)>> {
        self.headers
            .keys()
            .filter(|k| filter(k.as_str()))
            .map(|k| {
                let values = self
                    .headers
                    .get_all(k)
                    .iter()
                    .map(|v| Ok(Self::header_value_trim(Self::header_value_to_str(v)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok((k.as_str().to_lowercase(), values.join(",")))
            })
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

fn percent_decode(s: &str) -> Vec<u8> {
    percent_decode_str(s).collect()
}
