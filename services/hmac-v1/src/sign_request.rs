use http::header::HOST;
use http::{HeaderName, HeaderValue};
use log::debug;

use crate::canonical::CanonicalRequest;
use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;
use crate::header::HeaderMatcher;
use crate::signature::sign;
use ebgsign_core::hash::base64_encode;
use ebgsign_core::time::{format_iso8601, now, DateTime};
use ebgsign_core::{Error, Result, RetryPolicy, SignRequest, SigningCredential, SigningRequest};

/// RequestSigner that implements the v1 HMAC request signing.
///
/// It adds three headers to every request:
///
/// - `{prefix}param`: base64 of the compact ISO 8601 signing time
/// - `{prefix}signature`: `v1:` + hex HMAC-SHA256
/// - `host`: the target hostname
#[derive(Debug, Clone)]
pub struct RequestSigner {
    matcher: HeaderMatcher,
    param_header: HeaderName,
    signature_header: HeaderName,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        let matcher = HeaderMatcher::default();
        Self {
            param_header: HeaderName::from_static("x-ebg-param"),
            signature_header: HeaderName::from_static("x-ebg-signature"),
            matcher,
            time: None,
        }
    }
}

impl RequestSigner {
    /// Create a signer for the given header prefix.
    pub fn new(header_prefix: &str) -> Result<Self> {
        let matcher = HeaderMatcher::new(header_prefix)?;

        Ok(Self {
            param_header: matcher.header_name(PARAM_HEADER_SUFFIX)?,
            signature_header: matcher.header_name(SIGNATURE_HEADER_SUFFIX)?,
            matcher,
            time: None,
        })
    }

    /// Create a signer from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.header_prefix())
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The lower-cased header prefix.
    pub fn header_prefix(&self) -> &str {
        self.matcher.prefix()
    }

    /// Name of the timestamp header.
    pub fn param_header(&self) -> &HeaderName {
        &self.param_header
    }

    /// Name of the signature header.
    pub fn signature_header(&self) -> &HeaderName {
        &self.signature_header
    }

    /// Sign `req` at `now`, mutating its headers.
    ///
    /// The raw timestamp is what gets canonicalized and HMAC'd, the wire
    /// value of `{prefix}param` is its base64 form. A signature left over
    /// from a previous attempt is dropped before canonicalization, so
    /// signing again (for a retry) always starts from a clean header set.
    ///
    /// On error no signature header is set and the request must not be sent.
    pub fn prepare(
        &self,
        req: &mut SigningRequest,
        body: Option<&[u8]>,
        cred: &Credential,
        now: DateTime,
    ) -> Result<SignedResult> {
        let timestamp = format_iso8601(now);
        let param = HeaderValue::from_str(&base64_encode(timestamp.as_bytes()))?;
        let host = req.host().map(HeaderValue::from_str).transpose()?;

        req.headers.remove(&self.signature_header);
        req.headers
            .insert(self.param_header.clone(), HeaderValue::from_str(&timestamp)?);
        if let Some(host) = host {
            req.headers.insert(HOST, host);
        }

        let signature = match self.signature_value(req, body, cred, &timestamp) {
            Ok(v) => v,
            Err(err) => {
                req.headers.remove(&self.param_header);
                return Err(err);
            }
        };

        req.headers
            .insert(self.signature_header.clone(), signature.clone());
        req.headers.insert(self.param_header.clone(), param.clone());

        Ok(SignedResult {
            timestamp,
            timestamp_header_value: param,
            signature_header_value: signature,
        })
    }

    fn signature_value(
        &self,
        req: &SigningRequest,
        body: Option<&[u8]>,
        cred: &Credential,
        timestamp: &str,
    ) -> Result<HeaderValue> {
        let creq = CanonicalRequest::build(req, body, &self.matcher)?.to_string();
        debug!("calculated canonical request: {creq:?}");

        let mut value = HeaderValue::from_str(&sign(&cred.secret_key, timestamp, &creq))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        parts: &mut http::request::Parts,
        body: Option<&[u8]>,
        credential: &Self::Credential,
    ) -> Result<()> {
        if !credential.is_valid() {
            return Err(Error::credential_invalid("secret key is empty"));
        }
        let now = self.time.unwrap_or_else(now);

        let mut ctx = SigningRequest::build(parts)?;
        let signed = self.prepare(&mut ctx, body, credential, now);
        // Headers go back to the request even on failure.
        ctx.apply(parts)?;

        let signed = signed?;
        debug!("request signed at {}", signed.timestamp);
        Ok(())
    }

    /// Signatures are bound to their timestamp: a failed dispatch is never
    /// resent with the same headers.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::DoNotRetry
    }
}

/// SignedResult carries the values attached to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedResult {
    /// Compact ISO 8601 signing time, e.g. `20240109T153000Z`.
    pub timestamp: String,
    /// Wire value of `{prefix}param`: base64 of `timestamp`.
    pub timestamp_header_value: HeaderValue,
    /// Wire value of `{prefix}signature`.
    pub signature_header_value: HeaderValue,
}
