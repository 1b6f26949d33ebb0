//! Signer for the ebg v1 HMAC request signing scheme.
//!
//! Every outbound request gets a timestamp header, a `host` header and a
//! `v1:` HMAC-SHA256 signature computed over a canonical form of the
//! request (method, path, sorted query, selected headers and body hash).
//!
//! ## Example
//!
//! ```no_run
//! use ebgsign_core::{Context, Result};
//! use ebgsign_hmac_v1::Config;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let signer = ebgsign_hmac_v1::signer(&ctx, Config::new().with_secret_key("1234567")).await?;
//!
//! let req = http::Request::get("https://api.pixelbin.io/service/private/misc/v1.0/skus?pageNo=1&pageSize=10")
//!     .body(Vec::new())
//!     .unwrap();
//! let req = signer.sign_request(req)?;
//! assert!(req.headers().contains_key("x-ebg-signature"));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

use std::sync::Arc;

use ebgsign_core::{Context, Result, Signer};

mod constants;
pub use constants::{
    DEFAULT_HEADER_PREFIX, EBG_HEADER_PREFIX, EBG_SECRET_KEY, PARAM_HEADER_SUFFIX,
    SIGNATURE_HEADER_SUFFIX, SIGNATURE_VERSION,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod header;
pub use header::HeaderMatcher;

pub mod canonical;
pub use canonical::CanonicalRequest;

mod signature;
pub use signature::sign;

mod sign_request;
pub use sign_request::{RequestSigner, SignedResult};

mod provide_credential;
pub use provide_credential::*;

/// Build a signer from config, filling unset fields from the environment.
///
/// This is the one place a client is configured: a missing or empty secret
/// key, or an invalid header prefix, fails here with
/// [`ebgsign_core::ErrorKind::ConfigInvalid`].
pub async fn signer(ctx: &Context, config: Config) -> Result<Signer<Credential>> {
    let config = config.from_env(ctx);
    let builder = RequestSigner::from_config(&config)?;

    Signer::new(ctx, ConfigCredentialProvider::new(Arc::new(config)), builder).await
}
