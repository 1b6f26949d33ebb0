use crate::{Context, Error, ProvideCredential, Result, RetryPolicy, SignRequest, SigningCredential};
use log::debug;
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// A signer is built once per client and shared read-only afterwards: the
/// credential is loaded and validated at construction, so a missing secret
/// fails the client build instead of a request.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    credential: Arc<C>,
    builder: Arc<dyn SignRequest<Credential = C>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer, loading the credential from `loader`.
    pub async fn new(
        ctx: &Context,
        loader: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Result<Self> {
        let credential = loader
            .provide_credential(ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("no credential found for signer"))?;

        Self::with_credential(credential, builder)
    }

    /// Create a new signer with a credential that is already loaded.
    pub fn with_credential(
        credential: C,
        builder: impl SignRequest<Credential = C>,
    ) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::config_invalid(format!(
                "credential {credential:?} is not valid for signing"
            )));
        }
        debug!("signer built with credential: {credential:?}");

        Ok(Self {
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        })
    }

    /// Sign request parts in place.
    ///
    /// `body` must be the exact payload that will be sent. On error the
    /// request must not be dispatched.
    pub fn sign(&self, req: &mut http::request::Parts, body: Option<&[u8]>) -> Result<()> {
        self.builder.sign_request(req, body, &self.credential)
    }

    /// Sign a whole request, using its body as payload.
    pub fn sign_request<B: AsRef<[u8]>>(&self, req: http::Request<B>) -> Result<http::Request<B>> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, Some(body.as_ref()))?;
        Ok(http::Request::from_parts(parts, body))
    }

    /// Retry policy for requests signed by this signer.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.builder.retry_policy()
    }
}
