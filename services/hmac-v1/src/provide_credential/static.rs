use crate::Credential;
use async_trait::async_trait;
use ebgsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed secret key.
///
/// This provider is used when the secret is known at client construction
/// and needs no dynamic loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with the secret key.
    pub fn new(secret_key: &str) -> Self {
        Self {
            credential: Credential::new(secret_key),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
