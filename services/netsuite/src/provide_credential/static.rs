use crate::Credential;
use async_trait::async_trait;
use nsfetch_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider hands out a credential that is already loaded.
///
/// The binary resolves credentials once at startup and passes them to the
/// signer through this provider.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(credential: Credential) -> Self {
        Self::new(credential)
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
