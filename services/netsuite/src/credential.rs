use std::fmt::{Debug, Formatter};

use nsfetch_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for NetSuite token based authentication.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Consumer key of the integration record.
    pub consumer_key: String,
    /// Consumer secret of the integration record.
    pub consumer_secret: String,
    /// Token id of the access token.
    pub token: String,
    /// Token secret of the access token.
    pub token_secret: String,
    /// Account id, e.g. `1234567` or `1234567_SB1` for a sandbox.
    pub realm: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
            realm: realm.into(),
        }
    }

    /// Names of the fields that are empty, in config file spelling.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("consumerKey", &self.consumer_key),
            ("consumerSecret", &self.consumer_secret),
            ("token", &self.token),
            ("tokenSecret", &self.token_secret),
            ("realm", &self.realm),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    /// Check that every field needed for signing is present.
    pub fn check(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(Error::credential_invalid(format!(
            "credential is missing {}",
            missing.join(", ")
        )))
    }

    /// Host label of the account: realm lowercased with `_` replaced by `-`.
    pub fn account_host(&self) -> String {
        self.realm.trim().to_lowercase().replace('_', "-")
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &Redact::from(&self.token))
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("realm", &self.realm)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
