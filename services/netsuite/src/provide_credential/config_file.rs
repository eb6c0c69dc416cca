use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use nsfetch_core::{Context, Error, ProvideCredential, Result};

/// ConfigFileCredentialProvider loads credentials from the JSON config file written by `nsfetch init`.
///
/// The path is the one given to [`ConfigFileCredentialProvider::with_path`], otherwise
/// `NSFETCH_CONFIG_FILE`, otherwise `~/.nsfetch-config.json`.
#[derive(Debug, Default, Clone)]
pub struct ConfigFileCredentialProvider {
    path: Option<String>,
}

impl ConfigFileCredentialProvider {
    /// Create a new ConfigFileCredentialProvider using the default path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config file from `path` instead.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ConfigFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(path) = self.path.clone().or_else(|| Config::file_path(ctx)) else {
            debug!("no config file path: home dir is unknown");
            return Ok(None);
        };

        let cfg = Config::new().from_file(ctx, &path).await?;
        if cfg == Config::default() {
            return Ok(None);
        }

        let cred = credential_from(cfg);
        let missing = cred.missing_fields();
        if !missing.is_empty() {
            return Err(Error::config_invalid(format!(
                "config file {path} is missing {}",
                missing.join(", ")
            )));
        }
        Ok(Some(cred))
    }
}

/// Unset fields become empty so they show up in `missing_fields`.
fn credential_from(cfg: Config) -> Credential {
    Credential::new(
        cfg.consumer_key.unwrap_or_default(),
        cfg.consumer_secret.unwrap_or_default(),
        cfg.token.unwrap_or_default(),
        cfg.token_secret.unwrap_or_default(),
        cfg.realm.unwrap_or_default(),
    )
}
