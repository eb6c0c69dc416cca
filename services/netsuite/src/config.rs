use std::fmt::{Debug, Formatter};

use log::debug;
use nsfetch_core::{utils::Redact, Context, Error, Result};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::credential::Credential;

/// Config carries the credential settings as stored in the config file.
///
/// ```json
/// {
///   "consumerKey": "...",
///   "consumerSecret": "...",
///   "token": "...",
///   "tokenSecret": "...",
///   "realm": "1234567_SB1"
/// }
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NSFETCH_CONSUMER_KEY`]
    /// - config file field `consumerKey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NSFETCH_CONSUMER_SECRET`]
    /// - config file field `consumerSecret`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_secret: Option<String>,
    /// `token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NSFETCH_TOKEN`]
    /// - config file field `token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// `token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NSFETCH_TOKEN_SECRET`]
    /// - config file field `tokenSecret`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_secret: Option<String>,
    /// `realm` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NSFETCH_REALM`]
    /// - config file field `realm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, v: impl Into<String>) -> Self {
        self.consumer_key = Some(v.into());
        self
    }

    /// Set consumer_secret
    pub fn with_consumer_secret(mut self, v: impl Into<String>) -> Self {
        self.consumer_secret = Some(v.into());
        self
    }

    /// Set token
    pub fn with_token(mut self, v: impl Into<String>) -> Self {
        self.token = Some(v.into());
        self
    }

    /// Set token_secret
    pub fn with_token_secret(mut self, v: impl Into<String>) -> Self {
        self.token_secret = Some(v.into());
        self
    }

    /// Set realm
    pub fn with_realm(mut self, v: impl Into<String>) -> Self {
        self.realm = Some(v.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(NSFETCH_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NSFETCH_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NSFETCH_TOKEN) {
            self.token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NSFETCH_TOKEN_SECRET) {
            self.token_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NSFETCH_REALM) {
            self.realm.get_or_insert(v);
        }

        self
    }

    /// Load config from the JSON config file at `path`.
    ///
    /// Values already set are kept. A file that can't be read leaves the
    /// config untouched; a file that can't be parsed is an error.
    pub async fn from_file(mut self, ctx: &Context, path: &str) -> Result<Self> {
        let content = match ctx.file_read(path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("config file {path} is not readable: {err}");
                return Ok(self);
            }
        };

        let file: Config = serde_json::from_slice(&content).map_err(|e| {
            Error::config_invalid(format!("config file {path} is not valid: {e}")).with_source(e)
        })?;

        if let Some(v) = file.consumer_key {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = file.consumer_secret {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = file.token {
            self.token.get_or_insert(v);
        }
        if let Some(v) = file.token_secret {
            self.token_secret.get_or_insert(v);
        }
        if let Some(v) = file.realm {
            self.realm.get_or_insert(v);
        }

        Ok(self)
    }

    /// Path of the config file: [`NSFETCH_CONFIG_FILE`] or [`DEFAULT_CONFIG_FILE`], with `~` expanded.
    pub fn file_path(ctx: &Context) -> Option<String> {
        let path = ctx
            .env_var(NSFETCH_CONFIG_FILE)
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        ctx.expand_home_dir(&path)
    }

    /// Convert into a credential if every field is set.
    pub fn into_credential(self) -> Option<Credential> {
        Some(Credential::new(
            self.consumer_key?,
            self.consumer_secret?,
            self.token?,
            self.token_secret?,
            self.realm?,
        ))
    }

    /// Serialize as the pretty printed JSON stored in the config file.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Credential> for Config {
    fn from(cred: Credential) -> Self {
        Self {
            consumer_key: Some(cred.consumer_key),
            consumer_secret: Some(cred.consumer_secret),
            token: Some(cred.token),
            token_secret: Some(cred.token_secret),
            realm: Some(cred.realm),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &Redact::from(&self.token))
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("realm", &self.realm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsfetch_core::{ErrorKind, StaticEnv};
    use nsfetch_file_read_tokio::TokioFileRead;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_file_read(TokioFileRead).with_env(StaticEnv {
            home_dir: Some(PathBuf::from("/home/ns")),
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_file_path() {
        assert_eq!(
            Config::file_path(&ctx(&[])).as_deref(),
            Some("/home/ns/.nsfetch-config.json")
        );
        assert_eq!(
            Config::file_path(&ctx(&[(NSFETCH_CONFIG_FILE, "/etc/nsfetch.json")])).as_deref(),
            Some("/etc/nsfetch.json")
        );
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let cfg = Config::new()
            .with_realm("explicit")
            .from_env(&ctx(&[(NSFETCH_REALM, "from_env"), (NSFETCH_TOKEN, "tk")]));

        assert_eq!(cfg.realm.as_deref(), Some("explicit"));
        assert_eq!(cfg.token.as_deref(), Some("tk"));
        assert_eq!(cfg.consumer_key, None);
    }

    #[tokio::test]
    async fn test_from_file() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        f.write_all(
            br#"{
  "consumerKey": "ck",
  "consumerSecret": "cs",
  "token": "tk",
  "tokenSecret": "ts",
  "realm": "1234567_SB1"
}"#,
        )?;
        let path = f.path().to_string_lossy().to_string();

        let cfg = Config::new().from_file(&ctx(&[]), &path).await?;
        assert_eq!(
            cfg.into_credential(),
            Some(Credential::new("ck", "cs", "tk", "ts", "1234567_SB1"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_from_missing_file() -> Result<()> {
        let cfg = Config::new()
            .from_file(&ctx(&[]), "/nonexistent/.nsfetch-config.json")
            .await?;
        assert_eq!(cfg, Config::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_from_malformed_file() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        f.write_all(b"{ not json")?;
        let path = f.path().to_string_lossy().to_string();

        let err = Config::new().from_file(&ctx(&[]), &path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        Ok(())
    }

    #[test]
    fn test_to_json_pretty_uses_camel_case() -> Result<()> {
        let cfg = Config::from(Credential::new("ck", "cs", "tk", "ts", "1234567"));

        assert_eq!(
            cfg.to_json_pretty()?,
            r#"{
  "consumerKey": "ck",
  "consumerSecret": "cs",
  "token": "tk",
  "tokenSecret": "ts",
  "realm": "1234567"
}"#
        );
        Ok(())
    }
}
