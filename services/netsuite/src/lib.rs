//! NetSuite token based authentication for nsfetch.
//!
//! Provides the [`Credential`] type, the credential providers that load it from
//! the environment or the config file, the OAuth 1.0a [`RequestSigner`], and the
//! record service endpoints.
//!
//! ```no_run
//! use nsfetch_core::{Context, OsEnv, Signer};
//! use nsfetch_file_read_tokio::TokioFileRead;
//! use nsfetch_netsuite::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> nsfetch_core::Result<()> {
//! let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let mut parts = http::Request::get(
//!     "https://1234567.suitetalk.api.netsuite.com/services/rest/record/v1/customer/42",
//! )
//! .body(())?
//! .into_parts()
//! .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    DEFAULT_CONFIG_FILE, NSFETCH_CONFIG_FILE, NSFETCH_CONSUMER_KEY, NSFETCH_CONSUMER_SECRET,
    NSFETCH_REALM, NSFETCH_TOKEN, NSFETCH_TOKEN_SECRET,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod record;
pub use record::{resolve_record_type, RecordEndpoint};

mod sign_request;
pub use sign_request::{authorization_header, RequestSigner};
