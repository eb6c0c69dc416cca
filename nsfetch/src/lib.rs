//! Signed record operations and tabular bulk import for NetSuite.
//!
//! This crate glues the pieces together: a [`Dispatcher`] sends JSON payloads
//! through a [`Signer`] that adds a fresh OAuth 1.0a `Authorization` header to
//! every request, and an [`Operation`] describes what the command line asked for.
//!
//! ```no_run
//! use nsfetch::{default_context, default_signer, Credential, Dispatcher, RecordEndpoint};
//!
//! # async fn example() -> nsfetch::Result<()> {
//! let cred = Credential::new("ck", "cs", "token", "token-secret", "1234567_SB1");
//! let endpoint = RecordEndpoint::new(&cred, "customer");
//! let dispatcher = Dispatcher::new(default_signer(default_context(), cred));
//!
//! let customers = dispatcher
//!     .dispatch_one(http::Method::GET, &endpoint.list(10, 0), None)
//!     .await?;
//! println!("{customers}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use nsfetch_core::*;
pub use nsfetch_import as import;
pub use nsfetch_netsuite::*;

mod context;
pub use context::{default_context, default_signer, DefaultSigner};

mod dispatch;
pub use dispatch::Dispatcher;

mod init;
pub use init::write_config;

mod operation;
pub use operation::{ImportJob, ImportSource, Operation};
