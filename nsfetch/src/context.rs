use nsfetch_core::{Context, OsEnv, Signer};
use nsfetch_file_read_tokio::TokioFileRead;
use nsfetch_http_send_reqwest::ReqwestHttpSend;
use nsfetch_netsuite::{Credential, RequestSigner, StaticCredentialProvider};

/// Signer type used by the command line.
pub type DefaultSigner = Signer<Credential>;

/// Create a context with tokio file reading, a reqwest client and the OS environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Create a signer for an already resolved credential.
///
/// Every signed request gets its own nonce and timestamp.
pub fn default_signer(ctx: Context, credential: Credential) -> DefaultSigner {
    Signer::new(
        ctx,
        StaticCredentialProvider::new(credential),
        RequestSigner::new(),
    )
}
