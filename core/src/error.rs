use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for nsfetch operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    response: Option<HttpResponse>,
    #[source]
    source: Option<anyhow::Error>,
}

/// Status and body of a response the server answered with but that was not a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code returned by the server.
    pub status: StatusCode,
    /// Raw response body, lossily decoded as utf-8.
    pub body: String,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials are missing or the config file could not be read
    ConfigInvalid,

    /// Required input for an operation is missing (payload, record id, ...)
    RequestInvalid,

    /// Credentials exist but can't be used to sign a request
    CredentialInvalid,

    /// The HTTP call failed or returned a non-2xx status
    HttpFailure,

    /// Malformed JSON, CSV, spreadsheet or map file input
    ParseInvalid,

    /// A dotted field path runs through a value that is not a mapping
    PathConflict,

    /// Unexpected errors (I/O and everything else)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            response: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Prefix the message with more context, keeping kind, response and source.
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the message without kind or source.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the server response if this error carries one.
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Check if this error happened before any network activity.
    pub fn is_local(&self) -> bool {
        self.kind != ErrorKind::HttpFailure
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create an http failure error without a server response
    pub fn http_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HttpFailure, message)
    }

    /// Create an http failure error from a non-success response
    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        let mut err = Self::new(
            ErrorKind::HttpFailure,
            format!("request failed with status {status}"),
        );
        err.response = Some(HttpResponse {
            status,
            body: body.into(),
        });
        err
    }

    /// Create a parse invalid error
    pub fn parse_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseInvalid, message)
    }

    /// Create a path conflict error
    pub fn path_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathConflict, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::HttpFailure => write!(f, "http failure"),
            ErrorKind::ParseInvalid => write!(f, "invalid input"),
            ErrorKind::PathConflict => write!(f, "field path conflict"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::method::InvalidMethod> for Error {
    fn from(err: http::method::InvalidMethod) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
