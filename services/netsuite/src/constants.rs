use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used to provide credentials.
pub const NSFETCH_CONSUMER_KEY: &str = "NSFETCH_CONSUMER_KEY";
pub const NSFETCH_CONSUMER_SECRET: &str = "NSFETCH_CONSUMER_SECRET";
pub const NSFETCH_TOKEN: &str = "NSFETCH_TOKEN";
pub const NSFETCH_TOKEN_SECRET: &str = "NSFETCH_TOKEN_SECRET";
pub const NSFETCH_REALM: &str = "NSFETCH_REALM";
pub const NSFETCH_CONFIG_FILE: &str = "NSFETCH_CONFIG_FILE";

/// Config file used when `NSFETCH_CONFIG_FILE` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "~/.nsfetch-config.json";

// OAuth 1.0a protocol values.
pub const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA256";
pub const OAUTH_VERSION: &str = "1.0";
pub const OAUTH_NONCE_LENGTH: usize = 32;

/// SuiteTalk REST host suffix, prefixed by the account id.
pub const SUITETALK_HOST_SUFFIX: &str = "suitetalk.api.netsuite.com";
/// Path of the record service.
pub const RECORD_SERVICE_PATH: &str = "/services/rest/record/v1";

/// AsciiSet for [RFC 3986](https://datatracker.ietf.org/doc/html/rfc5849#section-3.6) parameter encoding
///
/// - Percent encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
