//! OAuth 1.0a request signing for NetSuite token based authentication.
use std::fmt::Write;
use std::str::FromStr;

use http::header::AUTHORIZATION;
use http::HeaderValue;
use http::Method;
use http::Uri;
use log::debug;
use nsfetch_core::hash::base64_hmac_sha256;
use nsfetch_core::time::{now, DateTime};
use nsfetch_core::{Context, Error, Result, SignRequest, SigningRequest};
use percent_encoding::utf8_percent_encode;
use rand::distributions::{Alphanumeric, DistString};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements NetSuite token based authentication.
///
/// Every request gets a fresh nonce and timestamp. The realm is appended to the
/// header after signing and never takes part in the signature.
///
/// - [OAuth 1.0a](https://datatracker.ietf.org/doc/html/rfc5849)
/// - [NetSuite TBA Authorization Header](https://docs.oracle.com/en/cloud/saas/netsuite/ns-online-help/section_1534941088.html)
#[derive(Debug, Default)]
pub struct RequestSigner {
    nonce: Option<String>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// We should always generate a new nonce for every request.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| {
            Error::config_invalid("no credentials found, run `nsfetch init` first")
        })?;
        let nonce = self.nonce.clone().unwrap_or_else(generate_nonce);
        let timestamp = self.time.unwrap_or_else(now).timestamp();

        let mut req = SigningRequest::build(parts)?;
        let value = authorization(&req, cred, &nonce, timestamp)?;
        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = value.parse()?;
            value.set_sensitive(true);

            value
        });

        req.apply(parts)
    }
}

/// Compute the `Authorization` header value for one request.
///
/// This is a pure function of its inputs: the same nonce and timestamp always
/// produce the same header.
pub fn authorization_header(
    method: &Method,
    url: &str,
    cred: &Credential,
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let mut parts = http::Request::builder()
        .method(method.clone())
        .uri(Uri::from_str(url)?)
        .body(())?
        .into_parts()
        .0;
    let req = SigningRequest::build(&mut parts)?;

    authorization(&req, cred, nonce, timestamp)
}

fn authorization(
    req: &SigningRequest,
    cred: &Credential,
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    cred.check()?;

    let mut params = oauth_params(cred, nonce, timestamp);
    let string_to_sign = string_to_sign(req, &params)?;
    let signing_key = format!(
        "{}&{}",
        percent_encode(&cred.consumer_secret),
        percent_encode(&cred.token_secret)
    );
    let signature = base64_hmac_sha256(signing_key.as_bytes(), string_to_sign.as_bytes());

    params.push(("oauth_signature", signature));
    params.sort();

    let mut s = String::from("OAuth ");
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push_str(", ");
        }
        write!(s, "{}=\"{}\"", percent_encode(k), percent_encode(v))?;
    }
    write!(s, ", realm=\"{}\"", cred.realm)?;

    Ok(s)
}

fn oauth_params(cred: &Credential, nonce: &str, timestamp: i64) -> Vec<(&'static str, String)> {
    vec![
        ("oauth_consumer_key", cred.consumer_key.clone()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", OAUTH_SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_token", cred.token.clone()),
        ("oauth_version", OAUTH_VERSION.to_string()),
    ]
}

/// Construct signature base string
///
/// ## Format
///
/// ```text
/// METHOD + "&" +
/// encode(base URI) + "&" +
/// encode(normalized parameters)
/// ```
///
/// Normalized parameters are the OAuth protocol parameters plus the query
/// parameters, each key and value encoded, sorted, `k=v` joined with `&`.
///
/// ## Reference
///
/// - [Signature Base String](https://datatracker.ietf.org/doc/html/rfc5849#section-3.4.1)
fn string_to_sign(req: &SigningRequest, oauth: &[(&'static str, String)]) -> Result<String> {
    let mut params: Vec<(String, String)> = oauth
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            req.query
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    params.sort();

    let mut normalized = String::new();
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            normalized.push('&');
        }
        write!(normalized, "{k}={v}")?;
    }

    let mut s = String::new();
    s.write_str(&req.method.as_str().to_ascii_uppercase())?;
    s.write_str("&")?;
    s.write_str(&percent_encode(&req.base_uri()))?;
    s.write_str("&")?;
    s.write_str(&percent_encode(&normalized))?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &OAUTH_ENCODE_SET).to_string()
}

fn generate_nonce() -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), OAUTH_NONCE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticCredentialProvider;
    use nsfetch_core::time::from_unix_seconds;
    use nsfetch_core::{ErrorKind, Signer};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const NONCE: &str = "kllo9940pd9333jh";
    const TIMESTAMP: i64 = 1_700_000_000;
    const BASE: &str = "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1";

    fn credential() -> Credential {
        Credential::new(
            "consumer_key",
            "consumer_secret",
            "token_id",
            "token_secret",
            "1234567_SB1",
        )
    }

    fn signing_request(method: Method, url: &str) -> SigningRequest {
        let mut parts = http::Request::builder()
            .method(method)
            .uri(url)
            .body(())
            .expect("request must build")
            .into_parts()
            .0;
        SigningRequest::build(&mut parts).expect("request must be signable")
    }

    #[test]
    fn test_string_to_sign() -> Result<()> {
        let req = signing_request(Method::GET, &format!("{BASE}/customer?limit=1000&offset=0"));
        let s = string_to_sign(&req, &oauth_params(&credential(), NONCE, TIMESTAMP))?;

        assert_eq!(
            s,
            "GET&https%3A%2F%2F1234567-sb1.suitetalk.api.netsuite.com%2Fservices%2Frest%2Frecord%2Fv1%2Fcustomer\
             &limit%3D1000%26oauth_consumer_key%3Dconsumer_key%26oauth_nonce%3Dkllo9940pd9333jh\
             %26oauth_signature_method%3DHMAC-SHA256%26oauth_timestamp%3D1700000000\
             %26oauth_token%3Dtoken_id%26oauth_version%3D1.0%26offset%3D0"
        );
        assert!(!s.contains("realm"));
        Ok(())
    }

    #[test_case(
        Method::GET, "/customer?limit=1000&offset=0",
        "qz8X57X2qqf6G6zHarHh10isk3v03ZOdCsUlmR%2FKNvo%3D"
        ; "list with paging"
    )]
    #[test_case(
        Method::POST, "/salesOrder",
        "QQxwcJamrENMu0S73ma%2BOFvPeuWEA4f%2FYR%2FCe0ZHxDQ%3D"
        ; "create without query"
    )]
    #[test_case(
        Method::GET, "/customer/42?fields=companyName%2Cemail",
        "SVz%2BxmDdnIE3yukjfbmp83q5%2FFLN8Kpa9KjUZwnyOcY%3D"
        ; "get with fields"
    )]
    fn test_authorization_header(method: Method, path: &str, signature: &str) -> Result<()> {
        let header = authorization_header(
            &method,
            &format!("{BASE}{path}"),
            &credential(),
            NONCE,
            TIMESTAMP,
        )?;

        assert_eq!(
            header,
            format!(
                "OAuth oauth_consumer_key=\"consumer_key\", oauth_nonce=\"{NONCE}\", \
                 oauth_signature=\"{signature}\", oauth_signature_method=\"HMAC-SHA256\", \
                 oauth_timestamp=\"{TIMESTAMP}\", oauth_token=\"token_id\", \
                 oauth_version=\"1.0\", realm=\"1234567_SB1\""
            )
        );
        Ok(())
    }

    #[test]
    fn test_authorization_header_is_deterministic() -> Result<()> {
        let url = format!("{BASE}/customer?limit=10&offset=20");
        let first = authorization_header(&Method::GET, &url, &credential(), NONCE, TIMESTAMP)?;
        let second = authorization_header(&Method::GET, &url, &credential(), NONCE, TIMESTAMP)?;
        assert_eq!(first, second);

        let other_nonce =
            authorization_header(&Method::GET, &url, &credential(), "another", TIMESTAMP)?;
        assert_ne!(first, other_nonce);
        Ok(())
    }

    #[test]
    fn test_realm_is_not_signed() -> Result<()> {
        let url = format!("{BASE}/invoice");
        let mut other_realm = credential();
        other_realm.realm = "7654321".to_string();

        let a = authorization_header(&Method::DELETE, &url, &credential(), NONCE, TIMESTAMP)?;
        let b = authorization_header(&Method::DELETE, &url, &other_realm, NONCE, TIMESTAMP)?;

        let signature = |h: &str| {
            h.split(", ")
                .find(|p| p.starts_with("oauth_signature="))
                .map(str::to_string)
        };
        assert_eq!(signature(&a), signature(&b));
        assert!(b.ends_with(", realm=\"7654321\""));
        Ok(())
    }

    #[test]
    fn test_missing_credential_field() {
        let mut cred = credential();
        cred.token_secret = String::new();

        let err = authorization_header(&Method::GET, BASE, &cred, NONCE, TIMESTAMP).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_sign_with_signer() -> Result<()> {
        let builder = RequestSigner::new()
            .with_nonce(NONCE)
            .with_time(from_unix_seconds(TIMESTAMP).expect("timestamp must be valid"));
        let signer = Signer::new(
            Context::new(),
            StaticCredentialProvider::new(credential()),
            builder,
        );

        let mut parts = http::Request::post(format!("{BASE}/salesOrder"))
            .body(())?
            .into_parts()
            .0;
        signer.sign(&mut parts).await?;

        let auth = parts.headers.get(AUTHORIZATION).expect("must be signed");
        assert!(auth.is_sensitive());
        assert!(auth
            .to_str()
            .expect("must be ascii")
            .contains("oauth_signature=\"QQxwcJamrENMu0S73ma%2BOFvPeuWEA4f%2FYR%2FCe0ZHxDQ%3D\""));
        assert_eq!(parts.uri.to_string(), format!("{BASE}/salesOrder"));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_generates_fresh_nonce() -> Result<()> {
        let signer = Signer::new(
            Context::new(),
            StaticCredentialProvider::new(credential()),
            RequestSigner::new(),
        );

        let mut headers = Vec::new();
        for _ in 0..2 {
            let mut parts = http::Request::get(format!("{BASE}/customer"))
                .body(())?
                .into_parts()
                .0;
            signer.sign(&mut parts).await?;
            headers.push(parts.headers[AUTHORIZATION].clone());
        }

        assert_ne!(headers[0], headers[1]);
        Ok(())
    }

    #[test]
    fn test_generate_nonce() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), OAUTH_NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
