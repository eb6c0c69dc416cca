use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = if self.query.is_empty() {
                    self.path
                } else {
                    let query = form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(&self.query)
                        .finish();
                    format!("{}?{query}", self.path)
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Base URI of the request: scheme and host lowercased, default port
    /// dropped, query and fragment removed.
    pub fn base_uri(&self) -> String {
        let scheme = self.scheme.as_str().to_ascii_lowercase();
        let host = self.authority.host().to_ascii_lowercase();
        let default_port = match scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };
        let path = if self.path.is_empty() { "/" } else { &self.path };

        match self.authority.port_u16() {
            Some(port) if Some(port) != default_port => format!("{scheme}://{host}:{port}{path}"),
            _ => format!("{scheme}://{host}{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .body(())
            .expect("request must build")
            .into_parts()
            .0
    }

    #[test]
    fn test_build_decodes_query() -> Result<()> {
        let mut p = parts("https://acct.example.com/record/v1/customer/42?fields=companyName%2Cemail&q=a+b");
        let req = SigningRequest::build(&mut p)?;

        assert_eq!(req.path, "/record/v1/customer/42");
        assert_eq!(
            req.query,
            vec![
                ("fields".to_string(), "companyName,email".to_string()),
                ("q".to_string(), "a b".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_apply_round_trip() -> Result<()> {
        let mut p = parts("https://acct.example.com/customer?limit=1000&offset=0");
        let mut req = SigningRequest::build(&mut p)?;
        req.query.push(("q".to_string(), "a b".to_string()));
        req.apply(&mut p)?;

        assert_eq!(
            p.uri.to_string(),
            "https://acct.example.com/customer?limit=1000&offset=0&q=a+b"
        );
        Ok(())
    }

    #[test]
    fn test_base_uri() -> Result<()> {
        let cases = vec![
            ("https://ACCT.Example.com/Customer?x=1", "https://acct.example.com/Customer"),
            ("https://acct.example.com:443/a", "https://acct.example.com/a"),
            ("http://acct.example.com:8080/a", "http://acct.example.com:8080/a"),
            ("https://acct.example.com", "https://acct.example.com/"),
        ];

        for (input, expected) in cases {
            let mut p = parts(input);
            let req = SigningRequest::build(&mut p)?;
            assert_eq!(req.base_uri(), expected, "Failed on input: {input}");
        }
        Ok(())
    }
}
