use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request};
use log::debug;
use nsfetch_core::{Error, Result};
use serde_json::Value;

use crate::DefaultSigner;

/// Dispatcher sends signed JSON requests one after another.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    signer: DefaultSigner,
}

impl Dispatcher {
    /// Create a dispatcher that signs with `signer` and sends through its context.
    pub fn new(signer: DefaultSigner) -> Self {
        Self { signer }
    }

    /// Send one request and return the parsed response body.
    ///
    /// An empty body is returned as `null` and a body that is not JSON as a
    /// JSON string. Non-2xx responses fail with
    /// [`ErrorKind::HttpFailure`](nsfetch_core::ErrorKind::HttpFailure)
    /// carrying status and body.
    pub async fn dispatch_one(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
    ) -> Result<Value> {
        let body = match payload {
            Some(payload) => Bytes::from(serde_json::to_vec(payload)?),
            None => Bytes::new(),
        };

        let (mut parts, body) = Request::builder()
            .method(method)
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)?
            .into_parts();
        self.signer.sign(&mut parts).await?;

        debug!("dispatching {} {}", parts.method, parts.uri);
        let resp = self
            .signer
            .context()
            .http_send(Request::from_parts(parts, body))
            .await?;

        let status = resp.status();
        let body = resp.into_body();
        debug!("received {status} with {} bytes", body.len());
        if !status.is_success() {
            return Err(Error::http_status(
                status,
                String::from_utf8_lossy(&body).to_string(),
            ));
        }

        Ok(parse_body(&body))
    }

    /// Send one request per record, in order.
    ///
    /// The first failure stops the batch. Its error names the zero based index
    /// of the failing record and how many records were sent before it.
    pub async fn dispatch_many(
        &self,
        method: Method,
        url: &str,
        records: &[Value],
    ) -> Result<Vec<Value>> {
        let mut results = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let resp = self
                .dispatch_one(method.clone(), url, Some(record))
                .await
                .map_err(|err| {
                    err.with_context(format!(
                        "record {idx} failed after {} of {} records were sent",
                        results.len(),
                        records.len()
                    ))
                })?;
            results.push(resp);
        }

        Ok(results)
    }
}

fn parse_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use http::header::AUTHORIZATION;
    use http::StatusCode;
    use nsfetch_core::{Context, ErrorKind, HttpSend};
    use nsfetch_netsuite::Credential;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::default_signer;

    const URL: &str =
        "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer";

    #[derive(Debug, Default, Clone)]
    struct MockHttpSend {
        requests: Arc<Mutex<Vec<Request<Bytes>>>>,
        responses: Arc<Mutex<VecDeque<(StatusCode, &'static str)>>>,
    }

    impl MockHttpSend {
        fn respond(self, status: StatusCode, body: &'static str) -> Self {
            self.responses.lock().unwrap().push_back((status, body));
            self
        }

        fn requests(&self) -> Vec<(Method, String, String, Value)> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|req| {
                    let auth = req.headers()[AUTHORIZATION].to_str().unwrap().to_string();
                    let body = if req.body().is_empty() {
                        Value::Null
                    } else {
                        serde_json::from_slice(req.body()).unwrap()
                    };
                    (req.method().clone(), req.uri().to_string(), auth, body)
                })
                .collect()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((StatusCode::NO_CONTENT, ""));
            Ok(http::Response::builder()
                .status(status)
                .body(Bytes::from_static(body.as_bytes()))
                .unwrap())
        }
    }

    fn dispatcher(http: MockHttpSend) -> Dispatcher {
        let cred = Credential::new("ck", "cs", "tk", "ts", "1234567_SB1");
        Dispatcher::new(default_signer(Context::new().with_http_send(http), cred))
    }

    #[tokio::test]
    async fn test_dispatch_one() {
        let http = MockHttpSend::default().respond(StatusCode::OK, r#"{"id": "42"}"#);
        let d = dispatcher(http.clone());

        let out = d
            .dispatch_one(Method::POST, URL, Some(&json!({"companyName": "Acme"})))
            .await
            .expect("dispatch must succeed");

        assert_eq!(out, json!({"id": "42"}));
        let reqs = http.requests.lock().unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].headers()[CONTENT_TYPE], "application/json");
        let auth = reqs[0].headers()[AUTHORIZATION].to_str().unwrap();
        assert!(auth.starts_with("OAuth "), "{auth}");
        assert!(auth.ends_with(r#"realm="1234567_SB1""#), "{auth}");
    }

    #[tokio::test]
    async fn test_dispatch_one_bodies() {
        let http = MockHttpSend::default()
            .respond(StatusCode::NO_CONTENT, "")
            .respond(StatusCode::OK, "plain text");
        let d = dispatcher(http);

        assert_eq!(d.dispatch_one(Method::DELETE, URL, None).await.unwrap(), Value::Null);
        assert_eq!(
            d.dispatch_one(Method::GET, URL, None).await.unwrap(),
            json!("plain text")
        );
    }

    #[tokio::test]
    async fn test_dispatch_one_http_error() {
        let http = MockHttpSend::default()
            .respond(StatusCode::BAD_REQUEST, r#"{"title": "Invalid field"}"#);
        let d = dispatcher(http);

        let err = d
            .dispatch_one(Method::POST, URL, Some(&json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HttpFailure);
        let resp = err.response().expect("response must be kept");
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body, r#"{"title": "Invalid field"}"#);
    }

    #[tokio::test]
    async fn test_dispatch_many_keeps_order() {
        let http = MockHttpSend::default()
            .respond(StatusCode::OK, r#"{"n": 1}"#)
            .respond(StatusCode::OK, r#"{"n": 2}"#)
            .respond(StatusCode::OK, r#"{"n": 3}"#);
        let d = dispatcher(http.clone());
        let records = vec![json!({"r": 1}), json!({"r": 2}), json!({"r": 3})];

        let out = d.dispatch_many(Method::POST, URL, &records).await.unwrap();

        assert_eq!(out, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);
        let sent = http.requests();
        let bodies: Vec<Value> = sent.iter().map(|(_, _, _, body)| body.clone()).collect();
        assert_eq!(bodies, records);
        assert!(sent.iter().all(|(m, u, _, _)| m == Method::POST && u == URL));
        // Every request carries its own signature.
        assert_ne!(sent[0].2, sent[1].2);
        assert_ne!(sent[1].2, sent[2].2);
    }

    #[tokio::test]
    async fn test_dispatch_many_stops_at_first_failure() {
        let http = MockHttpSend::default()
            .respond(StatusCode::OK, r#"{"n": 1}"#)
            .respond(StatusCode::BAD_REQUEST, "bad record")
            .respond(StatusCode::OK, r#"{"n": 3}"#);
        let d = dispatcher(http.clone());
        let records = vec![json!({"r": 1}), json!({"r": 2}), json!({"r": 3})];

        let err = d
            .dispatch_many(Method::POST, URL, &records)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HttpFailure);
        assert!(
            err.to_string()
                .starts_with("record 1 failed after 1 of 3 records were sent: "),
            "{err}"
        );
        assert_eq!(err.response().unwrap().body, "bad record");
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_many_empty() {
        let http = MockHttpSend::default();
        let d = dispatcher(http.clone());

        let out = d.dispatch_many(Method::POST, URL, &[]).await.unwrap();

        assert!(out.is_empty());
        assert!(http.requests().is_empty());
    }
}
