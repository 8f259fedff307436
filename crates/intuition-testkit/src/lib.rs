//! A canned GraphQL endpoint for integration tests.
//!
//! [`MockEndpoint`] runs an axum server on its own thread and runtime, so it
//! can be used from plain `#[test]` functions, from `#[tokio::test]` functions
//! and from tests that spawn the `intuition` binary. Every request is recorded
//! and answered with the same status and body.
//!
//! Setup failures panic: this crate only ever runs under a test harness.

use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const GRAPHQL_PATH: &str = "/v1/graphql";

/// One request as the endpoint received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Arc<str>,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockEndpoint {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockEndpoint {
    /// Answer every request with `200 OK` and `body`.
    pub fn ok(body: &str) -> Self {
        Self::respond(200, body)
    }

    pub fn respond(status: u16, body: &str) -> Self {
        Self::delayed(status, body, Duration::ZERO)
    }

    /// Answer after sleeping for `delay`, to exercise client timeouts.
    pub fn delayed(status: u16, body: &str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Reply {
            status: StatusCode::from_u16(status).expect("valid HTTP status"),
            body: Arc::from(body),
            delay,
            requests: Arc::clone(&requests),
        };

        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock endpoint runtime");
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind mock endpoint");
                let addr = listener.local_addr().expect("mock endpoint address");
                let _ = addr_tx.send(addr);

                let app = Router::new().fallback(record_and_reply).with_state(reply);
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        let addr = addr_rx.recv().expect("mock endpoint started");
        Self {
            url: format!("http://{addr}{GRAPHQL_PATH}"),
            requests,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }

    /// The only request received; panics unless exactly one arrived.
    pub fn single_request(&self) -> RecordedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn record_and_reply(
    State(reply): State<Reply>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    reply
        .requests
        .lock()
        .expect("request log")
        .push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_request_and_replies() {
        let endpoint = MockEndpoint::respond(503, r#"{"error":"down"}"#);

        let response = reqwest::blocking::Client::new()
            .post(endpoint.url())
            .json(&json!({ "query": "q" }))
            .send()
            .unwrap();
        assert_eq!(response.status().as_u16(), 503);
        assert_eq!(response.text().unwrap(), r#"{"error":"down"}"#);

        let request = endpoint.single_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, GRAPHQL_PATH);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.json()["query"], "q");
    }

    #[test]
    fn test_every_request_is_recorded() {
        let endpoint = MockEndpoint::ok(r#"{"data":{}}"#);
        let client = reqwest::blocking::Client::new();
        for _ in 0..2 {
            client.post(endpoint.url()).body("{}").send().unwrap();
        }
        assert_eq!(endpoint.requests().len(), 2);
    }
}
