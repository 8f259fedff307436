use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use intuition_core::Network;

use crate::error::QueryError;
use crate::operation::{GraphQlRequest, Operation};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error bodies are cut to this many characters before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            endpoint: network.endpoint().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Blocking GraphQL client: one POST per call, no retries.
#[derive(Debug, Clone)]
pub struct IntuitionClient {
    http: Client,
    config: ClientConfig,
}

impl IntuitionClient {
    pub fn new(config: ClientConfig) -> Result<Self, QueryError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("intuition-trust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(QueryError::Http)?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate, build and send the document for `operation`.
    pub fn run(&self, operation: &Operation) -> Result<QueryResponse, QueryError> {
        let request = operation.request()?;
        debug!(
            operation = operation.name(),
            endpoint = %self.config.endpoint,
            "sending GraphQL request"
        );
        self.execute(&request)
    }

    pub fn execute(&self, request: &GraphQlRequest) -> Result<QueryResponse, QueryError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "GraphQL endpoint returned an error status");
            return Err(QueryError::Api {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let body: Value = serde_json::from_str(&text).map_err(QueryError::Parse)?;
        QueryResponse::from_body(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> QueryError {
        if err.is_timeout() {
            QueryError::Timeout {
                secs: self.config.timeout.as_secs(),
            }
        } else {
            QueryError::Http(err)
        }
    }
}

/// A successful response body, kept exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    body: Value,
}

impl QueryResponse {
    /// Wrap a parsed body, failing when it carries GraphQL errors.
    pub fn from_body(body: Value) -> Result<Self, QueryError> {
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .map(String::from)
                            .unwrap_or_else(|| e.to_string())
                    })
                    .collect();
                warn!(count = messages.len(), "GraphQL response carried errors");
                return Err(QueryError::GraphQl(messages.join("; ")));
            }
        }
        Ok(Self { body })
    }

    pub fn raw(&self) -> &Value {
        &self.body
    }

    pub fn into_raw(self) -> Value {
        self.body
    }

    /// Decode the `data` member into the shape the document selects.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, QueryError> {
        match self.body.get("data") {
            None | Some(Value::Null) => Err(QueryError::MissingData),
            Some(data) => T::deserialize(data).map_err(QueryError::Decode),
        }
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
