use intuition_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed JSON response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Response contained no data")]
    MissingData,

    #[error("Unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl QueryError {
    /// HTTP status code when the endpoint answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
