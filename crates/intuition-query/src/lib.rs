pub mod client;
pub mod documents;
pub mod error;
pub mod operation;

pub use client::{ClientConfig, IntuitionClient, QueryResponse, DEFAULT_TIMEOUT_SECS};
pub use error::QueryError;
pub use operation::{GraphQlRequest, Operation, TRUST_SIGNAL_LIMIT};
