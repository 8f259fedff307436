//! Data model, share arithmetic and trust scoring for the Intuition knowledge graph.
//!
//! Nothing here talks to the network: the types mirror what the remote GraphQL
//! service returns, and the scoring turns vault / counter-vault stakes into a
//! trust ratio and band.

pub mod error;
pub mod model;
pub mod network;
pub mod render;
pub mod report;
pub mod trust;

pub use error::CoreError;
pub use model::{Account, Atom, NumericId, Position, Shares, Triple, Vault};
pub use network::Network;
pub use report::TrustReport;
pub use trust::{trust_ratio, TrustAssessment, TrustBand};
