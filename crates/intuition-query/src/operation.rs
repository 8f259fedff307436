use serde::Serialize;
use serde_json::{json, Value};

use intuition_core::model::normalize_address;

use crate::documents;
use crate::error::QueryError;

/// Claims and positions fetched per trust-signal request.
pub const TRUST_SIGNAL_LIMIT: u32 = 50;

/// Address lookups return at most this many atoms.
pub const ADDRESS_MATCH_LIMIT: u32 = 5;

/// One query against the knowledge graph. Each maps to exactly one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SearchAtoms { term: String, limit: u32 },
    Atom { atom_id: u64 },
    AtomsByAddress { address: String },
    Account { address: String, limit: u32 },
    TriplesAbout { subject_id: u64, limit: u32 },
    Positions { atom_id: u64, limit: u32 },
    TrustSignals { atom_id: u64 },
}

/// The JSON body POSTed to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl Operation {
    /// GraphQL operation name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SearchAtoms { .. } => "SearchAtoms",
            Operation::Atom { .. } => "GetAtom",
            Operation::AtomsByAddress { .. } => "GetAtomByAddress",
            Operation::Account { .. } => "GetAccount",
            Operation::TriplesAbout { .. } => "GetTriplesAbout",
            Operation::Positions { .. } => "GetPositions",
            Operation::TrustSignals { .. } => "GetTrustSignals",
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Operation::SearchAtoms { .. } => documents::SEARCH_ATOMS,
            Operation::Atom { .. } => documents::GET_ATOM,
            Operation::AtomsByAddress { .. } => documents::GET_ATOM_BY_ADDRESS,
            Operation::Account { .. } => documents::GET_ACCOUNT,
            Operation::TriplesAbout { .. } => documents::GET_TRIPLES_ABOUT,
            Operation::Positions { .. } => documents::GET_POSITIONS,
            Operation::TrustSignals { .. } => documents::GET_TRUST_SIGNALS,
        }
    }

    /// Validate parameters and fill in the document's variables.
    pub fn request(&self) -> Result<GraphQlRequest, QueryError> {
        let variables = match self {
            Operation::SearchAtoms { term, limit } => {
                let term = non_empty("search term", term)?;
                json!({ "searchTerm": format!("%{term}%"), "limit": positive(*limit)? })
            }
            Operation::Atom { atom_id } => json!({ "atomId": atom_id }),
            Operation::AtomsByAddress { address } => {
                let address = non_empty("address", address)?;
                json!({ "address": format!("%{address}%"), "limit": ADDRESS_MATCH_LIMIT })
            }
            Operation::Account { address, limit } => {
                let address = normalize_address(address)?;
                json!({ "address": address, "limit": positive(*limit)? })
            }
            Operation::TriplesAbout { subject_id, limit } => {
                json!({ "subjectId": subject_id, "limit": positive(*limit)? })
            }
            Operation::Positions { atom_id, limit } => {
                json!({ "atomId": atom_id, "limit": positive(*limit)? })
            }
            Operation::TrustSignals { atom_id } => {
                json!({ "atomId": atom_id, "limit": TRUST_SIGNAL_LIMIT })
            }
        };

        Ok(GraphQlRequest {
            query: self.document(),
            variables,
        })
    }
}

fn non_empty<'a>(what: &str, value: &'a str) -> Result<&'a str, QueryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}

fn positive(limit: u32) -> Result<u32, QueryError> {
    if limit == 0 {
        return Err(QueryError::InvalidArgument(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(limit)
}
