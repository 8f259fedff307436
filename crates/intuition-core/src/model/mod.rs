pub mod account;
pub mod atom;
pub mod shares;
pub mod triple;

pub use account::{normalize_address, short_address, Account, Position};
pub use atom::{Aggregate, AggregateCount, Atom, Vault};
pub use shares::{NumericId, Shares, WEI_PER_ETH};
pub use triple::Triple;

use serde::Deserialize;

// `data` payloads, one per GraphQL document.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchAtomsData {
    #[serde(default)]
    pub atoms: Vec<Atom>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtomData {
    pub atom: Option<Atom>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriplesData {
    #[serde(default)]
    pub triples: Vec<Triple>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionsData {
    #[serde(default)]
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountData {
    pub account: Option<Account>,
}

/// Atom, claims about it, and stakes on it, fetched in a single request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrustSignalsData {
    pub atom: Option<Atom>,
    #[serde(default)]
    pub triples: Vec<Triple>,
    #[serde(default)]
    pub positions: Vec<Position>,
}
