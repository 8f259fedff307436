use serde::{Deserialize, Serialize};

use super::account::Account;
use super::shares::{NumericId, Shares};

/// A node in the knowledge graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Atom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<NumericId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub atom_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<NumericId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Vault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_subject_triples_aggregate: Option<Aggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_object_triples_aggregate: Option<Aggregate>,
}

impl Atom {
    pub fn label_or_unknown(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => "Unknown",
        }
    }

    pub fn total_shares(&self) -> Shares {
        self.vault.as_ref().map(Vault::total_shares).unwrap_or_default()
    }

    pub fn position_count(&self) -> u64 {
        self.vault.as_ref().map(Vault::position_count).unwrap_or(0)
    }

    /// Number of claims with this atom as subject.
    pub fn claims_as_subject(&self) -> u64 {
        Aggregate::count_of(self.as_subject_triples_aggregate.as_ref())
    }

    /// Number of claims with this atom as object.
    pub fn claims_as_object(&self) -> u64 {
        Aggregate::count_of(self.as_object_triples_aggregate.as_ref())
    }
}

/// Pooled stake behind an atom or one direction of a claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vault {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<NumericId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares: Option<Shares>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_share_price: Option<Shares>,
}

impl Vault {
    pub fn total_shares(&self) -> Shares {
        self.total_shares.unwrap_or_default()
    }

    pub fn position_count(&self) -> u64 {
        self.position_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Aggregate {
    #[serde(default)]
    pub aggregate: Option<AggregateCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AggregateCount {
    #[serde(default)]
    pub count: Option<u64>,
}

impl Aggregate {
    fn count_of(agg: Option<&Aggregate>) -> u64 {
        agg.and_then(|a| a.aggregate.as_ref())
            .and_then(|a| a.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_atom_detail() {
        let json = r#"{
            "term_id": 12345,
            "label": "Uniswap",
            "type": "Thing",
            "image": null,
            "created_at": "2024-11-05T12:00:00+00:00",
            "block_number": "1834521",
            "vault": {
                "total_shares": "5420000000000000000000",
                "position_count": 87,
                "current_share_price": "1000000000000000000"
            },
            "creator": { "id": "0xabc", "label": "alice.eth" },
            "as_subject_triples_aggregate": { "aggregate": { "count": 14 } },
            "as_object_triples_aggregate": { "aggregate": { "count": 3 } }
        }"#;
        let atom: Atom = serde_json::from_str(json).unwrap();
        assert_eq!(atom.term_id.as_ref().unwrap().as_str(), "12345");
        assert_eq!(atom.atom_type.as_deref(), Some("Thing"));
        assert_eq!(atom.total_shares(), Shares::from_eth(5420));
        assert_eq!(atom.position_count(), 87);
        assert_eq!(atom.claims_as_subject(), 14);
        assert_eq!(atom.claims_as_object(), 3);
        assert_eq!(atom.creator.unwrap().label.as_deref(), Some("alice.eth"));
    }

    #[test]
    fn test_missing_vault_defaults_to_zero() {
        let atom: Atom = serde_json::from_str(r#"{"label": "", "vault": null}"#).unwrap();
        assert_eq!(atom.total_shares(), Shares::ZERO);
        assert_eq!(atom.position_count(), 0);
        assert_eq!(atom.claims_as_subject(), 0);
        assert_eq!(atom.label_or_unknown(), "Unknown");
    }
}
