use serde::{Deserialize, Serialize};

use super::atom::{Atom, Vault};
use super::shares::{NumericId, Shares};
use crate::trust::TrustAssessment;

/// A subject-predicate-object claim with stake for and against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Triple {
    #[serde(default, alias = "term_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<NumericId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Atom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Atom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Atom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Vault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_vault: Option<Vault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Triple {
    /// Shares staked in favour of the claim.
    pub fn support(&self) -> Shares {
        self.vault.as_ref().map(Vault::total_shares).unwrap_or_default()
    }

    /// Shares staked against the claim; `None` when there is no counter vault.
    pub fn counter(&self) -> Option<Shares> {
        self.counter_vault.as_ref().map(Vault::total_shares)
    }

    pub fn assessment(&self) -> TrustAssessment {
        TrustAssessment::compute(self.support(), self.counter())
    }

    pub fn subject_label(&self) -> Option<&str> {
        self.subject.as_ref().and_then(|a| a.label.as_deref())
    }

    pub fn predicate_label(&self) -> Option<&str> {
        self.predicate.as_ref().and_then(|a| a.label.as_deref())
    }

    pub fn object_label(&self) -> Option<&str> {
        self.object.as_ref().and_then(|a| a.label.as_deref())
    }

    /// `subject predicate object`, with `?` for missing labels.
    pub fn statement(&self) -> String {
        format!(
            "{} {} {}",
            self.subject_label().unwrap_or("?"),
            self.predicate_label().unwrap_or("?"),
            self.object_label().unwrap_or("?")
        )
    }
}
