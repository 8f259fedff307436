use serde::Serialize;
use tracing::debug;

use crate::model::{short_address, Shares, TrustSignalsData};
use crate::render::format_timestamp;
use crate::trust::{round_ratio, trust_ratio, TrustAssessment, TrustBand};

/// How many of the highest-staked claims feed the aggregate ratio.
pub const TOP_CLAIMS: usize = 5;
pub const TOP_ATTESTORS: usize = 5;

/// Reputation summary for one atom, built from its own vault, the claims made
/// about it and the largest positions staked on it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrustReport {
    pub atom_id: String,
    pub atom: Option<AtomSummary>,
    pub metrics: TrustMetrics,
    pub top_claims: Vec<ClaimSignal>,
    pub top_attestors: Vec<Attestor>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AtomSummary {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub atom_type: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrustMetrics {
    pub total_stake: Shares,
    pub total_stake_eth: String,
    pub position_count: u64,
    pub claims_as_subject: u64,
    pub claims_as_object: u64,
    pub positive_signal: Shares,
    /// `None` when none of the top claims has a counter vault.
    pub negative_signal: Option<Shares>,
    pub trust_ratio: Option<f64>,
    pub assessment: TrustBand,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClaimSignal {
    pub predicate: Option<String>,
    pub object: Option<String>,
    pub positive_stake: Shares,
    pub negative_stake: Option<Shares>,
    pub trust_ratio: Option<f64>,
    pub assessment: TrustBand,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attestor {
    pub address: Option<String>,
    pub label: Option<String>,
    pub stake: Shares,
}

impl TrustReport {
    /// Assemble a report. Triples and positions are expected in descending
    /// stake order, as the trust-signals query returns them.
    pub fn build(atom_id: impl Into<String>, data: &TrustSignalsData) -> Self {
        let atom_id = atom_id.into();

        let top_claims: Vec<ClaimSignal> = data
            .triples
            .iter()
            .take(TOP_CLAIMS)
            .map(|t| {
                let assessment = t.assessment();
                ClaimSignal {
                    predicate: t.predicate_label().map(String::from),
                    object: t.object_label().map(String::from),
                    positive_stake: t.support(),
                    negative_stake: t.counter(),
                    trust_ratio: assessment.ratio.map(round_ratio),
                    assessment: assessment.band,
                }
            })
            .collect();

        let positive_signal: Shares = top_claims.iter().map(|c| c.positive_stake).sum();
        let negative_signal = top_claims
            .iter()
            .filter_map(|c| c.negative_stake)
            .fold(None, |acc: Option<Shares>, s| {
                Some(acc.unwrap_or_default() + s)
            });

        let ratio = trust_ratio(positive_signal, negative_signal).map(round_ratio);
        let assessment = TrustBand::from_ratio(ratio);

        let top_attestors = data
            .positions
            .iter()
            .take(TOP_ATTESTORS)
            .map(|p| Attestor {
                address: p.account_id().map(String::from),
                label: p.account_label().map(String::from),
                stake: p.shares(),
            })
            .collect();

        let atom = data.atom.as_ref();
        let total_stake = atom.map(|a| a.total_shares()).unwrap_or_default();

        debug!(
            atom_id = %atom_id,
            found = atom.is_some(),
            claims = top_claims.len(),
            ?ratio,
            "built trust report"
        );

        Self {
            atom: atom.map(|a| AtomSummary {
                label: a.label.clone(),
                atom_type: a.atom_type.clone(),
                created_at: a.created_at.clone(),
            }),
            metrics: TrustMetrics {
                total_stake,
                total_stake_eth: total_stake.to_eth_string(),
                position_count: atom.map(|a| a.position_count()).unwrap_or(0),
                claims_as_subject: atom.map(|a| a.claims_as_subject()).unwrap_or(0),
                claims_as_object: atom.map(|a| a.claims_as_object()).unwrap_or(0),
                positive_signal,
                negative_signal,
                trust_ratio: ratio,
                assessment,
            },
            top_claims,
            top_attestors,
            atom_id,
        }
    }

    pub fn assessment(&self) -> TrustAssessment {
        TrustAssessment::from_ratio(self.metrics.trust_ratio)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        match &self.atom {
            Some(atom) => {
                out.push_str(&format!(
                    "Entity: {}\n",
                    atom.label.as_deref().unwrap_or("Unknown")
                ));
                out.push_str(&format!(
                    "Type: {}\n",
                    atom.atom_type.as_deref().unwrap_or("N/A")
                ));
                if let Some(created) = &atom.created_at {
                    out.push_str(&format!("Created: {}\n", format_timestamp(created)));
                }
            }
            None => out.push_str(&format!("Entity: not found (atom {})\n", self.atom_id)),
        }
        out.push('\n');

        let m = &self.metrics;
        out.push_str("Metrics:\n");
        out.push_str(&format!("  Total Stake: {} ETH\n", m.total_stake_eth));
        out.push_str(&format!("  Position Count: {}\n", m.position_count));
        out.push_str(&format!("  Claims as Subject: {}\n", m.claims_as_subject));
        out.push_str(&format!("  Claims as Object: {}\n", m.claims_as_object));
        out.push_str(&format!("  Trust Ratio: {}\n", self.assessment()));

        if !self.top_claims.is_empty() {
            out.push_str("\nTop Claims:\n");
            for claim in &self.top_claims {
                let against = claim
                    .negative_stake
                    .map(|s| format!("{} ETH", s.to_eth_string()))
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "  - {} -> {} (positive: {} ETH, negative: {}, {})\n",
                    claim.predicate.as_deref().unwrap_or("?"),
                    claim.object.as_deref().unwrap_or("?"),
                    claim.positive_stake.to_eth_string(),
                    against,
                    TrustAssessment::from_ratio(claim.trust_ratio)
                ));
            }
        }

        if !self.top_attestors.is_empty() {
            out.push_str("\nTop Attestors:\n");
            for attestor in &self.top_attestors {
                let name = match (&attestor.label, &attestor.address) {
                    (Some(label), _) if !label.trim().is_empty() => label.clone(),
                    (_, Some(address)) => short_address(address),
                    _ => "?".to_string(),
                };
                out.push_str(&format!(
                    "  - {name}: {} ETH\n",
                    attestor.stake.to_eth_string()
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, Atom, Position, Triple, Vault};

    fn vault(eth: u64) -> Option<Vault> {
        Some(Vault {
            total_shares: Some(Shares::from_eth(eth)),
            ..Default::default()
        })
    }

    fn claim(predicate: &str, object: &str, support: u64, counter: Option<u64>) -> Triple {
        Triple {
            predicate: Some(Atom {
                label: Some(predicate.into()),
                ..Default::default()
            }),
            object: Some(Atom {
                label: Some(object.into()),
                ..Default::default()
            }),
            vault: vault(support),
            counter_vault: counter.and_then(vault),
            ..Default::default()
        }
    }

    fn sample() -> TrustSignalsData {
        TrustSignalsData {
            atom: Some(Atom {
                label: Some("Uniswap".into()),
                atom_type: Some("Thing".into()),
                vault: Some(Vault {
                    total_shares: Some(Shares::from_eth(5420)),
                    position_count: Some(87),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            triples: vec![
                claim("is", "trustworthy", 80, Some(10)),
                claim("audited by", "OpenZeppelin", 5, Some(5)),
            ],
            positions: vec![Position {
                account: Some(Account {
                    id: "0x1234abcd5678ef901234abcd5678ef901234abcd".into(),
                    ..Default::default()
                }),
                shares: Some(Shares::from_eth(100)),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_aggregates_top_claims() {
        let report = TrustReport::build("12345", &sample());
        assert_eq!(report.metrics.positive_signal, Shares::from_eth(85));
        assert_eq!(report.metrics.negative_signal, Some(Shares::from_eth(15)));
        assert_eq!(report.metrics.trust_ratio, Some(0.85));
        assert_eq!(report.metrics.assessment, TrustBand::StrongPositive);
        assert_eq!(report.metrics.total_stake_eth, "5420");
        assert_eq!(report.metrics.position_count, 87);
        assert_eq!(report.top_claims[1].assessment, TrustBand::Mixed);
    }

    #[test]
    fn test_only_top_five_claims_count() {
        let mut data = sample();
        data.triples = (0..7)
            .map(|i| claim("p", "o", 10, if i < 5 { Some(0) } else { Some(1000) }))
            .collect();
        let report = TrustReport::build("1", &data);
        assert_eq!(report.top_claims.len(), TOP_CLAIMS);
        assert_eq!(report.metrics.trust_ratio, Some(1.0));
    }

    #[test]
    fn test_no_counter_vaults_is_unverified() {
        let mut data = sample();
        data.triples = vec![claim("is", "safe", 10, None)];
        let report = TrustReport::build("1", &data);
        assert_eq!(report.metrics.negative_signal, None);
        assert_eq!(report.metrics.trust_ratio, None);
        assert_eq!(report.metrics.assessment, TrustBand::Unverified);
        assert!(report.to_text().contains("Trust Ratio: unverified / no data"));
    }

    #[test]
    fn test_missing_atom() {
        let report = TrustReport::build("404", &TrustSignalsData::default());
        assert!(report.atom.is_none());
        assert_eq!(report.metrics.total_stake, Shares::ZERO);
        assert_eq!(report.metrics.assessment, TrustBand::Unverified);
        assert!(report.to_text().starts_with("Entity: not found (atom 404)"));
    }

    #[test]
    fn test_text_rendering() {
        let text = TrustReport::build("12345", &sample()).to_text();
        assert!(text.contains("Entity: Uniswap"));
        assert!(text.contains("Total Stake: 5420 ETH"));
        assert!(text.contains("Trust Ratio: 85.00% (strong positive)"));
        assert!(text.contains("  - is -> trustworthy (positive: 80 ETH, negative: 10 ETH"));
        assert!(text.contains("  - 0x1234abcd...: 100 ETH"));
    }

    #[test]
    fn test_dust_stakes_are_not_shown_as_zero() {
        let mut data = sample();
        data.triples = vec![Triple {
            predicate: Some(Atom {
                label: Some("is".into()),
                ..Default::default()
            }),
            object: Some(Atom {
                label: Some("safe".into()),
                ..Default::default()
            }),
            vault: Some(Vault {
                total_shares: Some(Shares(600)),
                ..Default::default()
            }),
            counter_vault: Some(Vault {
                total_shares: Some(Shares(400)),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let text = TrustReport::build("1", &data).to_text();
        assert!(text.contains("(positive: <0.0001 ETH, negative: <0.0001 ETH, 60.00% (mixed / contested))"));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(TrustReport::build("12345", &sample())).unwrap();
        assert_eq!(value["atom"]["type"], "Thing");
        assert_eq!(value["metrics"]["assessment"], "strong_positive");
        assert_eq!(value["metrics"]["total_stake"], "5420000000000000000000");
    }
}
