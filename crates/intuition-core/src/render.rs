//! Plain-text renderings of query results.

use chrono::{DateTime, NaiveDateTime};

use crate::model::{Account, Atom, NumericId, Position, Triple};

/// `YYYY-MM-DD HH:MM UTC` when the timestamp parses, otherwise as given.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_utc().format("%Y-%m-%d %H:%M UTC").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M UTC").to_string();
    }
    raw.to_string()
}

pub fn render_atom_list(atoms: &[Atom]) -> String {
    if atoms.is_empty() {
        return "No atoms found.".to_string();
    }

    let mut out = String::new();
    for atom in atoms {
        let id = atom.term_id.as_ref().map(NumericId::as_str).unwrap_or("?");
        let kind = atom.atom_type.as_deref().unwrap_or("N/A");
        out.push_str(&format!(
            "\u{25c6} {id}  {} [{kind}]  {} ETH staked, {} position(s)\n",
            atom.label_or_unknown(),
            atom.total_shares().to_eth_string(),
            atom.position_count()
        ));
    }
    out
}

pub fn render_atom(atom: &Atom) -> String {
    let mut out = String::new();

    out.push_str(&format!("Entity: {}\n", atom.label_or_unknown()));
    if let Some(id) = &atom.term_id {
        out.push_str(&format!("ID: {id}\n"));
    }
    out.push_str(&format!(
        "Type: {}\n",
        atom.atom_type.as_deref().unwrap_or("N/A")
    ));
    if let Some(created) = &atom.created_at {
        out.push_str(&format!("Created: {}", format_timestamp(created)));
        if let Some(block) = &atom.block_number {
            out.push_str(&format!(" (block {block})"));
        }
        out.push('\n');
    }
    if let Some(creator) = &atom.creator {
        out.push_str(&format!("Creator: {}\n", creator.display_name()));
    }

    out.push_str(&format!(
        "Total Stake: {} ETH\n",
        atom.total_shares().to_eth_string()
    ));
    out.push_str(&format!("Attestors: {}\n", atom.position_count()));
    if let Some(price) = atom.vault.as_ref().and_then(|v| v.current_share_price) {
        out.push_str(&format!("Share Price: {} ETH\n", price.to_eth_string()));
    }
    if atom.as_subject_triples_aggregate.is_some() || atom.as_object_triples_aggregate.is_some() {
        out.push_str(&format!(
            "Claims: {} as subject, {} as object\n",
            atom.claims_as_subject(),
            atom.claims_as_object()
        ));
    }
    out
}

pub fn render_triples(triples: &[Triple]) -> String {
    if triples.is_empty() {
        return "No claims found.".to_string();
    }

    let mut out = String::new();
    for triple in triples {
        let against = triple
            .counter()
            .map(|s| format!("{} ETH", s.to_eth_string()))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "- {} (for: {} ETH, against: {against}, trust: {})\n",
            triple.statement(),
            triple.support().to_eth_string(),
            triple.assessment()
        ));
    }
    out
}

pub fn render_positions(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No positions found.".to_string();
    }

    let mut out = String::new();
    for position in positions {
        out.push_str(&format!(
            "- {}: {} ETH",
            position.holder_name(),
            position.shares().to_eth_string()
        ));
        if let Some(created) = &position.created_at {
            out.push_str(&format!("  ({})", format_timestamp(created)));
        }
        out.push('\n');
    }
    out
}

pub fn render_account(account: &Account) -> String {
    let mut out = String::new();

    out.push_str(&format!("Account: {}\n", account.display_name()));
    out.push_str(&format!("Address: {}\n", account.id));
    if let Some(kind) = &account.account_type {
        out.push_str(&format!("Type: {kind}\n"));
    }

    if account.positions.is_empty() {
        out.push_str("No positions found.\n");
        return out;
    }

    out.push_str(&format!("\nPositions ({}):\n", account.positions.len()));
    for position in &account.positions {
        let vault = position
            .vault
            .as_ref()
            .and_then(|v| v.term_id.as_ref())
            .map(|id| format!("vault {id}"))
            .unwrap_or_else(|| "vault ?".to_string());
        out.push_str(&format!(
            "  - {vault}: {} ETH\n",
            position.shares().to_eth_string()
        ));
    }
    out
}
