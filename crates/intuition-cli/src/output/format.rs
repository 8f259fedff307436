use anyhow::{Context, Result};

use intuition_core::model::{
    AccountData, AtomData, PositionsData, SearchAtomsData, TriplesData,
};
use intuition_core::{render, TrustReport};
use intuition_query::QueryResponse;

use super::OutputFormat;

/// The response body exactly as the endpoint returned it.
pub fn format_raw(response: &QueryResponse) -> Result<String> {
    serde_json::to_string_pretty(response.raw()).context("Failed to serialize response")
}

pub fn format_atom_list(response: &QueryResponse, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => format_raw(response),
        OutputFormat::Text => {
            let data: SearchAtomsData = response.data()?;
            Ok(render::render_atom_list(&data.atoms))
        }
    }
}

pub fn format_atom(response: &QueryResponse, atom_id: u64, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => format_raw(response),
        OutputFormat::Text => {
            let data: AtomData = response.data()?;
            Ok(match data.atom {
                Some(atom) => render::render_atom(&atom),
                None => format!("Atom {atom_id} not found."),
            })
        }
    }
}

pub fn format_triples(response: &QueryResponse, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => format_raw(response),
        OutputFormat::Text => {
            let data: TriplesData = response.data()?;
            Ok(render::render_triples(&data.triples))
        }
    }
}

pub fn format_positions(response: &QueryResponse, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => format_raw(response),
        OutputFormat::Text => {
            let data: PositionsData = response.data()?;
            Ok(render::render_positions(&data.positions))
        }
    }
}

pub fn format_account(response: &QueryResponse, address: &str, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => format_raw(response),
        OutputFormat::Text => {
            let data: AccountData = response.data()?;
            Ok(match data.account {
                Some(account) => render::render_account(&account),
                None => format!("Account {address} not found."),
            })
        }
    }
}

pub fn format_trust_report(report: &TrustReport, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize trust report")
        }
        OutputFormat::Text => Ok(report.to_text()),
    }
}
