pub mod account;
pub mod address;
pub mod atom;
pub mod mcp;
pub mod positions;
pub mod search;
pub mod triples;
pub mod trust_score;

use anyhow::Result;
use clap::{Args, Subcommand};

use intuition_query::IntuitionClient;

use crate::output::OutputFormat;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the queries as MCP tools over stdio
    Mcp,
}

/// The query to run. At most one may be given.
#[derive(Debug, Default, Args)]
#[group(id = "operation", multiple = false)]
pub struct QueryArgs {
    /// Search atoms by label
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Get an atom by id
    #[arg(long, value_name = "ID")]
    pub atom_id: Option<u64>,

    /// Find atoms whose label or creator matches a wallet address
    #[arg(long, value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Look up an account (full 0x address) and its positions
    #[arg(long, value_name = "ADDRESS")]
    pub account: Option<String>,

    /// Get claims made about an atom id
    #[arg(long, value_name = "ID")]
    pub triples_about: Option<u64>,

    /// Get positions (stakes) on an atom id
    #[arg(long, value_name = "ID")]
    pub positions: Option<u64>,

    /// Compute a trust score for an atom id
    #[arg(long, value_name = "ID")]
    pub trust_score: Option<u64>,
}

impl QueryArgs {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.atom_id.is_none()
            && self.address.is_none()
            && self.account.is_none()
            && self.triples_about.is_none()
            && self.positions.is_none()
            && self.trust_score.is_none()
    }
}

/// Run whichever query was selected.
pub fn dispatch(
    args: &QueryArgs,
    client: &IntuitionClient,
    limit: u32,
    format: OutputFormat,
) -> Result<()> {
    if let Some(term) = &args.search {
        search::run(client, term, limit, format)
    } else if let Some(id) = args.atom_id {
        atom::run(client, id, format)
    } else if let Some(address) = &args.address {
        address::run(client, address, format)
    } else if let Some(address) = &args.account {
        account::run(client, address, limit, format)
    } else if let Some(id) = args.triples_about {
        triples::run(client, id, limit, format)
    } else if let Some(id) = args.positions {
        positions::run(client, id, limit, format)
    } else if let Some(id) = args.trust_score {
        trust_score::run(client, id, format)
    } else {
        anyhow::bail!("No query given")
    }
}
