use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_atom;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, atom_id: u64, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::Atom { atom_id })
        .with_context(|| format!("Failed to fetch atom {atom_id}"))?;

    let output = format_atom(&response, atom_id, format)?;
    println!("{output}");
    Ok(())
}
