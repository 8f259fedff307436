use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_atom_list;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, address: &str, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::AtomsByAddress {
            address: address.to_string(),
        })
        .with_context(|| format!("Address lookup for '{address}' failed"))?;

    let output = format_atom_list(&response, format)?;
    println!("{output}");
    Ok(())
}
