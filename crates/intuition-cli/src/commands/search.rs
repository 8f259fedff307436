use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_atom_list;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, term: &str, limit: u32, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::SearchAtoms {
            term: term.to_string(),
            limit,
        })
        .with_context(|| format!("Search for '{term}' failed"))?;

    let output = format_atom_list(&response, format)?;
    println!("{output}");
    Ok(())
}
