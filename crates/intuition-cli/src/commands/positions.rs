use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_positions;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, atom_id: u64, limit: u32, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::Positions { atom_id, limit })
        .with_context(|| format!("Failed to fetch positions on atom {atom_id}"))?;

    let output = format_positions(&response, format)?;
    println!("{output}");
    Ok(())
}
