use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_triples;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, subject_id: u64, limit: u32, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::TriplesAbout { subject_id, limit })
        .with_context(|| format!("Failed to fetch claims about atom {subject_id}"))?;

    let output = format_triples(&response, format)?;
    println!("{output}");
    Ok(())
}
