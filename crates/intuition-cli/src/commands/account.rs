use anyhow::{Context, Result};

use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_account;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, address: &str, limit: u32, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::Account {
            address: address.to_string(),
            limit,
        })
        .with_context(|| format!("Account lookup for '{address}' failed"))?;

    let output = format_account(&response, address, format)?;
    println!("{output}");
    Ok(())
}
